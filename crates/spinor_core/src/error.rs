//! Error types for scene and engine orchestration.

use thiserror::Error;

/// Errors raised while managing a scene's system set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// A system with this name is already registered in the scene.
    #[error("system '{system}' is already registered in scene '{scene}'")]
    DuplicateSystem { system: String, scene: String },

    /// Adding the system would close a dependency cycle. The named system
    /// is one member of the cycle.
    #[error("system dependency cycle detected involving '{system}'")]
    CircularDependency { system: String },
}

/// Errors raised while managing the engine's scene table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A scene with this name is already registered.
    #[error("scene '{0}' is already registered")]
    DuplicateScene(String),

    /// No scene with this name is registered.
    #[error("no scene named '{0}' is registered")]
    UnknownScene(String),
}
