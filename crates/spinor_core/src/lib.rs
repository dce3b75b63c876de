//! # spinor_core
//!
//! Engine orchestration: the [`System`] trait, dependency-aware system
//! scheduling, [`Scene`] lifecycle, and the top-level [`Engine`] that
//! hosts named scenes and drives one of them per update.
//!
//! Systems declare ordering constraints two ways: hard `dependencies`
//! (named systems that must run earlier in the same scene) and a soft
//! `priority` used to order systems the dependency graph leaves free.
//! The scene resolves both into a single execution order whenever its
//! system set changes; a dependency cycle is rejected at registration
//! time and leaves the scene unchanged.

pub mod engine;
pub mod error;
pub mod scene;
pub mod schedule;
pub mod system;

pub use engine::Engine;
pub use error::{EngineError, SceneError};
pub use scene::{Scene, SceneConfig};
pub use system::System;
