//! 2D sprite rendering data.

use serde::{Deserialize, Serialize};
use spinor_ecs::Component;
use spinor_math::Vector2;

/// What to draw for an entity in a 2D pass. Purely descriptive; a
/// renderer interprets `texture_id` and `layer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture_id: String,
    pub size: Vector2,
    pub offset: Vector2,
    /// RGBA multiplier in the 0..=1 range.
    pub tint: [f64; 4],
    pub visible: bool,
    /// Draw order; higher layers render on top.
    pub layer: i32,
}

impl Sprite {
    #[must_use]
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            size: Vector2::ONE,
            offset: Vector2::ZERO,
            tint: [1.0, 1.0, 1.0, 1.0],
            visible: true,
            layer: 0,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: Vector2) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_tint(mut self, r: f64, g: f64, b: f64, a: f64) -> Self {
        self.tint = [r, g, b, a];
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }
}

impl Component for Sprite {
    fn type_name() -> &'static str {
        "Sprite"
    }
}
