use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::layer::RenderLayer;
use crate::components::shape::ShapeComponent;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: a single struct with optional visuals.
/// An entity with neither sprite nor shape is a pure container.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by the renderer.
    pub active: bool,
    /// Centre position in surface space.
    pub pos: Vec2,
    /// Rendered width and height.
    pub size: Vec2,
    /// Horizontal motion blur strength. Children inherit it from their parent.
    pub blur: f32,
    pub layer: RenderLayer,
    pub sprite: Option<SpriteComponent>,
    pub shape: Option<ShapeComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            blur: 0.0,
            layer: RenderLayer::default(),
            sprite: None,
            shape: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_shape(mut self, shape: ShapeComponent) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Whether the renderer has anything to draw for this entity.
    pub fn is_visible(&self) -> bool {
        self.active && (self.sprite.is_some() || self.shape.is_some())
    }
}
