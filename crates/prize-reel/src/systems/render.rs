use glam::Vec2;

use crate::components::entity::Entity;
use crate::components::shape::{FadeDirection, ShapeKind};
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Instances are ordered back-to-front by layer (stable within a layer);
/// entities wholly outside `bounds` (surface width, height) are culled.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    bounds: Vec2,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    let mut visible: Vec<&Entity> = entities
        .filter(|e| e.is_visible() && overlaps(e, bounds))
        .collect();
    visible.sort_by_key(|e| e.layer);

    for entity in visible {
        let mut instance = RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            width: entity.size.x,
            height: entity.size.y,
            blur: entity.blur,
            layer: entity.layer.as_u8() as f32,
            cell_span: 1.0,
            ..Default::default()
        };

        if let Some(sprite) = &entity.sprite {
            instance.kind = RenderInstance::KIND_SPRITE;
            instance.sprite_col = sprite.col;
            instance.atlas_row = sprite.row;
            instance.cell_span = sprite.cell_span;
            instance.alpha = sprite.alpha;
            instance.atlas = sprite.atlas.0 as f32;
        } else if let Some(shape) = &entity.shape {
            instance.r = shape.color.r;
            instance.g = shape.color.g;
            instance.b = shape.color.b;
            instance.alpha = shape.alpha;
            match shape.kind {
                ShapeKind::Fill => instance.kind = RenderInstance::KIND_FILL,
                ShapeKind::Outline { thickness } => {
                    instance.kind = RenderInstance::KIND_OUTLINE;
                    instance.param = thickness;
                }
                ShapeKind::Fade { direction } => {
                    instance.kind = RenderInstance::KIND_FADE;
                    instance.param = match direction {
                        FadeDirection::LeftToRight => 0.0,
                        FadeDirection::RightToLeft => 1.0,
                    };
                }
            }
        }

        buffer.push(instance);
    }
}

fn overlaps(entity: &Entity, bounds: Vec2) -> bool {
    let half = entity.size * 0.5;
    entity.pos.x + half.x >= 0.0
        && entity.pos.x - half.x <= bounds.x
        && entity.pos.y + half.y >= 0.0
        && entity.pos.y - half.y <= bounds.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::layer::RenderLayer;
    use crate::components::shape::{Color, ShapeComponent};
    use crate::components::sprite::SpriteComponent;

    const BOUNDS: Vec2 = Vec2::new(500.0, 300.0);

    #[test]
    fn orders_by_layer() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(100.0, 100.0))
                .with_size(Vec2::splat(50.0))
                .with_layer(RenderLayer::Indicators)
                .with_shape(ShapeComponent::outline(Color::WHITE, 4.0)),
            Entity::new(EntityId(2))
                .with_pos(Vec2::new(100.0, 100.0))
                .with_size(Vec2::splat(50.0))
                .with_layer(RenderLayer::Reels)
                .with_sprite(SpriteComponent::default()),
            Entity::new(EntityId(3))
                .with_pos(Vec2::new(250.0, 150.0))
                .with_size(BOUNDS)
                .with_layer(RenderLayer::Background)
                .with_shape(ShapeComponent::fill(Color::BLACK)),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), BOUNDS, &mut buffer);

        let kinds: Vec<f32> = buffer.instances.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![RenderInstance::KIND_FILL, RenderInstance::KIND_SPRITE, RenderInstance::KIND_OUTLINE]
        );
        assert_eq!(buffer.instances[2].param, 4.0);
    }

    #[test]
    fn culls_offscreen_and_invisible() {
        let mut inactive = Entity::new(EntityId(1))
            .with_pos(Vec2::new(10.0, 10.0))
            .with_shape(ShapeComponent::fill(Color::WHITE));
        inactive.active = false;

        let entities = vec![
            inactive,
            // container: nothing to draw
            Entity::new(EntityId(2)).with_pos(Vec2::new(10.0, 10.0)),
            Entity::new(EntityId(3))
                .with_pos(Vec2::new(-200.0, 10.0))
                .with_size(Vec2::splat(100.0))
                .with_sprite(SpriteComponent::default()),
            Entity::new(EntityId(4))
                .with_pos(Vec2::new(-40.0, 10.0))
                .with_size(Vec2::splat(100.0))
                .with_sprite(SpriteComponent::default()),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), BOUNDS, &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
        assert_eq!(buffer.instances[0].x, -40.0);
    }
}
