// reel/surface.rs
//
// Retained render surface for the animated reveal. One horizontal strip per
// reel, stacked top to bottom. Each strip is a container entity whose
// children are the prize symbols; scrolling moves the container only.
//
// The strip repeats the prize list `strip_repetition` times and is rotated
// so that strip index `resting_index` shows prize 0. A reel whose position
// is `resting_index + k * n + p` therefore shows prize `p`.

use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::api::types::EntityId;
use crate::assets::registry::SpriteRegistry;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::shape::{FadeDirection, ShapeComponent};
use crate::components::sprite::SpriteComponent;
use crate::core::scene::Scene;
use crate::error::SurfaceError;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::extensions::tween::{Animatable, TweenProperty, TweenTarget};
use crate::prize::{Prize, PrizeTable};
use crate::renderer::instance::RenderBuffer;
use crate::systems::render;

use super::Reel;

/// How a prize is drawn on the strip.
#[derive(Debug, Clone)]
enum SymbolVisual {
    Sprite(SpriteComponent),
    Shape(ShapeComponent),
}

pub struct RenderSurface {
    config: EngineConfig,
    size: Vec2,
    prize_count: usize,
    scene: Scene,
    graph: TransformGraph,
    reels: Vec<Reel>,
    highlighted: bool,
}

impl RenderSurface {
    /// Build the scene for `reel_count` reels.
    ///
    /// Prizes whose image is missing from `registry` fall back to a fill in
    /// their rarity color; the surface still mounts.
    pub fn mount(
        config: &EngineConfig,
        prizes: &PrizeTable,
        reel_count: usize,
        registry: &SpriteRegistry,
    ) -> Result<Self, SurfaceError> {
        if prizes.is_empty() {
            return Err(SurfaceError::NoPrizes);
        }
        if reel_count == 0 {
            return Err(SurfaceError::NoReels);
        }
        if reel_count > config.max_reels {
            return Err(SurfaceError::TooManyReels { requested: reel_count, capacity: config.max_reels });
        }
        let (width, height) = config.surface_size(reel_count);
        if width <= 0.0 || height <= 0.0 {
            return Err(SurfaceError::ZeroSize { width, height });
        }

        let n = prizes.len();
        let strip_len = n * config.strip_repetition;
        let visuals: Vec<SymbolVisual> = prizes.iter().map(|p| symbol_visual(p, registry)).collect();

        let mut surface = Self {
            config: config.clone(),
            size: Vec2::new(width, height),
            prize_count: n,
            scene: Scene::with_capacity(reel_count * (strip_len + 2) + 3),
            graph: TransformGraph::new(),
            reels: Vec::with_capacity(reel_count),
            highlighted: false,
        };

        let bg = surface.scene.next_id();
        surface.scene.spawn(
            Entity::new(bg)
                .with_tag("background")
                .with_pos(surface.size * 0.5)
                .with_size(surface.size)
                .with_layer(RenderLayer::Background)
                .with_shape(ShapeComponent::fill(config.background)),
        );

        let stride = config.symbol_stride();
        let symbol_size = Vec2::splat(config.symbol_size);
        let resting = config.resting_index as f32;

        for i in 0..reel_count {
            let container = surface.scene.next_id();
            let offset = surface.container_offset(i, resting);
            surface.scene.spawn(Entity::new(container).with_tag("reel"));
            surface.graph.register_with(container, LocalTransform::at(offset));

            let mut symbols = Vec::with_capacity(strip_len);
            for j in 0..strip_len {
                let prize_index = strip_prize(j, config.resting_index, n);
                let id = surface.scene.next_id();
                let mut entity = Entity::new(id)
                    .with_tag(prizes.prizes()[prize_index].name.clone())
                    .with_size(symbol_size)
                    .with_layer(RenderLayer::Reels);
                entity = match &visuals[prize_index] {
                    SymbolVisual::Sprite(sprite) => entity.with_sprite(sprite.clone()),
                    SymbolVisual::Shape(shape) => entity.with_shape(*shape),
                };
                surface.scene.spawn(entity);
                surface
                    .graph
                    .register_with(id, LocalTransform::at(Vec2::new(j as f32 * stride, 0.0)));
                surface.graph.set_parent(id, Some(container));
                symbols.push(id);
            }

            let indicator = surface.scene.next_id();
            let outline = symbol_size + Vec2::splat(config.outline_thickness * 2.0);
            let centre = Vec2::new(width * 0.5, surface.row_y(i));
            surface.scene.spawn(
                Entity::new(indicator)
                    .with_tag("indicator")
                    .with_pos(centre)
                    .with_size(outline)
                    .with_layer(RenderLayer::Indicators)
                    .with_shape(ShapeComponent::outline(config.neutral_outline, config.outline_thickness)),
            );

            surface.reels.push(Reel::new(container, symbols, indicator, resting));
        }

        let fade_size = Vec2::new(config.fade_width, height);
        for (x, direction) in [
            (config.fade_width * 0.5, FadeDirection::LeftToRight),
            (width - config.fade_width * 0.5, FadeDirection::RightToLeft),
        ] {
            let id = surface.scene.next_id();
            surface.scene.spawn(
                Entity::new(id)
                    .with_tag("fade")
                    .with_pos(Vec2::new(x, height * 0.5))
                    .with_size(fade_size)
                    .with_layer(RenderLayer::Overlay)
                    .with_shape(ShapeComponent::fade(config.background, direction)),
            );
        }

        surface.graph.propagate(&mut surface.scene);
        log::debug!(
            "surface mounted: {} reels x {} symbols, {}x{}",
            reel_count,
            strip_len,
            width,
            height
        );
        Ok(surface)
    }

    /// Vertical centre of reel row `reel`.
    fn row_y(&self, reel: usize) -> f32 {
        let stride = self.config.symbol_stride();
        self.config.margin * 0.5 + reel as f32 * stride + stride * 0.5
    }

    /// Container offset that puts strip index `position` under the indicator.
    fn container_offset(&self, reel: usize, position: f32) -> Vec2 {
        Vec2::new(
            self.size.x * 0.5 - position * self.config.symbol_stride(),
            self.row_y(reel),
        )
    }

    /// Per-frame visual update: motion blur from the distance each reel moved
    /// since the last frame, then container placement.
    pub fn update_frame(&mut self) {
        let strength = self.config.blur_strength;
        for i in 0..self.reels.len() {
            let reel = &mut self.reels[i];
            let before = reel.blur;
            reel.step_blur(strength);
            let (container, position, blur) = (reel.container, reel.position, reel.blur);

            if blur != before {
                if let Some(entity) = self.scene.get_mut(container) {
                    entity.blur = blur;
                }
                self.graph.mark_dirty();
            }
            let offset = self.container_offset(i, position);
            self.graph.set_offset(container, offset);
        }
        self.graph.propagate(&mut self.scene);
    }

    /// Fold every reel back into the first strip cycles without changing what
    /// is shown, so the next spin always has a full strip ahead of it.
    pub fn rebase(&mut self) {
        let resting = self.config.resting_index as f32;
        let n = self.prize_count as f32;
        for reel in &mut self.reels {
            let folded = resting + (reel.position - resting).rem_euclid(n);
            reel.position = folded;
            reel.previous_position = folded;
        }
    }

    /// Put every reel back at the resting index with no blur.
    pub fn reset_positions(&mut self) {
        let resting = self.config.resting_index as f32;
        for reel in &mut self.reels {
            reel.rest(resting);
            if let Some(entity) = self.scene.get_mut(reel.container) {
                entity.blur = 0.0;
            }
        }
        self.graph.mark_dirty();
        self.update_frame();
    }

    /// Switch the centre outlines between the highlight and neutral colors.
    pub fn set_highlight(&mut self, on: bool) {
        self.highlighted = on;
        let color = if on { self.config.highlight_outline } else { self.config.neutral_outline };
        for reel in &self.reels {
            if let Some(shape) = self.scene.get_mut(reel.indicator).and_then(|e| e.shape.as_mut()) {
                shape.color = color;
            }
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Prize index currently under the indicator of `reel`.
    pub fn centre_prize(&self, reel: usize) -> Option<usize> {
        let reel = self.reels.get(reel)?;
        let index = reel.position.round() as i64 - self.config.resting_index as i64;
        Some(index.rem_euclid(self.prize_count as i64) as usize)
    }

    /// Symbol entity currently under the indicator of `reel`.
    pub fn centre_symbol(&self, reel: usize) -> Option<&Entity> {
        let reel = self.reels.get(reel)?;
        let index = reel.position.round();
        if index < 0.0 {
            return None;
        }
        reel.symbols.get(index as usize).and_then(|&id| self.scene.get(id))
    }

    /// Write the visible entities into `buffer`, back to front.
    pub fn build_render_buffer(&self, buffer: &mut RenderBuffer) {
        render::build_render_buffer(self.scene.iter(), self.size, buffer);
    }

    /// Release the scene.
    pub fn unmount(self) {
        log::debug!("surface unmounted: {} entities released", self.scene.len());
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn prize_count(&self) -> usize {
        self.prize_count
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.scene.get(id)
    }
}

impl Animatable for RenderSurface {
    fn value(&self, target: TweenTarget) -> Option<f32> {
        match target.property {
            TweenProperty::Position => self.reels.get(target.index).map(|r| r.position),
        }
    }

    fn set_value(&mut self, target: TweenTarget, value: f32) {
        match target.property {
            TweenProperty::Position => {
                if let Some(reel) = self.reels.get_mut(target.index) {
                    reel.position = value;
                }
            }
        }
    }
}

/// Prize shown at strip index `j`.
fn strip_prize(j: usize, resting: usize, n: usize) -> usize {
    (j + n - resting % n) % n
}

fn symbol_visual(prize: &Prize, registry: &SpriteRegistry) -> SymbolVisual {
    if let Some(image) = &prize.image {
        match registry.get(image) {
            Some(sprite) => return SymbolVisual::Sprite(sprite.clone()),
            None => log::warn!("image {:?} for prize {:?} not loaded, drawing a placeholder", image, prize.name),
        }
    }
    SymbolVisual::Shape(ShapeComponent::fill(prize.rarity.color()))
}
