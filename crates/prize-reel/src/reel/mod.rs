//! Reel strips: per-reel scroll state, the surface that draws them, and the
//! spin controller that animates them.

pub mod spin;
pub mod surface;

use crate::api::types::EntityId;

/// Scroll state of one reel strip.
///
/// `position` is a fractional index into the strip; the symbol at
/// `position` sits under the centre indicator.
#[derive(Debug, Clone)]
pub struct Reel {
    pub position: f32,
    /// Position at the previous frame, for motion blur.
    pub previous_position: f32,
    pub blur: f32,
    /// Parent entity of every symbol on the strip.
    pub container: EntityId,
    /// Symbol entities in strip order.
    pub symbols: Vec<EntityId>,
    /// Outline around the centre symbol.
    pub indicator: EntityId,
}

impl Reel {
    pub fn new(container: EntityId, symbols: Vec<EntityId>, indicator: EntityId, resting: f32) -> Self {
        Self {
            position: resting,
            previous_position: resting,
            blur: 0.0,
            container,
            symbols,
            indicator,
        }
    }

    /// Advance one frame: blur follows the distance moved since the last
    /// frame, so it fades to zero as soon as the strip stops.
    pub fn step_blur(&mut self, strength: f32) {
        self.blur = (self.position - self.previous_position).abs() * strength;
        self.previous_position = self.position;
    }

    /// Snap back to the resting index with no residual motion.
    pub fn rest(&mut self, resting: f32) {
        self.position = resting;
        self.previous_position = resting;
        self.blur = 0.0;
    }

    pub fn is_moving(&self) -> bool {
        self.position != self.previous_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reel() -> Reel {
        Reel::new(EntityId(1), vec![EntityId(2), EntityId(3)], EntityId(4), 2.0)
    }

    #[test]
    fn blur_tracks_speed_and_decays() {
        let mut reel = reel();
        reel.position = 3.5;
        reel.step_blur(8.0);
        assert_eq!(reel.blur, 12.0);
        assert_eq!(reel.previous_position, 3.5);

        reel.step_blur(8.0);
        assert_eq!(reel.blur, 0.0);
    }

    #[test]
    fn rest_clears_motion() {
        let mut reel = reel();
        reel.position = 40.25;
        reel.blur = 3.0;
        reel.rest(2.0);
        assert_eq!(reel.position, 2.0);
        assert_eq!(reel.previous_position, 2.0);
        assert_eq!(reel.blur, 0.0);
        assert!(!reel.is_moving());
    }
}
