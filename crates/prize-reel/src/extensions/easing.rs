// extensions/easing.rs
//
// Pure easing functions for animation interpolation.
// No dependencies on Entity/Scene: just math.

/// Overshoot used by the reel stop unless configured otherwise.
pub const DEFAULT_OVERSHOOT: f32 = 0.5;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Runs past the target, then settles back onto it.
    /// `amount` controls how far past: 0.0 is a plain cubic ease-out.
    BackOut { amount: f32 },
}

impl Easing {
    /// Backout easing with the given overshoot amount.
    pub fn backout(amount: f32) -> Self {
        Easing::BackOut { amount }
    }

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Endpoints map exactly to 0 and 1; BackOut exceeds 1 in between.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::BackOut { amount } => {
                let u = t - 1.0;
                u * u * ((amount + 1.0) * u + amount) + 1.0
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}
