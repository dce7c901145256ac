// extensions/mod.rs
//
// Animation and hierarchy helpers used by the reel surface.
// Decoupled from Entity/Scene internals where possible.

pub mod easing;
pub mod transform;
pub mod tween;

pub use easing::{Easing, lerp, ease, DEFAULT_OVERSHOOT};
pub use transform::{TransformGraph, LocalTransform};
pub use tween::{Animatable, Tween, TweenEvent, TweenId, TweenProperty, TweenState, TweenTarget};
