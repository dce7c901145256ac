// extensions/tween.rs
//
// Tween scheduler: time-based interpolation of numeric properties.
// Decoupled from what is being animated: targets are reached through the
// `Animatable` trait, completion is reported as polled events.
//
// Usage:
//   let mut tweens = TweenState::new();
//   let tween = Tween::from_current(&reels, TweenTarget::position(0), 42.0, 2500.0, easing, now)
//       .with_on_complete(0);
//   tweens.add(tween);
//   tweens.tick(now, &mut reels);       // every frame
//   for event in tweens.drain_events() { ... }

use super::easing::{ease, Easing};

/// Which property of an animated object a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    /// Scroll position of a reel strip, in symbol indices.
    Position,
}

/// An object slot plus property, resolved through `Animatable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenTarget {
    pub index: usize,
    pub property: TweenProperty,
}

impl TweenTarget {
    pub fn position(index: usize) -> Self {
        Self { index, property: TweenProperty::Position }
    }
}

/// Anything whose numeric properties tweens can read and write.
pub trait Animatable {
    fn value(&self, target: TweenTarget) -> Option<f32>;
    fn set_value(&mut self, target: TweenTarget, value: f32);
}

/// A single interpolation from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    pub from: f32,
    pub to: f32,
    /// Frame timestamp the tween starts at.
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    /// Tag reported on every value change.
    pub on_change: Option<u32>,
    /// Tag reported once when the tween snaps to its target.
    pub on_complete: Option<u32>,
}

impl Tween {
    pub fn new(target: TweenTarget, from: f32, to: f32, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            target,
            from,
            to,
            start_ms,
            duration_ms,
            easing,
            on_change: None,
            on_complete: None,
        }
    }

    /// Start from the property's current value.
    /// A target the animatable does not know starts at 0.0.
    pub fn from_current<A: Animatable + ?Sized>(
        animatable: &A,
        target: TweenTarget,
        to: f32,
        duration_ms: f64,
        easing: Easing,
        now_ms: f64,
    ) -> Self {
        let from = animatable.value(target).unwrap_or(0.0);
        Self::new(target, from, to, now_ms, duration_ms, easing)
    }

    // -- Builder methods --

    pub fn with_on_change(mut self, tag: u32) -> Self {
        self.on_change = Some(tag);
        self
    }

    pub fn with_on_complete(mut self, tag: u32) -> Self {
        self.on_complete = Some(tag);
        self
    }

    /// Normalized progress [0, 1] at `now_ms`.
    pub fn phase(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
        }
    }

    /// Property value at `now_ms`. Exactly `to` once the phase reaches 1.
    pub fn value_at(&self, now_ms: f64) -> f32 {
        let phase = self.phase(now_ms);
        if phase >= 1.0 {
            self.to
        } else {
            ease(self.from, self.to, phase, self.easing)
        }
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Notification produced while ticking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenEvent {
    Changed { tag: u32, value: f32 },
    Completed { tag: u32 },
}

/// Owns all active tweens. Tweens are only added when scheduled and only
/// removed on completion, `remove`, or `clear`.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: Vec<(TweenId, Tween)>,
    next_id: u32,
    events: Vec<TweenEvent>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tween. Returns a handle for later control.
    pub fn add(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push((id, tween));
        id
    }

    /// Remove a tween without completing it.
    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|(tid, _)| *tid != id);
        self.tweens.len() != before
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.iter().find(|(tid, _)| *tid == id).map(|(_, t)| t)
    }

    /// Advance all tweens to `now_ms` and write values into `targets`.
    /// Returns the number of tweens that completed this tick.
    pub fn tick<A: Animatable + ?Sized>(&mut self, now_ms: f64, targets: &mut A) -> usize {
        let mut completed = 0;
        let events = &mut self.events;

        self.tweens.retain(|(_, tween)| {
            let value = tween.value_at(now_ms);
            targets.set_value(tween.target, value);
            if let Some(tag) = tween.on_change {
                events.push(TweenEvent::Changed { tag, value });
            }

            if tween.phase(now_ms) < 1.0 {
                return true;
            }
            if let Some(tag) = tween.on_complete {
                events.push(TweenEvent::Completed { tag });
            }
            completed += 1;
            false
        });

        completed
    }

    /// Drain pending change/completion events in the order they happened.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TweenEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Abandon every tween. No completion events are produced.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.events.clear();
    }
}
