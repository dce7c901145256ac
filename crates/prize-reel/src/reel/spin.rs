// reel/spin.rs
//
// Spin controller: draws one prize per reel, schedules a backout tween per
// reel towards the strip index that shows it, and reports completion once
// every reel has landed. Audio ticks while any reel moves and a stop hit
// plays when the last one lands.

use crate::api::config::EngineConfig;
use crate::api::types::RevealEvent;
use crate::audio::AudioFeedback;
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Tween, TweenEvent, TweenState, TweenTarget};
use crate::prize::selector::{extra_cycles, select_index, RandomSource};
use crate::prize::{Prize, PrizeTable};

use super::surface::RenderSurface;

/// Where a controller is in its spin cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    /// Tweens are running.
    Spinning,
    /// Every reel has landed; completion side effects are being applied.
    Settling,
}

/// Destination and timing for one reel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelPlan {
    pub prize_index: usize,
    pub extra_cycles: u32,
    /// Strip index the reel comes to rest on.
    pub target: f32,
    pub duration_ms: f64,
}

/// Later reels travel further and for longer so they land left to right.
pub fn plan_reel(
    config: &EngineConfig,
    prize_count: usize,
    reel: usize,
    prize_index: usize,
    extra_cycles: u32,
) -> ReelPlan {
    let cycles = config.base_cycles + config.cycles_per_reel * reel as u32 + extra_cycles;
    let target = config.resting_index + cycles as usize * prize_count + prize_index;
    let duration_ms = config.base_duration_ms
        + config.duration_per_reel_ms * reel as f64
        + config.duration_per_extra_cycle_ms * extra_cycles as f64;
    ReelPlan {
        prize_index,
        extra_cycles,
        target: target as f32,
        duration_ms,
    }
}

pub struct SpinController {
    config: EngineConfig,
    prizes: PrizeTable,
    surface: RenderSurface,
    tweens: TweenState,
    audio: AudioFeedback,
    phase: SpinPhase,
    landed: usize,
    results: Vec<Prize>,
    events: Vec<RevealEvent>,
}

impl SpinController {
    pub fn new(config: &EngineConfig, prizes: PrizeTable, surface: RenderSurface, audio: AudioFeedback) -> Self {
        Self {
            config: config.clone(),
            prizes,
            surface,
            tweens: TweenState::new(),
            audio,
            phase: SpinPhase::Idle,
            landed: 0,
            results: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Start a spin. Ignored (returns false) while a spin is in progress.
    pub fn spin(&mut self, now_ms: f64, rng: &mut dyn RandomSource) -> bool {
        if self.phase != SpinPhase::Idle {
            log::debug!("spin ignored: already spinning");
            return false;
        }

        let reel_count = self.surface.reel_count();
        let n = self.prizes.len();
        let mut results = Vec::with_capacity(reel_count);
        let mut plans = Vec::with_capacity(reel_count);
        for reel in 0..reel_count {
            let Some(index) = select_index(self.prizes.prizes(), &mut *rng) else {
                log::warn!("spin ignored: prize table is empty");
                return false;
            };
            let extra = extra_cycles(&mut *rng, self.config.max_extra_cycles);
            plans.push(plan_reel(&self.config, n, reel, index, extra));
            results.push(self.prizes.prizes()[index].clone());
        }

        self.surface.rebase();
        self.surface.set_highlight(false);
        self.tweens.clear();

        let easing = Easing::backout(self.config.overshoot);
        for (reel, plan) in plans.iter().enumerate() {
            let tween = Tween::from_current(
                &self.surface,
                TweenTarget::position(reel),
                plan.target,
                plan.duration_ms,
                easing,
                now_ms,
            )
            .with_on_complete(reel as u32);
            self.tweens.add(tween);
            log::debug!(
                "reel {} -> {:?} (target {}, {} extra cycles, {}ms)",
                reel,
                results[reel].name,
                plan.target,
                plan.extra_cycles,
                plan.duration_ms
            );
        }

        self.results = results;
        self.landed = 0;
        self.phase = SpinPhase::Spinning;
        self.audio.start_ticking(now_ms);
        self.events.push(RevealEvent::SpinStarted);
        true
    }

    /// Advance one frame: audio pacing, tweens, completion, visuals.
    pub fn tick(&mut self, now_ms: f64) {
        self.audio.update(now_ms);

        if self.phase == SpinPhase::Spinning {
            self.tweens.tick(now_ms, &mut self.surface);
            let landed = self
                .tweens
                .drain_events()
                .filter(|e| matches!(e, TweenEvent::Completed { .. }))
                .count();
            self.landed += landed;
            if self.landed >= self.surface.reel_count() {
                self.settle();
            }
        }

        self.surface.update_frame();
    }

    fn settle(&mut self) {
        self.phase = SpinPhase::Settling;
        self.audio.stop_ticking();
        self.audio.play_stop();
        self.surface.set_highlight(true);
        log::info!(
            "spin complete: {}",
            self.results.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
        );
        self.events.push(RevealEvent::SpinCompleted { results: self.results.clone() });
        self.phase = SpinPhase::Idle;
    }

    /// Abandon any spin and return every reel to rest.
    pub fn reset(&mut self) {
        self.tweens.clear();
        self.audio.stop_ticking();
        self.surface.reset_positions();
        self.surface.set_highlight(false);
        self.results.clear();
        self.landed = 0;
        self.phase = SpinPhase::Idle;
    }

    /// Stop all activity and release audio and the surface.
    pub fn unmount(mut self) {
        self.tweens.clear();
        self.audio.close();
        let Self { surface, .. } = self;
        surface.unmount();
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain(..)
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase != SpinPhase::Idle
    }

    /// Prizes of the last completed spin, in reel order.
    pub fn results(&self) -> &[Prize] {
        &self.results
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_ticking(&self) -> bool {
        self.audio.is_ticking()
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }
}
