use serde::{Deserialize, Serialize};

use crate::components::shape::Color;
use crate::error::ConfigError;
use crate::extensions::easing::DEFAULT_OVERSHOOT;

/// Engine configuration: reel geometry, spin timing, audio pacing.
/// Every field has a default, so a JSON document only needs the overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Symbol edge length in world units.
    pub symbol_size: f32,
    /// Gap between neighbouring symbols, and between reel rows.
    pub symbol_gap: f32,
    /// Extra height added around the stacked reel rows.
    pub margin: f32,
    /// Width of the drawing surface.
    pub viewport_width: f32,
    /// Strip length as a multiple of the prize count.
    pub strip_repetition: usize,
    /// Strip index shown at the centre while idle.
    pub resting_index: usize,
    /// Most reels animated at once. More tickets than this go to bulk mode.
    pub max_reels: usize,
    /// Full strip cycles travelled by reel 0.
    pub base_cycles: u32,
    /// Additional full cycles for each later reel.
    pub cycles_per_reel: u32,
    /// Upper bound (inclusive) of the random extra cycles per reel.
    pub max_extra_cycles: u32,
    pub base_duration_ms: f64,
    pub duration_per_reel_ms: f64,
    pub duration_per_extra_cycle_ms: f64,
    /// Overshoot amount of the backout easing.
    pub overshoot: f32,
    /// Horizontal blur per strip index moved in one frame.
    pub blur_strength: f32,
    /// Width of the left/right fade overlays.
    pub fade_width: f32,
    pub background: Color,
    pub neutral_outline: Color,
    pub highlight_outline: Color,
    pub outline_thickness: f32,
    /// Period of the ticking sound while reels spin.
    pub tick_interval_ms: f64,
    /// Delay before bulk results are delivered. Zero delivers synchronously.
    pub bulk_delay_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbol_size: 100.0,
            symbol_gap: 10.0,
            margin: 20.0,
            viewport_width: 560.0,
            strip_repetition: 50,
            resting_index: 2,
            max_reels: 5,
            base_cycles: 10,
            cycles_per_reel: 2,
            max_extra_cycles: 2,
            base_duration_ms: 2500.0,
            duration_per_reel_ms: 300.0,
            duration_per_extra_cycle_ms: 300.0,
            overshoot: DEFAULT_OVERSHOOT,
            blur_strength: 8.0,
            fade_width: 60.0,
            background: Color::from_hex(0x1a1a2e),
            neutral_outline: Color::from_hex(0x4a4a6a),
            highlight_outline: Color::from_hex(0xffd700),
            outline_thickness: 4.0,
            tick_interval_ms: 50.0,
            bulk_delay_ms: 300.0,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol_size <= 0.0 {
            return Err(ConfigError::Invalid("symbol_size must be positive"));
        }
        if self.symbol_gap < 0.0 || self.margin < 0.0 {
            return Err(ConfigError::Invalid("symbol_gap and margin must not be negative"));
        }
        if self.strip_repetition == 0 {
            return Err(ConfigError::Invalid("strip_repetition must be at least 1"));
        }
        if self.resting_index >= self.strip_repetition {
            return Err(ConfigError::Invalid("resting_index must lie inside the first strip cycles"));
        }
        if self.max_reels == 0 {
            return Err(ConfigError::Invalid("max_reels must be at least 1"));
        }
        if self.tick_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive"));
        }
        if self.strip_repetition < self.min_strip_repetition() {
            return Err(ConfigError::Invalid("strip_repetition is too short for the farthest spin target"));
        }
        Ok(())
    }

    /// Fewest strip cycles that still hold every spin target. The farthest
    /// target is `resting_index + cycles * n + (n - 1)` on a strip of
    /// `strip_repetition * n` symbols, for any prize count `n >= 1`.
    pub fn min_strip_repetition(&self) -> usize {
        let cycles = self.base_cycles as usize
            + self.cycles_per_reel as usize * self.max_reels.saturating_sub(1)
            + self.max_extra_cycles as usize;
        self.resting_index + cycles + 1
    }

    /// Distance between neighbouring symbol centres.
    pub fn symbol_stride(&self) -> f32 {
        self.symbol_size + self.symbol_gap
    }

    /// Surface size for `reel_count` stacked reel rows.
    pub fn surface_size(&self, reel_count: usize) -> (f32, f32) {
        (
            self.viewport_width,
            reel_count as f32 * self.symbol_stride() + self.margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "max_reels": 3, "bulk_delay_ms": 0 }"#).unwrap();
        assert_eq!(config.max_reels, 3);
        assert_eq!(config.bulk_delay_ms, 0.0);
        assert_eq!(config.strip_repetition, 50);
        assert_eq!(config.resting_index, 2);
    }

    #[test]
    fn rejects_resting_index_outside_strip() {
        let err = EngineConfig::from_json(r#"{ "strip_repetition": 2, "resting_index": 2 }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_strip_shorter_than_the_farthest_target() {
        let err = EngineConfig::from_json(r#"{ "strip_repetition": 10 }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let config = EngineConfig::default();
        assert_eq!(config.min_strip_repetition(), 23);
        let json = format!(r#"{{ "strip_repetition": {} }}"#, config.min_strip_repetition());
        assert!(EngineConfig::from_json(&json).is_ok());
    }

    #[test]
    fn surface_grows_with_reels() {
        let config = EngineConfig::default();
        let (w, h) = config.surface_size(3);
        assert_eq!(w, 560.0);
        assert_eq!(h, 3.0 * 110.0 + 20.0);
    }
}
