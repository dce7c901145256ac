//! Offline rendering of a [`Voice`] to mono PCM samples.
//! Mirrors what a Web Audio oscillator + gain node pair produces.

use std::f32::consts::TAU;

use super::{Voice, Waveform};

/// Render `voice` at `sample_rate`, one f32 sample per frame in -1.0..=1.0.
pub fn render(voice: &Voice, sample_rate: u32) -> Vec<f32> {
    let n = (sample_rate as f32 * voice.duration_ms / 1000.0).round() as usize;
    let mut samples = Vec::with_capacity(n);
    let mut phase = 0.0f32;

    for i in 0..n {
        let t = i as f32 / n as f32;
        let freq = exp_ramp(voice.freq_start, voice.freq_end, t);
        let gain = exp_ramp(voice.gain_start, voice.gain_end, t);

        let wave = match voice.waveform {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 { 1.0 } else { -1.0 }
            }
        };
        samples.push(wave * gain);

        phase = (phase + freq / sample_rate as f32).fract();
    }

    samples
}

/// Exponential ramp from `from` to `to` at normalized time `t`.
/// Falls back to linear when either end is not strictly positive.
fn exp_ramp(from: f32, to: f32, t: f32) -> f32 {
    if from <= 0.0 || to <= 0.0 {
        from + (to - from) * t
    } else {
        from * (to / from).powf(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{stop_voices, tick_voice};

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn length_follows_duration() {
        assert_eq!(render(&tick_voice(), 48_000).len(), 960);
        assert_eq!(render(&stop_voices()[0], 44_100).len(), 4410);
    }

    #[test]
    fn envelope_decays() {
        let samples = render(&stop_voices()[0], 48_000);
        let quarter = samples.len() / 4;
        let head = peak(&samples[..quarter]);
        let tail = peak(&samples[samples.len() - quarter..]);
        assert!(head > tail * 4.0, "head {} tail {}", head, tail);
        assert!(head <= 0.5);
    }

    #[test]
    fn square_wave_is_two_level() {
        let click = stop_voices()[1];
        let samples = render(&click, 48_000);
        // First sample: full-level high at the initial gain.
        assert!((samples[0] - click.gain_start).abs() < 1e-6);
        assert!(samples.iter().any(|s| *s < 0.0));
    }

    #[test]
    fn exp_ramp_hits_endpoints() {
        assert!((exp_ramp(150.0, 50.0, 0.0) - 150.0).abs() < 1e-4);
        assert!((exp_ramp(150.0, 50.0, 1.0) - 50.0).abs() < 1e-3);
        assert_eq!(exp_ramp(0.0, 1.0, 0.5), 0.5);
    }
}
