//! Synthesized audio feedback: a ticking pulse while reels spin and a
//! percussive hit when the last reel stops. No audio files are involved;
//! every sound is an oscillator with an exponential envelope.
//!
//! The output device is reached through [`AudioBackend`], which creates an
//! [`AudioContext`] on first use. [`AudioFeedback`] owns that context and the
//! ticking timer for one mounted engine and releases both exactly once.

pub mod synth;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::time::Interval;
use crate::error::AudioError;

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

/// One oscillator hit: frequency and gain both ramp exponentially from their
/// start to their end value over `duration_ms`, then the oscillator stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub freq_start: f32,
    pub freq_end: f32,
    pub gain_start: f32,
    pub gain_end: f32,
    pub duration_ms: f32,
}

/// Short 800Hz pulse repeated while reels spin.
pub fn tick_voice() -> Voice {
    Voice {
        waveform: Waveform::Sine,
        freq_start: 800.0,
        freq_end: 800.0,
        gain_start: 0.1,
        gain_end: 0.01,
        duration_ms: 20.0,
    }
}

/// Stop hit: a low sweeping thud layered with a bright click.
pub fn stop_voices() -> [Voice; 2] {
    [
        Voice {
            waveform: Waveform::Sine,
            freq_start: 150.0,
            freq_end: 50.0,
            gain_start: 0.5,
            gain_end: 0.01,
            duration_ms: 100.0,
        },
        Voice {
            waveform: Waveform::Square,
            freq_start: 1200.0,
            freq_end: 1200.0,
            gain_start: 0.2,
            gain_end: 0.01,
            duration_ms: 30.0,
        },
    ]
}

/// A live audio output. Voices start immediately when played.
pub trait AudioContext {
    fn play(&mut self, voice: &Voice);
    fn close(&mut self);
}

/// Creates audio contexts on demand.
pub trait AudioBackend {
    fn create_context(&self) -> Result<Box<dyn AudioContext>, AudioError>;
}

pub fn play_tick(ctx: &mut dyn AudioContext) {
    ctx.play(&tick_voice());
}

pub fn play_stop(ctx: &mut dyn AudioContext) {
    for voice in &stop_voices() {
        ctx.play(voice);
    }
}

/// Audio ownership for one mounted engine: the lazily created context and
/// the ticking timer.
pub struct AudioFeedback {
    backend: Rc<dyn AudioBackend>,
    context: Option<Box<dyn AudioContext>>,
    ticker: Option<Interval>,
    tick_interval_ms: f64,
    /// Context creation failed once; stay silent instead of retrying.
    unavailable: bool,
    closed: bool,
}

impl AudioFeedback {
    pub fn new(backend: Rc<dyn AudioBackend>, tick_interval_ms: f64) -> Self {
        Self {
            backend,
            context: None,
            ticker: None,
            tick_interval_ms,
            unavailable: false,
            closed: false,
        }
    }

    fn context(&mut self) -> Option<&mut (dyn AudioContext + 'static)> {
        if self.closed || self.unavailable {
            return None;
        }
        if self.context.is_none() {
            match self.backend.create_context() {
                Ok(ctx) => self.context = Some(ctx),
                Err(err) => {
                    log::warn!("audio feedback disabled: {}", err);
                    self.unavailable = true;
                    return None;
                }
            }
        }
        self.context.as_deref_mut()
    }

    /// Begin the ticking pulse. Restarting replaces the running timer.
    pub fn start_ticking(&mut self, now_ms: f64) {
        if self.closed {
            return;
        }
        self.ticker = Some(Interval::new(self.tick_interval_ms, now_ms));
    }

    /// Clear the ticking timer. Returns whether one was running.
    pub fn stop_ticking(&mut self) -> bool {
        self.ticker.take().is_some()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Emit the pulses that fell due since the last frame.
    pub fn update(&mut self, now_ms: f64) {
        let due = match self.ticker.as_mut() {
            Some(ticker) => ticker.poll(now_ms),
            None => return,
        };
        if due == 0 {
            return;
        }
        // Overlapping catch-up pulses sound like one; play a single tick.
        if let Some(ctx) = self.context() {
            play_tick(ctx);
        }
    }

    pub fn play_stop(&mut self) {
        if let Some(ctx) = self.context() {
            play_stop(ctx);
        }
    }

    /// Stop ticking and close the context. Safe to call repeatedly; the
    /// context is closed only once.
    pub fn close(&mut self) {
        self.stop_ticking();
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(mut ctx) = self.context.take() {
            ctx.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for AudioFeedback {
    fn drop(&mut self) {
        self.close();
    }
}

/// Backend that never produces sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

struct SilentContext;

impl AudioContext for SilentContext {
    fn play(&mut self, _voice: &Voice) {}
    fn close(&mut self) {}
}

impl AudioBackend for SilentBackend {
    fn create_context(&self) -> Result<Box<dyn AudioContext>, AudioError> {
        Ok(Box::new(SilentContext))
    }
}

/// What a [`PcmBackend`] has produced so far.
#[derive(Debug, Default, Clone)]
pub struct PcmCapture {
    pub contexts_opened: usize,
    pub contexts_closed: usize,
    pub voices: Vec<Voice>,
    /// Rendered voices, back to back.
    pub samples: Vec<f32>,
}

/// Headless backend that renders every voice to PCM samples in memory.
#[derive(Debug, Clone)]
pub struct PcmBackend {
    sample_rate: u32,
    capture: Rc<RefCell<PcmCapture>>,
}

impl PcmBackend {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            capture: Rc::new(RefCell::new(PcmCapture::default())),
        }
    }

    /// Shared view of everything rendered by this backend's contexts.
    pub fn capture(&self) -> Rc<RefCell<PcmCapture>> {
        Rc::clone(&self.capture)
    }
}

struct PcmContext {
    sample_rate: u32,
    capture: Rc<RefCell<PcmCapture>>,
}

impl AudioContext for PcmContext {
    fn play(&mut self, voice: &Voice) {
        let samples = synth::render(voice, self.sample_rate);
        let mut capture = self.capture.borrow_mut();
        capture.voices.push(*voice);
        capture.samples.extend(samples);
    }

    fn close(&mut self) {
        self.capture.borrow_mut().contexts_closed += 1;
    }
}

impl AudioBackend for PcmBackend {
    fn create_context(&self) -> Result<Box<dyn AudioContext>, AudioError> {
        self.capture.borrow_mut().contexts_opened += 1;
        Ok(Box::new(PcmContext {
            sample_rate: self.sample_rate,
            capture: Rc::clone(&self.capture),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl AudioBackend for Unavailable {
        fn create_context(&self) -> Result<Box<dyn AudioContext>, AudioError> {
            Err(AudioError::Unavailable("no device".into()))
        }
    }

    fn feedback() -> (AudioFeedback, Rc<RefCell<PcmCapture>>) {
        let backend = PcmBackend::new(8000);
        let capture = backend.capture();
        (AudioFeedback::new(Rc::new(backend), 50.0), capture)
    }

    #[test]
    fn context_is_created_lazily_and_shared() {
        let (mut audio, capture) = feedback();
        assert_eq!(capture.borrow().contexts_opened, 0);

        audio.start_ticking(0.0);
        audio.update(50.0);
        audio.play_stop();
        let capture = capture.borrow();
        assert_eq!(capture.contexts_opened, 1);
        assert_eq!(capture.voices.len(), 3);
        assert_eq!(capture.voices[0], tick_voice());
    }

    #[test]
    fn ticks_follow_the_interval() {
        let (mut audio, capture) = feedback();
        audio.start_ticking(0.0);
        for frame in 1..=12 {
            audio.update(frame as f64 * 16.0);
        }
        // 192ms elapsed: pulses at 50, 100, 150
        assert_eq!(capture.borrow().voices.len(), 3);
        assert!(audio.stop_ticking());
        audio.update(1000.0);
        assert_eq!(capture.borrow().voices.len(), 3);
        assert!(!audio.stop_ticking());
    }

    #[test]
    fn close_happens_once() {
        let (mut audio, capture) = feedback();
        audio.start_ticking(0.0);
        audio.update(60.0);
        audio.close();
        audio.close();
        drop(audio);
        let capture = capture.borrow();
        assert_eq!(capture.contexts_opened, 1);
        assert_eq!(capture.contexts_closed, 1);
    }

    #[test]
    fn closed_feedback_stays_silent() {
        let (mut audio, capture) = feedback();
        audio.close();
        audio.start_ticking(0.0);
        audio.update(500.0);
        audio.play_stop();
        assert!(!audio.is_ticking());
        assert_eq!(capture.borrow().contexts_opened, 0);
    }

    #[test]
    fn never_used_context_is_never_opened() {
        let (audio, capture) = feedback();
        drop(audio);
        assert_eq!(capture.borrow().contexts_opened, 0);
        assert_eq!(capture.borrow().contexts_closed, 0);
    }

    #[test]
    fn unavailable_backend_degrades_silently() {
        let mut audio = AudioFeedback::new(Rc::new(Unavailable), 50.0);
        audio.start_ticking(0.0);
        audio.update(100.0);
        audio.play_stop();
        audio.close();
        assert!(audio.is_closed());
    }

    #[test]
    fn stop_is_a_thud_and_a_click() {
        let [thud, click] = stop_voices();
        assert_eq!(thud.waveform, Waveform::Sine);
        assert!(thud.freq_start > thud.freq_end);
        assert_eq!(click.waveform, Waveform::Square);
        assert!(click.duration_ms < thud.duration_ms);
    }
}
