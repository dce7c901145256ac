use prize_reel::audio::{AudioBackend, AudioContext as VoiceSink, Voice, Waveform};
use prize_reel::AudioError;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

/// Plays voices through the browser's Web Audio API.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebAudioBackend;

impl AudioBackend for WebAudioBackend {
    fn create_context(&self) -> Result<Box<dyn VoiceSink>, AudioError> {
        let ctx = AudioContext::new().map_err(|err| AudioError::Unavailable(format!("{:?}", err)))?;
        Ok(Box::new(WebAudioContext { ctx }))
    }
}

struct WebAudioContext {
    ctx: AudioContext,
}

impl WebAudioContext {
    /// Oscillator -> gain -> destination, both params ramped exponentially,
    /// stopped when the envelope ends.
    fn schedule(&self, voice: &Voice) -> Result<(), JsValue> {
        let start = self.ctx.current_time();
        let end = start + voice.duration_ms as f64 / 1000.0;

        let osc = self.ctx.create_oscillator()?;
        osc.set_type(match voice.waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
        });
        let freq = osc.frequency();
        freq.set_value_at_time(voice.freq_start, start)?;
        if voice.freq_end != voice.freq_start {
            freq.exponential_ramp_to_value_at_time(voice.freq_end, end)?;
        }

        let gain = self.ctx.create_gain()?;
        let level = gain.gain();
        level.set_value_at_time(voice.gain_start, start)?;
        level.exponential_ramp_to_value_at_time(voice.gain_end, end)?;

        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.ctx.destination())?;
        osc.start_with_when(start)?;
        osc.stop_with_when(end)?;
        Ok(())
    }
}

impl VoiceSink for WebAudioContext {
    fn play(&mut self, voice: &Voice) {
        if let Err(err) = self.schedule(voice) {
            log::warn!("voice dropped: {:?}", err);
        }
    }

    fn close(&mut self) {
        if let Err(err) = self.ctx.close() {
            log::warn!("audio context close failed: {:?}", err);
        }
    }
}
