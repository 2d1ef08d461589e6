pub mod config;
pub mod dsp;
pub mod error;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::SynthConfig;
use crate::dsp::synth::{Synthesis, SynthesisRequest, Synthesizer};
use crate::error::SynthError;

pub use crate::dsp::oscillator::{Oscillator, Waveform};
pub use crate::dsp::synth::{AudioClip, ShapePolicy};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the crate version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// What the browser receives from a synthesis call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisOutput<'a> {
    pub sample_rate: u32,
    pub samples: &'a [f32],
    pub preview: &'a [f64],
}

impl<'a> From<&'a Synthesis> for SynthesisOutput<'a> {
    fn from(s: &'a Synthesis) -> Self {
        SynthesisOutput {
            sample_rate: s.audio.sample_rate,
            samples: &s.audio.samples,
            preview: s.preview(),
        }
    }
}

/// Validate a list of oscillators and synthesize it with the default config.
pub fn synthesize(oscillators: Vec<Oscillator>) -> Result<Synthesis, SynthError> {
    let synth = Synthesizer::default();
    let request = SynthesisRequest::new(oscillators)?;
    Ok(synth.synthesize(&request))
}

/// Synthesize from the control surface's parallel lists, using the first
/// `count` entries of each.
pub fn synthesize_parallel<S: AsRef<str>>(
    frequencies: &[f64],
    amplitudes: &[f64],
    phases: &[f64],
    shapes: &[S],
    count: usize,
    policy: ShapePolicy,
) -> Result<Synthesis, SynthError> {
    let request =
        SynthesisRequest::from_parallel(frequencies, amplitudes, phases, shapes, count, policy)?;
    Ok(Synthesizer::default().synthesize(&request))
}

fn output_to_js(synthesis: &Synthesis) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&SynthesisOutput::from(synthesis))
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

fn oscillators_from_js(value: JsValue) -> Result<Vec<Oscillator>, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&format!("{e}")))
}

fn synthesize_js(oscillators: JsValue) -> Result<Synthesis, JsValue> {
    let oscillators = oscillators_from_js(oscillators)?;
    synthesize(oscillators).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: the default config, so the UI builds its sliders from
/// the same constants the synthesizer uses.
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&SynthConfig::default())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: synthesize an array of oscillators into
/// `{sampleRate, samples, preview}`.
#[wasm_bindgen(js_name = synthesize)]
pub fn synthesize_wasm(oscillators: JsValue) -> Result<JsValue, JsValue> {
    let synthesis = synthesize_js(oscillators)?;
    output_to_js(&synthesis)
}

/// WASM-exposed: synthesize straight from the slider values.
/// With `silence_unknown`, an unrecognized waveform name plays as silence
/// instead of failing the call.
#[wasm_bindgen]
pub fn synthesize_controls(
    frequencies: Vec<f64>,
    amplitudes: Vec<f64>,
    phases: Vec<f64>,
    shapes: Vec<String>,
    count: usize,
    silence_unknown: bool,
) -> Result<JsValue, JsValue> {
    let policy = if silence_unknown {
        ShapePolicy::Silence
    } else {
        ShapePolicy::Reject
    };
    let synthesis = synthesize_parallel(
        &frequencies,
        &amplitudes,
        &phases,
        shapes.as_slice(),
        count,
        policy,
    )
    .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    output_to_js(&synthesis)
}

/// WASM-exposed: synthesize to mono f32 samples for AudioWorklet playback.
#[wasm_bindgen]
pub fn synthesize_samples(oscillators: JsValue) -> Result<Vec<f32>, JsValue> {
    Ok(synthesize_js(oscillators)?.audio.samples)
}

/// WASM-exposed: synthesize to a WAV byte array for an `<audio>` element.
#[wasm_bindgen]
pub fn synthesize_wav(oscillators: JsValue) -> Result<Vec<u8>, JsValue> {
    let synthesis = synthesize_js(oscillators)?;
    Ok(dsp::renderer::render_wav(&synthesis.audio))
}
