//! Additive synthesizer — sums oscillator partials into one normalized buffer.
//!
//! A `SynthesisRequest` is validated once at construction; after that,
//! `Synthesizer::synthesize` is a pure function of the request and the
//! config and cannot fail.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SynthConfig;
use crate::error::SynthError;

use super::mixer::Mixer;
use super::oscillator::{Oscillator, Waveform};

/// What to do with a shape name outside `{Sine, Square, Saw}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapePolicy {
    #[default]
    Reject,
    /// The oscillator is dropped and contributes nothing.
    Silence,
}

/// An immutable, validated set of oscillators for one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    oscillators: Vec<Oscillator>,
}

impl SynthesisRequest {
    /// Validate a list of oscillators.
    ///
    /// The oscillator count is not capped here; `SynthConfig::max_oscillators`
    /// is a limit of the control surface.
    pub fn new(oscillators: Vec<Oscillator>) -> Result<Self, SynthError> {
        if oscillators.is_empty() {
            return Err(SynthError::Empty);
        }
        for (index, osc) in oscillators.iter().enumerate() {
            check_oscillator(index, osc)?;
        }
        check_headroom(&oscillators)?;
        Ok(SynthesisRequest { oscillators })
    }

    /// Build a request from the control surface's parallel lists.
    ///
    /// Only the first `count` entries of each list are used; every list
    /// must have at least that many.
    pub fn from_parallel<S: AsRef<str>>(
        frequencies: &[f64],
        amplitudes: &[f64],
        phases: &[f64],
        shapes: &[S],
        count: usize,
        policy: ShapePolicy,
    ) -> Result<Self, SynthError> {
        if count == 0 {
            return Err(SynthError::Empty);
        }
        let shortest = frequencies
            .len()
            .min(amplitudes.len())
            .min(phases.len())
            .min(shapes.len());
        if shortest < count {
            return Err(SynthError::LengthMismatch {
                expected: count,
                frequencies: frequencies.len(),
                amplitudes: amplitudes.len(),
                phases: phases.len(),
                shapes: shapes.len(),
            });
        }

        let mut oscillators = Vec::with_capacity(count);
        for index in 0..count {
            let name = shapes[index].as_ref();
            let shape = match (name.parse::<Waveform>(), policy) {
                (Ok(shape), _) => shape,
                (Err(_), ShapePolicy::Silence) => {
                    warn!(index, shape = name, "silencing oscillator with unknown waveform");
                    continue;
                }
                (Err(_), ShapePolicy::Reject) => {
                    return Err(SynthError::UnknownShape {
                        index,
                        shape: name.to_string(),
                    });
                }
            };
            let osc = Oscillator::new(shape, frequencies[index], amplitudes[index], phases[index]);
            check_oscillator(index, &osc)?;
            oscillators.push(osc);
        }
        check_headroom(&oscillators)?;

        // Silenced oscillators may leave nothing behind; that still renders as silence.
        Ok(SynthesisRequest { oscillators })
    }

    /// Parse a JSON array of oscillator records.
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        let oscillators: Vec<Oscillator> = serde_json::from_str(json)?;
        Self::new(oscillators)
    }

    pub fn oscillators(&self) -> &[Oscillator] {
        &self.oscillators
    }

    pub fn len(&self) -> usize {
        self.oscillators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oscillators.is_empty()
    }
}

/// Summed amplitude magnitudes bound the raw peak; the bound must stay finite.
fn check_headroom(oscillators: &[Oscillator]) -> Result<(), SynthError> {
    let total: f64 = oscillators.iter().map(|o| o.amplitude.abs()).sum();
    if !total.is_finite() {
        return Err(SynthError::AmplitudeOverflow);
    }
    Ok(())
}

fn check_oscillator(index: usize, osc: &Oscillator) -> Result<(), SynthError> {
    if !osc.frequency.is_finite() || osc.frequency <= 0.0 {
        return Err(SynthError::InvalidFrequency {
            index,
            value: osc.frequency,
        });
    }
    if !osc.amplitude.is_finite() {
        return Err(SynthError::NonFinite {
            index,
            field: "amplitude",
        });
    }
    if !osc.phase_degrees.is_finite() {
        return Err(SynthError::NonFinite {
            index,
            field: "phase",
        });
    }
    Ok(())
}

/// A playable clip: what an audio sink needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioClip {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl AudioClip {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Result of one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub audio: AudioClip,
    /// Full-precision normalized samples, for inspection and plotting.
    pub waveform: Vec<f64>,
    preview_len: usize,
}

impl Synthesis {
    /// The leading samples shown in the waveform plot.
    pub fn preview(&self) -> &[f64] {
        &self.waveform[..self.preview_len.min(self.waveform.len())]
    }
}

/// Stateless additive synthesizer over a fixed config.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: SynthConfig,
}

impl Synthesizer {
    pub fn new(config: SynthConfig) -> Self {
        Synthesizer { config }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Sample times in seconds: `i / sample_rate`, endpoint excluded.
    pub fn time_axis(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        let sr = self.config.sample_rate as f64;
        (0..self.config.sample_count()).map(move |i| i as f64 / sr)
    }

    /// Sum every oscillator and normalize by the global peak.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Synthesis {
        let mode = self.config.phase_mode;
        let mut mixer = Mixer::new(self.config.sample_count());

        for osc in request.oscillators() {
            mixer.add_scaled(osc.amplitude, self.time_axis().map(|t| osc.partial(t, mode)));
        }

        let raw_peak = mixer.peak();
        let waveform = mixer.into_normalized(self.config.epsilon);
        debug!(
            oscillators = request.len(),
            samples = waveform.len(),
            raw_peak,
            "synthesized additive waveform"
        );

        Synthesis {
            audio: AudioClip {
                sample_rate: self.config.sample_rate,
                samples: waveform.iter().map(|&s| s as f32).collect(),
            },
            waveform,
            preview_len: self.config.preview_len,
        }
    }
}
