//! Oscillator records and the per-shape partial functions.
//!
//! Partials are evaluated directly from time, not from a running phase
//! accumulator, so every sample is independent of the ones before it.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::PhaseMode;

/// Supported waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Waveform {
    Sine,
    Square,
    Saw,
}

/// Error for a shape name outside `{Sine, Square, Saw}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWaveform(pub String);

impl fmt::Display for UnknownWaveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown waveform '{}'", self.0)
    }
}

impl std::error::Error for UnknownWaveform {}

impl FromStr for Waveform {
    type Err = UnknownWaveform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "saw" | "sawtooth" => Ok(Waveform::Saw),
            _ => Err(UnknownWaveform(s.to_string())),
        }
    }
}

impl TryFrom<String> for Waveform {
    type Error = UnknownWaveform;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Waveform> for String {
    fn from(w: Waveform) -> Self {
        w.as_str().to_string()
    }
}

impl Waveform {
    /// Display name, as shown in the UI's waveform dropdown.
    pub fn as_str(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Saw => "Saw",
        }
    }
}

/// One periodic generator of the additive mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Oscillator {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Linear gain applied to the partial before summing.
    pub amplitude: f64,
    /// Phase offset in degrees.
    #[serde(default)]
    pub phase_degrees: f64,
    pub shape: Waveform,
}

impl Default for Oscillator {
    fn default() -> Self {
        Oscillator {
            frequency: 440.0,
            amplitude: 0.5,
            phase_degrees: 0.0,
            shape: Waveform::Sine,
        }
    }
}

impl Oscillator {
    pub fn new(shape: Waveform, frequency: f64, amplitude: f64, phase_degrees: f64) -> Self {
        Oscillator {
            frequency,
            amplitude,
            phase_degrees,
            shape,
        }
    }

    pub fn phase_radians(&self) -> f64 {
        self.phase_degrees * PI / 180.0
    }

    /// The raw partial at time `t` seconds, before amplitude scaling.
    pub fn partial(&self, t: f64, mode: PhaseMode) -> f64 {
        match self.shape {
            Waveform::Sine => sine(self.frequency, t, self.phase_radians()),
            Waveform::Square => square(self.frequency, t, self.phase_radians()),
            Waveform::Saw => {
                let offset = match mode {
                    PhaseMode::Uniform => self.phase_degrees / 360.0,
                    PhaseMode::Legacy => 0.0,
                };
                saw(self.frequency, t, offset)
            }
        }
    }
}

fn sine(frequency: f64, t: f64, phase: f64) -> f64 {
    (2.0 * PI * frequency * t + phase).sin()
}

/// Sign of the sine: exactly -1, 0 or +1 (unlike `f64::signum`, 0 at a zero).
fn square(frequency: f64, t: f64, phase: f64) -> f64 {
    let s = sine(frequency, t, phase);
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Naive sawtooth rising from -1 to +1 once per period.
/// `cycles` is a phase offset in whole periods.
fn saw(frequency: f64, t: f64, cycles: f64) -> f64 {
    let x = frequency * t + cycles;
    2.0 * (x - (0.5 + x).floor())
}
