use std::fmt;

/// Everything that can stop a synthesis request from being built.
///
/// Synthesis itself cannot fail once a `SynthesisRequest` exists.
#[derive(Debug)]
pub enum SynthError {
    Empty,
    LengthMismatch {
        expected: usize,
        frequencies: usize,
        amplitudes: usize,
        phases: usize,
        shapes: usize,
    },
    UnknownShape {
        index: usize,
        shape: String,
    },
    InvalidFrequency {
        index: usize,
        value: f64,
    },
    NonFinite {
        index: usize,
        field: &'static str,
    },
    /// Summed amplitude magnitudes exceed the `f64` range.
    AmplitudeOverflow,
    Config(String),
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::Empty => write!(f, "oscillator lists must be non-empty"),
            SynthError::LengthMismatch {
                expected,
                frequencies,
                amplitudes,
                phases,
                shapes,
            } => write!(
                f,
                "oscillator lists must hold at least {expected} entries each \
                 (frequencies {frequencies}, amplitudes {amplitudes}, phases {phases}, shapes {shapes})"
            ),
            SynthError::UnknownShape { index, shape } => {
                write!(f, "Unknown waveform '{shape}' for oscillator {index}")
            }
            SynthError::InvalidFrequency { index, value } => {
                write!(f, "Oscillator {index} frequency must be positive, got {value}")
            }
            SynthError::NonFinite { index, field } => {
                write!(f, "Oscillator {index} has a non-finite {field}")
            }
            SynthError::AmplitudeOverflow => {
                write!(f, "Summed oscillator amplitudes overflow the sample range")
            }
            SynthError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SynthError {}

impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        SynthError::Config(e.to_string())
    }
}
