//! Process-wide synthesis constants.
//!
//! Every field has a serde default so a host can override just the
//! values it cares about (`{"durationSecs": 1.0}`) and keep the rest.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthConfig {
    #[serde(default = "SynthConfig::default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "SynthConfig::default_duration_secs")]
    pub duration_secs: f64,
    /// Oscillator rows offered by the control surface. Not enforced by the core.
    #[serde(default = "SynthConfig::default_max_oscillators")]
    pub max_oscillators: usize,
    /// Number of leading samples handed to the waveform plot.
    #[serde(default = "SynthConfig::default_preview_len")]
    pub preview_len: usize,
    /// Added to the peak before dividing, so silence stays silence.
    #[serde(default = "SynthConfig::default_epsilon")]
    pub epsilon: f64,
    #[serde(default)]
    pub phase_mode: PhaseMode,
    #[serde(default)]
    pub controls: ControlRanges,
}

impl SynthConfig {
    fn default_sample_rate() -> u32 {
        44_100
    }
    fn default_duration_secs() -> f64 {
        2.0
    }
    fn default_max_oscillators() -> usize {
        10
    }
    fn default_preview_len() -> usize {
        1_000
    }
    fn default_epsilon() -> f64 {
        1e-8
    }

    /// Parse a JSON config, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        let config: SynthConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(SynthError::Config("sampleRate must be positive".into()));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(SynthError::Config(format!(
                "durationSecs must be positive, got {}",
                self.duration_secs
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SynthError::Config(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Length of every synthesized buffer: `round(sample_rate × duration)`.
    pub fn sample_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs).round() as usize
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: Self::default_sample_rate(),
            duration_secs: Self::default_duration_secs(),
            max_oscillators: Self::default_max_oscillators(),
            preview_len: Self::default_preview_len(),
            epsilon: Self::default_epsilon(),
            phase_mode: PhaseMode::default(),
            controls: ControlRanges::default(),
        }
    }
}

/// Which shapes honour the oscillator's phase offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseMode {
    /// Phase shifts every shape, saw included.
    Uniform,
    /// Saw ignores phase, matching the first release of the demo.
    Legacy,
}

impl Default for PhaseMode {
    fn default() -> Self {
        Self::Uniform
    }
}

/// Slider ranges for the browser control surface.
///
/// The core does not clamp to these; they are published so the UI and
/// the synthesizer agree on one set of constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRanges {
    pub frequency_hz: (f64, f64),
    pub amplitude: (f64, f64),
    pub phase_degrees: (f64, f64),
    pub default_count: usize,
}

impl Default for ControlRanges {
    fn default() -> Self {
        Self {
            frequency_hz: (20.0, 2000.0),
            amplitude: (0.0, 1.0),
            phase_degrees: (0.0, 360.0),
            default_count: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_constants() {
        let c = SynthConfig::default();
        assert_eq!(c.sample_rate, 44_100);
        assert_eq!(c.duration_secs, 2.0);
        assert_eq!(c.max_oscillators, 10);
        assert_eq!(c.preview_len, 1_000);
        assert_eq!(c.sample_count(), 88_200);
        assert_eq!(c.phase_mode, PhaseMode::Uniform);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let c = SynthConfig::from_json(r#"{"durationSecs": 0.5, "phaseMode": "legacy"}"#)
            .expect("valid config");
        assert_eq!(c.sample_count(), 22_050);
        assert_eq!(c.phase_mode, PhaseMode::Legacy);
        assert_eq!(c.max_oscillators, 10);
        assert_eq!(c.controls, ControlRanges::default());
    }

    #[test]
    fn sample_count_rounds() {
        let c = SynthConfig {
            sample_rate: 3,
            duration_secs: 0.5,
            ..SynthConfig::default()
        };
        assert_eq!(c.sample_count(), 2);
    }

    #[test]
    fn rejects_zero_duration() {
        let err = SynthConfig::from_json(r#"{"durationSecs": 0.0}"#).unwrap_err();
        assert!(matches!(err, SynthError::Config(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(SynthConfig::from_json("{sampleRate: }").is_err());
    }
}
