//! Mixer — sums weighted partials and peak-normalizes the result.

/// A summing accumulator of fixed length.
#[derive(Debug, Clone)]
pub struct Mixer {
    buffer: Vec<f64>,
}

impl Mixer {
    /// A buffer of `num_samples` zeros.
    pub fn new(num_samples: usize) -> Self {
        Mixer {
            buffer: vec![0.0; num_samples],
        }
    }

    /// Add `gain × source[i]` into every slot. Extra source samples are ignored.
    pub fn add_scaled<I>(&mut self, gain: f64, source: I)
    where
        I: IntoIterator<Item = f64>,
    {
        for (slot, s) in self.buffer.iter_mut().zip(source) {
            *slot += gain * s;
        }
    }

    /// Largest absolute sample of the raw sum.
    pub fn peak(&self) -> f64 {
        peak(&self.buffer)
    }

    /// Consume the mixer, dividing every sample by `peak + epsilon`.
    pub fn into_normalized(self, epsilon: f64) -> Vec<f64> {
        let divisor = self.peak() + epsilon;
        self.buffer.into_iter().map(|s| s / divisor).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Largest absolute value, 0 for an empty slice.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let m = Mixer::new(128);
        let out = m.into_normalized(1e-8);
        assert_eq!(out.len(), 128);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn accumulates_scaled_sources() {
        let mut m = Mixer::new(3);
        m.add_scaled(0.5, [1.0, 2.0, -1.0]);
        m.add_scaled(2.0, [0.25, 0.0, 0.0]);
        assert!((m.peak() - 1.0).abs() < 1e-12);
        let out = m.into_normalized(0.0);
        assert_eq!(out, vec![1.0, 1.0, -0.5]);
    }

    #[test]
    fn short_source_leaves_tail_untouched() {
        let mut m = Mixer::new(4);
        m.add_scaled(1.0, [0.5]);
        assert_eq!(m.len(), 4);
        let out = m.into_normalized(0.0);
        assert_eq!(out, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn normalization_uses_one_global_factor() {
        let mut m = Mixer::new(2);
        m.add_scaled(1.0, [4.0, -2.0]);
        let out = m.into_normalized(1e-8);
        let ratio = out[0] / out[1];
        assert!((ratio + 2.0).abs() < 1e-12);
        assert!(out.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn peak_of_empty_slice_is_zero() {
        assert_eq!(peak(&[]), 0.0);
        assert!(Mixer::new(0).is_empty());
    }
}
