//! Random source abstraction
//!
//! The engine only needs uniform values in `[0, 1)`. Any `rand` generator
//! works through the blanket impl; `FixedSource` replays a known sequence.

use rand::{Rng, RngCore};

/// Uniform random values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed sequence of unit values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSource {
    /// Values are clamped into `[0, 1)`; an empty sequence yields `0.0`
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fixed_source_cycles() {
        let mut source = FixedSource::new(vec![0.1, 0.2]);
        assert_eq!(source.next_unit(), 0.1);
        assert_eq!(source.next_unit(), 0.2);
        assert_eq!(source.next_unit(), 0.1);
        assert_eq!(source.consumed(), 3);
    }

    #[test]
    fn test_fixed_source_clamps() {
        let mut source = FixedSource::new(vec![-1.0, 2.0]);
        assert_eq!(source.next_unit(), 0.0);
        assert!(source.next_unit() < 1.0);
    }

    #[test]
    fn test_empty_fixed_source() {
        let mut source = FixedSource::new(Vec::new());
        assert_eq!(source.next_unit(), 0.0);
    }

    #[test]
    fn test_rng_blanket_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
