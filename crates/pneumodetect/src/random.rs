//! Injectable random source for the simulators.
//!
//! Every random draw the simulators make goes through [`RandomSource`], so
//! tests can swap the production generator for a scripted sequence.

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random draws.
pub trait RandomSource: Send + fmt::Debug {
    /// Draw an integer uniformly from `[0, bound)`.
    ///
    /// A `bound` of zero is treated as one.
    fn below(&mut self, bound: u32) -> u32;

    /// Draw a float uniformly from `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Boxed random source shared between a simulator and its timer task.
pub type BoxedRandom = Box<dyn RandomSource>;

/// Production random source backed by [`StdRng`].
#[derive(Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible generator from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for StdRandom {
    fn below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound.max(1))
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// A deterministic random source that replays queued draws.
///
/// Integer and float draws are kept in separate queues. Integer draws are
/// reduced modulo the requested bound and float draws are clamped into
/// `[0, 1)`, so a script can never push a simulator out of its ranges.
/// Once a queue runs dry it keeps returning zero.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    ints: VecDeque<u32>,
    units: VecDeque<f64>,
}

impl ScriptedRandom {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue integer draws.
    #[must_use]
    pub fn with_ints(mut self, ints: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(ints);
        self
    }

    /// Queue float draws.
    #[must_use]
    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, bound: u32) -> u32 {
        self.ints.pop_front().unwrap_or(0) % bound.max(1)
    }

    fn unit(&mut self) -> f64 {
        let value = self.units.pop_front().unwrap_or(0.0);
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_random_below_in_range() {
        let mut rng = StdRandom::seeded(1);
        for _ in 0..1000 {
            assert!(rng.below(12) < 12);
        }
    }

    #[test]
    fn test_std_random_unit_in_range() {
        let mut rng = StdRandom::seeded(2);
        for _ in 0..1000 {
            let value = rng.unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_zero_bound_draws_zero() {
        let mut std_rng = StdRandom::seeded(3);
        let mut scripted = ScriptedRandom::new().with_ints([5]);
        assert_eq!(std_rng.below(0), 0);
        assert_eq!(scripted.below(0), 0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        let draws_a: Vec<u32> = (0..20).map(|_| a.below(100)).collect();
        let draws_b: Vec<u32> = (0..20).map(|_| b.below(100)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_from_seed_option() {
        let mut seeded = StdRandom::from_seed_option(Some(9));
        let mut reference = StdRandom::seeded(9);
        assert_eq!(seeded.below(1000), reference.below(1000));

        let mut entropy = StdRandom::from_seed_option(None);
        assert!(entropy.below(3) < 3);
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut rng = ScriptedRandom::new().with_ints([2, 0, 1]).with_units([0.25]);
        assert_eq!(rng.below(3), 2);
        assert_eq!(rng.below(3), 0);
        assert!((rng.unit() - 0.25).abs() < f64::EPSILON);
        assert_eq!(rng.below(3), 1);
    }

    #[test]
    fn test_scripted_wraps_out_of_range_ints() {
        let mut rng = ScriptedRandom::new().with_ints([7]);
        assert_eq!(rng.below(3), 1);
    }

    #[test]
    fn test_scripted_clamps_units() {
        let mut rng = ScriptedRandom::new().with_units([1.5, -0.5, f64::NAN]);
        assert!(rng.unit() < 1.0);
        assert!(rng.unit().abs() < f64::EPSILON);
        assert!(rng.unit().abs() < f64::EPSILON);
    }

    #[test]
    fn test_scripted_exhausted_returns_zero() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(rng.below(12), 0);
        assert!(rng.unit().abs() < f64::EPSILON);
    }
}
