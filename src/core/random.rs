//! Injectable random sources for the simulation engine.
//!
//! The engine never reaches for a global generator: every run takes a
//! [`RandomSource`] so callers can substitute a seeded or scripted stream.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use super::error::{RaptorError, Result};

/// Source of continuous uniform draws.
pub trait RandomSource {
    /// Draw uniformly from `[low, high)`.
    fn draw(&mut self, low: f64, high: f64) -> f64;
}

/// Map a unit sample in `[0, 1)` onto `[low, high)`.
#[inline]
fn scale_unit(unit: f64, low: f64, high: f64) -> f64 {
    low + unit * (high - low)
}

impl RandomSource for StdRng {
    #[inline]
    fn draw(&mut self, low: f64, high: f64) -> f64 {
        scale_unit(self.random::<f64>(), low, high)
    }
}

impl RandomSource for ThreadRng {
    #[inline]
    fn draw(&mut self, low: f64, high: f64) -> f64 {
        scale_unit(self.random::<f64>(), low, high)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    #[inline]
    fn draw(&mut self, low: f64, high: f64) -> f64 {
        (**self).draw(low, high)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    #[inline]
    fn draw(&mut self, low: f64, high: f64) -> f64 {
        (**self).draw(low, high)
    }
}

/// Seeded standard generator.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derive an independent seed for one trial from a base seed (SplitMix64).
///
/// Per-trial streams keep seeded runs reproducible no matter how trials are
/// scheduled across threads.
#[inline]
pub fn trial_seed(seed: u64, iteration_index: usize) -> u64 {
    let mut z = seed.wrapping_add((iteration_index as u64).wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Replays a fixed sequence of unit samples, cycling when exhausted.
///
/// Each unit must lie in `[0, 1]` and is mapped onto the requested interval,
/// so `0.5` always lands on the midpoint of a symmetric range and no draw
/// leaves the interval. An empty script behaves as a constant `0.5`.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    units: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// Create a replay source from unit samples.
    ///
    /// Fails with [`RaptorError::InvalidParameter`] if any unit is outside `[0, 1]`
    /// or not finite.
    pub fn new(units: Vec<f64>) -> Result<Self> {
        if let Some(bad) = units.iter().find(|u| !(0.0..=1.0).contains(*u)) {
            return Err(RaptorError::invalid_parameter(format!(
                "replay units must lie in [0, 1], got {bad}"
            )));
        }
        Ok(Self { units, cursor: 0 })
    }

    /// Source that always returns the midpoint (zero for symmetric ranges).
    pub fn midpoint() -> Self {
        Self {
            units: vec![0.5],
            cursor: 0,
        }
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn draw(&mut self, low: f64, high: f64) -> f64 {
        let unit = if self.units.is_empty() {
            0.5
        } else {
            self.units[self.cursor % self.units.len()]
        };
        self.cursor += 1;
        scale_unit(unit, low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_rng_draw_within_bounds() {
        let mut rng = seeded(7);
        for _ in 0..10_000 {
            let x = rng.draw(-0.5, 0.5);
            assert!((-0.5..0.5).contains(&x));
        }
    }

    #[test]
    fn test_degenerate_interval_returns_zero() {
        let mut rng = seeded(7);
        for _ in 0..100 {
            assert_eq!(rng.draw(-0.0, 0.0), 0.0);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = seeded(123);
        let mut b = seeded(123);
        for _ in 0..100 {
            assert_eq!(a.draw(-1.0, 1.0).to_bits(), b.draw(-1.0, 1.0).to_bits());
        }
    }

    #[test]
    fn test_trial_seed_distinct_per_index() {
        let seeds: Vec<u64> = (0..64).map(|i| trial_seed(42, i)).collect();
        for i in 0..seeds.len() {
            for j in (i + 1)..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }
        assert_eq!(trial_seed(42, 3), trial_seed(42, 3));
    }

    #[test]
    fn test_replay_source_cycles() {
        let mut source = ReplaySource::new(vec![0.0, 1.0]).unwrap();
        assert_eq!(source.draw(-2.0, 2.0), -2.0);
        assert_eq!(source.draw(-2.0, 2.0), 2.0);
        assert_eq!(source.draw(-2.0, 2.0), -2.0);
        assert_eq!(source.draws(), 3);
    }

    #[test]
    fn test_replay_source_rejects_out_of_range_units() {
        for bad in [3.0, -0.25, 1.0 + f64::EPSILON, f64::NAN, f64::INFINITY] {
            let err = ReplaySource::new(vec![0.5, bad]).unwrap_err();
            assert!(matches!(err, RaptorError::InvalidParameter { .. }), "accepted {bad}");
        }
        assert!(ReplaySource::new(vec![0.0, 1.0]).is_ok());
        assert!(ReplaySource::new(vec![]).is_ok());
    }

    #[test]
    fn test_thread_rng_draw_within_bounds() {
        let mut rng = rand::rng();
        for _ in 0..1_000 {
            let x = rng.draw(-0.4, 0.4);
            assert!((-0.4..0.4).contains(&x));
        }
    }

    #[test]
    fn test_boxed_source_forwards() {
        let mut boxed: Box<dyn RandomSource> = Box::new(ReplaySource::new(vec![0.0]).unwrap());
        assert_eq!(boxed.draw(-1.0, 1.0), -1.0);

        let mut seeded_box: Box<dyn RandomSource> = Box::new(seeded(5));
        let mut plain = seeded(5);
        assert_eq!(seeded_box.draw(-1.0, 1.0), plain.draw(-1.0, 1.0));
    }

    #[test]
    fn test_midpoint_is_zero_on_symmetric_range() {
        let mut source = ReplaySource::midpoint();
        assert_eq!(source.draw(-0.4, 0.4), 0.0);
        assert_eq!(source.draw(-0.05, 0.05), 0.0);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn pull<R: RandomSource>(mut source: R) -> f64 {
            source.draw(0.0, 3.0)
        }

        let mut source = ReplaySource::new(vec![1.0]).unwrap();
        assert_eq!(pull(&mut source), 3.0);
        assert_eq!(source.draws(), 1);
    }
}
