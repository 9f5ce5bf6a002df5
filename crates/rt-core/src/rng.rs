//! Deterministic per-resource-agent and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each resource agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (hash(ra_name) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads distinct name hashes uniformly across the seed space. This
//! means RAs never share RNG state and a run is bit-for-bit reproducible
//! given the same `run_seed` and RA name set, regardless of the order RAs
//! are created in.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::AgentName;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

fn hash_name(name: &AgentName) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.0.hash(&mut hasher);
    hasher.finish()
}

// ── DurationRng ───────────────────────────────────────────────────────────────

/// Per-resource-agent deterministic RNG, used to realize a task's duration
/// from a `(mean, stddev)` spec (spec.md §3, §4.5).
pub struct DurationRng(SmallRng);

impl DurationRng {
    /// Seed deterministically from the run's seed and the owning RA's name.
    pub fn new(run_seed: u64, ra_name: &AgentName) -> Self {
        let seed = run_seed ^ hash_name(ra_name).wrapping_mul(MIXING_CONSTANT);
        DurationRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw one sample from `Normal(mean, stddev)`. `stddev` of `0.0` is
    /// rejected by `Normal::new`, so callers only invoke this for `σ > 0`
    /// specs — fixed durations never touch the RNG at all.
    pub fn sample_normal(&mut self, mean: f64, stddev: f64) -> f64 {
        let dist = Normal::new(mean, stddev)
            .expect("stddev must be finite and non-negative — validated at parse time");
        dist.sample(&mut self.0)
    }
}

// ── RunRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for global, non-per-agent randomness — currently just the
/// `random` resource pool selection strategy (spec.md §4.3).
pub struct RunRng(SmallRng);

impl RunRng {
    pub fn new(seed: u64) -> Self {
        RunRng(SmallRng::seed_from_u64(seed))
    }

    /// Pick a uniformly random index in `0..len`. Returns `None` if `len == 0`.
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        use rand::Rng;
        Some(self.0.gen_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_rng_is_deterministic() {
        let name = AgentName::from("packer_ra_1");
        let mut a = DurationRng::new(7, &name);
        let mut b = DurationRng::new(7, &name);
        let sa: Vec<f64> = (0..5).map(|_| a.sample_normal(2.0, 0.5)).collect();
        let sb: Vec<f64> = (0..5).map(|_| b.sample_normal(2.0, 0.5)).collect();
        assert_eq!(sa, sb);
    }

    #[test]
    fn distinct_names_diverge() {
        let mut a = DurationRng::new(7, &AgentName::from("ra_1"));
        let mut b = DurationRng::new(7, &AgentName::from("ra_2"));
        assert_ne!(a.sample_normal(2.0, 0.5), b.sample_normal(2.0, 0.5));
    }

    #[test]
    fn run_rng_picks_in_range() {
        let mut rng = RunRng::new(1);
        assert_eq!(rng.gen_index(0), None);
        for _ in 0..50 {
            let i = rng.gen_index(3).unwrap();
            assert!(i < 3);
        }
    }
}
