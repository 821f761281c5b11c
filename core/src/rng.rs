//! Deterministic random number generation for demo datasets.
//!
//! RULE: demo data never touches a platform RNG. Each record kind draws
//! from its own stream, seeded from (master_seed XOR stream_index), so
//! adding a new record kind never shifts the values of existing ones.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for one record stream.
pub struct DemoRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl DemoRng {
    pub fn new(master_seed: u64, stream: Stream) -> Self {
        let derived_seed = master_seed ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            name: stream.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Roll a float in [low, high).
    pub fn between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Roll an index in [0, n). `n` must be non-zero.
    pub fn index(&mut self, n: usize) -> usize {
        (self.inner.next_u64() % n.max(1) as u64) as usize
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.index(items.len())]
    }
}

/// Stable stream assignments.
/// NEVER reorder or remove entries. Only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Stream {
    Firms = 0,
    Forecasts = 1,
    Entrepreneurs = 2,
}

impl Stream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Firms => "firms",
            Self::Forecasts => "forecasts",
            Self::Entrepreneurs => "entrepreneurs",
        }
    }
}
