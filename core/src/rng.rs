//! Deterministic random number generation for sample data.
//!
//! RULE: Sample generation never calls a platform RNG.
//! Every stream is derived from one master seed and a stable slot,
//! seeded from (master_seed XOR slot_index * golden ratio). This means:
//!   - Adding a new slot never changes existing slots' streams.
//!   - The roster can be regenerated without touching the ledger stream.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for one generation slot.
pub struct SampleRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SampleRng {
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }

    /// Index drawn according to `weights` (need not sum to 1).
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut roll = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                return i;
            }
            roll -= w;
        }
        weights.len().saturating_sub(1)
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries, only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SampleSlot {
    Roster = 0,
    Ledger = 1,
}

impl SampleSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::Ledger => "ledger",
        }
    }

    pub fn rng(&self, master_seed: u64) -> SampleRng {
        SampleRng::new(master_seed, *self as u64).with_name(self.name())
    }
}
