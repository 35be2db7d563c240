//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through ActivityRng instances derived
//! from the single master seed supplied with each run.
//!
//! Each stream is seeded from (master_seed, slot, account_id). This means:
//!   - Appending an account never changes existing accounts' calendars.
//!   - Each account's calendar is reproducible in isolation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::types::{AccountId, Seed};

const SLOT_MIX: u64 = 0x9e37_79b9_7f4a_7c15;
const ACCOUNT_MIX: u64 = 0xbf58_476d_1ce4_e5b9;

/// A named, deterministic RNG for one stream.
pub struct ActivityRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl ActivityRng {
    /// Create a stream directly from a seed. Mostly useful in tests.
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
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
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Roll a u32 in [lo, hi]. Collapses to `lo` when the range is empty
    /// or inverted, without consuming randomness.
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Index into `weights`, chosen proportionally to each weight.
    /// Returns None when every weight is zero.
    pub fn pick_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }
        let roll = self.next_u64_below(total);
        let mut cumulative = 0u64;
        for (idx, &w) in weights.iter().enumerate() {
            cumulative += u64::from(w);
            if roll < cumulative {
                return Some(idx);
            }
        }
        None
    }
}

/// All streams for a single run, derived from one master seed.
pub struct RngBank {
    master_seed: Seed,
}

impl RngBank {
    pub fn new(master_seed: Seed) -> Self {
        Self { master_seed }
    }

    /// A stream shared by everything in `slot` (e.g. demo handles).
    pub fn for_slot(&self, slot: StreamSlot) -> ActivityRng {
        let derived = self.master_seed ^ (slot as u64).wrapping_mul(SLOT_MIX);
        ActivityRng::from_seed(derived).with_name(slot.name())
    }

    /// A stream private to one account within `slot`.
    pub fn for_account(&self, slot: StreamSlot, account_id: AccountId) -> ActivityRng {
        let derived = self.master_seed
            ^ (slot as u64).wrapping_mul(SLOT_MIX)
            ^ account_id.wrapping_add(1).wrapping_mul(ACCOUNT_MIX);
        ActivityRng::from_seed(derived).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Registry = 0,
    Calendar = 1,
    Expander = 2,
    Handles = 3,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Calendar => "calendar",
            Self::Expander => "expander",
            Self::Handles => "handles",
        }
    }
}
