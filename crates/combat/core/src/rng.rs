//! RNG oracle for deterministic random number generation.
//!
//! Randomness enters a match in exactly two places: the starting side (when
//! not supplied) and the attacker/defender selection policy. Effects that
//! pick random targets draw from the same handle. Everything flows through
//! an injected [`RngOracle`], never ambient global state, so a match replays
//! bit-for-bit from its seed.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic: the same seed must produce the
/// same sequence.
pub trait RngOracle {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Generate a value in `0..bound`. Returns 0 when `bound` is 0 or 1.
    fn below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        self.next_u32() % bound
    }

    /// Pick an index into a collection of `len` elements.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.below(len as u32) as usize)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Small, fast and fully
/// deterministic, which is all a rollout needs.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Compute a deterministic per-match seed from a batch seed.
///
/// * `master_seed` - Seed of the whole rollout batch
/// * `match_index` - Index of the match within the batch
/// * `stream` - Extra discriminator when one match needs several streams
pub fn compute_seed(master_seed: u64, match_index: u64, stream: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = master_seed;
    hash ^= match_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
