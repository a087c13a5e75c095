//! Bridges `rand` generators into the engine's RNG seam.
use combat_core::RngOracle;
use rand::RngCore;

/// Wraps any [`rand::RngCore`] so it can drive a match.
#[derive(Clone, Debug)]
pub struct RandAdapter<R>(R);

impl<R: RngCore> RandAdapter<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: RngCore> RngOracle for RandAdapter<R> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}
