//! Pseudo-random test tapes.

use crate::tape::Tape;

/// 64-bit LCG (Knuth's MMIX constants). Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// The low bits of an LCG are weak, so bytes come from the top.
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }
}

/// A tape of `len` random rows.
pub fn random_tape(len: usize, seed: u64) -> Tape {
    let mut rng = Lcg::new(seed);
    Tape::from_bytes((0..len).map(|_| rng.next_u8()).collect())
}
