//! Deterministic pseudo-random series for spectrum construction.
//!
//! Emulates the integer hash used by the reference GPU random intrinsic so
//! that a CPU-built spectrum bit-matches one produced by the rendering path.
//! This is deliberately not a general PRNG: the exact multiply-add mixing
//! sequence is part of the contract. Substituting a standard generator would
//! change the visual and physical spectrum.
//!
//! Each grid cell consumes four values from a series seeded with the cell's
//! signed spectral index; the internal counter distinguishes the draws.

const LCG_MUL: u32 = 1664525;
const LCG_ADD: u32 = 1013904223;

/// Reproducible random series over three integer seeds and a draw counter.
///
/// A series with identical seeds always produces the identical sequence;
/// there is no hidden or global state.
#[derive(Debug, Clone)]
pub struct RandomSeries {
    seed1: i32,
    seed2: i32,
    seed3: i32,
    counter: i32,
}

impl RandomSeries {
    /// Series keyed on a single primary seed (secondary seeds zero).
    pub fn new(seed: i32) -> Self {
        Self::with_seeds(seed, 0, 0)
    }

    /// Series keyed on all three seed words.
    pub fn with_seeds(seed1: i32, seed2: i32, seed3: i32) -> Self {
        Self {
            seed1,
            seed2,
            seed3,
            counter: 0,
        }
    }

    /// Next pseudo-random value in `[0, 1)`.
    ///
    /// Three LCG-style words are derived from the seeds and the incremented
    /// counter, then cross-mixed for two rounds; the top mantissa-width bits
    /// of the first word become the result. All arithmetic wraps, matching
    /// the 32-bit GPU integer semantics.
    #[allow(unused_assignments)]
    pub fn next_value(&mut self) -> f32 {
        self.counter += 1;

        let mut x = (self.seed1 as u32).wrapping_mul(LCG_MUL).wrapping_add(LCG_ADD);
        let mut y = (self.seed2 as u32).wrapping_mul(LCG_MUL).wrapping_add(LCG_ADD);
        let mut z = ((self.counter | (self.seed3 << 16)) as u32)
            .wrapping_mul(LCG_MUL)
            .wrapping_add(LCG_ADD);

        x = x.wrapping_add(y.wrapping_mul(z));
        y = y.wrapping_add(z.wrapping_mul(x));
        z = z.wrapping_add(x.wrapping_mul(y));
        x = x.wrapping_add(y.wrapping_mul(z));
        y = y.wrapping_add(z.wrapping_mul(x));
        z = z.wrapping_add(x.wrapping_mul(y));

        ((x >> 8) & 0x00ff_ffff) as f32 / 16_777_216.0
    }
}
