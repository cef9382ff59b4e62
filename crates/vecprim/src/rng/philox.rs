//! Philox4x32 counter-based PRNG engine.
//!
//! Philox is a counter-based generator from Salmon et al., "Parallel Random
//! Numbers: As Easy as 1, 2, 3" (2011). Output is a pure function of a
//! 128-bit counter and a 64-bit key, which makes it ideal for kernel code:
//! any (seed, offset) pair can be evaluated directly, in any order, from any
//! thread, with identical results.
//!
//! The layout matches the Philox4x32-10 reference construction: the 64-bit
//! seed is split into the two key words, the 64-bit offset into counter words
//! 0-1, and the 64-bit subsequence into counter words 2-3. Ten rounds of the
//! mixing function produce a block of four 32-bit words; the engine hands
//! them out one at a time and bumps the 128-bit counter per block.

/// Round multiplier for counter word 0.
const PHILOX_M4X32_0: u32 = 0xD2511F53;
/// Round multiplier for counter word 2.
const PHILOX_M4X32_1: u32 = 0xCD9E8D57;
/// Key schedule increment for key word 0 (golden ratio).
const PHILOX_W32_0: u32 = 0x9E3779B9;
/// Key schedule increment for key word 1 (sqrt(3) - 1).
const PHILOX_W32_1: u32 = 0xBB67AE85;

/// Round count of the standard Philox4x32-10 variant.
const DEFAULT_ROUNDS: u32 = 10;

/// Largest f32 scale such that `(2^31 - 1) * SCALE < 1.0` under
/// round-to-nearest. Keeps the uniform conversion strictly below 1.0.
const UNIFORM_SCALE: f32 = 4.6566127342e-10;

/// Convert a raw 32-bit word to a uniform f32 in [0, 1).
///
/// Masks off the top bit and scales the remaining 31 bits, so the result can
/// never round up to 1.0.
#[inline]
pub fn uint32_to_uniform_f32(value: u32) -> f32 {
    (value & 0x7FFF_FFFF) as f32 * UNIFORM_SCALE
}

/// Philox4x32 engine state.
///
/// Holds the counter/key pair plus the most recent output block. The state is
/// transient: kernel callers construct a fresh engine per draw site from
/// (seed, offset), and the engine is never shared between threads.
#[derive(Debug, Clone)]
pub struct Philox4x32 {
    /// 128-bit block counter, least-significant word first.
    counter: [u32; 4],
    /// 64-bit key, split from the seed.
    key: [u32; 2],
    /// Current output block.
    output: [u32; 4],
    /// Next lane of `output` to hand out; 4 means no block generated yet.
    lane: usize,
}

impl Philox4x32 {
    /// Create an engine keyed by `seed`, positioned at `offset` within the
    /// sub-stream identified by `subsequence`.
    pub fn new(seed: u64, subsequence: u64, offset: u64) -> Self {
        Self {
            counter: [
                offset as u32,
                (offset >> 32) as u32,
                subsequence as u32,
                (subsequence >> 32) as u32,
            ],
            key: [seed as u32, (seed >> 32) as u32],
            output: [0; 4],
            lane: 4,
        }
    }

    /// Produce the next pseudo-random 32-bit word.
    ///
    /// Generates a fresh 10-round block every four calls and advances the
    /// counter by one block, so word `4k + i` of offset `o` equals word `i`
    /// of offset `o + k`.
    pub fn next_u32(&mut self) -> u32 {
        if self.lane == 4 {
            self.output = philox_block(self.counter, self.key, DEFAULT_ROUNDS);
            self.incr_counter();
            self.lane = 0;
        }
        let word = self.output[self.lane];
        self.lane += 1;
        word
    }

    /// Produce one standard-normal f32 via the Box-Muller transform.
    ///
    /// Consumes the first two words of the current block, generated with
    /// `rounds` rounds of the mixing function; the public entry point passes
    /// 10, the reproducibility constant of the Philox4x32-10 construction.
    /// The uniforms are flipped from [0, 1) to (0, 1] so the logarithm never
    /// sees zero, and the transcendentals run in f64 before the final f32
    /// rounding.
    pub fn randn(&mut self, rounds: u32) -> f32 {
        if self.lane == 4 {
            self.output = philox_block(self.counter, self.key, rounds);
            self.incr_counter();
            self.lane = 0;
        }
        let u1 = 1.0f32 - uint32_to_uniform_f32(self.output[0]);
        let u2 = 1.0f32 - uint32_to_uniform_f32(self.output[1]);
        let radius = (-2.0 * f64::from(u1).ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * f64::from(u2);
        (radius * theta.cos()) as f32
    }

    /// Advance the 128-bit counter by one block.
    fn incr_counter(&mut self) {
        self.counter[0] = self.counter[0].wrapping_add(1);
        if self.counter[0] == 0 {
            self.counter[1] = self.counter[1].wrapping_add(1);
            if self.counter[1] == 0 {
                self.counter[2] = self.counter[2].wrapping_add(1);
                if self.counter[2] == 0 {
                    self.counter[3] = self.counter[3].wrapping_add(1);
                }
            }
        }
    }
}

/// One round of Philox mixing.
#[inline]
fn single_round(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
    let prod0 = u64::from(ctr[0]) * u64::from(PHILOX_M4X32_0);
    let prod1 = u64::from(ctr[2]) * u64::from(PHILOX_M4X32_1);
    let hi0 = (prod0 >> 32) as u32;
    let lo0 = prod0 as u32;
    let hi1 = (prod1 >> 32) as u32;
    let lo1 = prod1 as u32;
    [hi1 ^ ctr[1] ^ key[0], lo1, hi0 ^ ctr[3] ^ key[1], lo0]
}

/// Run `rounds` rounds over a counter/key pair and return the output block.
///
/// The key schedule bumps the key between rounds but not after the last one,
/// matching the reference construction.
fn philox_block(mut counter: [u32; 4], mut key: [u32; 2], rounds: u32) -> [u32; 4] {
    for _ in 1..rounds {
        counter = single_round(counter, key);
        key[0] = key[0].wrapping_add(PHILOX_W32_0);
        key[1] = key[1].wrapping_add(PHILOX_W32_1);
    }
    single_round(counter, key)
}
