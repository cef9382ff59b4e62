//! Counter-based random number generation.
//!
//! The generator here is addressed, not sequential: every draw is identified
//! by an explicit (seed, offset) pair and computed directly from it, like a
//! block cipher. Parallel workers get independent, reproducible sub-streams
//! by carving up the offset space; there is no shared generator state and no
//! locking.

mod philox;

pub use philox::{uint32_to_uniform_f32, Philox4x32};

/// Uniform random f32 in [0, 1) for the given (seed, offset) pair.
///
/// Bit-exact and reproducible: the same pair always yields the same value,
/// on every platform and from any thread. Callers own offset allocation;
/// draws that must be independent need distinct offsets.
pub fn normalized_random(seed: u64, offset: u64) -> f32 {
    let mut engine = Philox4x32::new(seed, 0, offset);
    uint32_to_uniform_f32(engine.next_u32())
}

/// Standard-normal random f32 for the given (seed, offset) pair.
///
/// Box-Muller over the first two words of the 10-round Philox block at
/// `offset`. Same determinism contract as [`normalized_random`].
pub fn standard_normal_random(seed: u64, offset: u64) -> f32 {
    let mut engine = Philox4x32::new(seed, 0, offset);
    engine.randn(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_random_deterministic() {
        for seed in [0u64, 1, 42, u64::MAX] {
            for offset in [0u64, 1, 999, u64::MAX] {
                let a = normalized_random(seed, offset);
                let b = normalized_random(seed, offset);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_standard_normal_deterministic() {
        for seed in [0u64, 42, u64::MAX] {
            for offset in [0u64, 7, u64::MAX] {
                let a = standard_normal_random(seed, offset);
                let b = standard_normal_random(seed, offset);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_normalized_random_range() {
        for offset in 0..10_000u64 {
            let u = normalized_random(1234, offset);
            assert!(
                (0.0..1.0).contains(&u),
                "uniform out of range at offset {}: {}",
                offset,
                u
            );
        }
    }

    #[test]
    fn test_normalized_random_known_values() {
        // Engine output matches the Philox4x32-10 construction bit-for-bit.
        assert_eq!(normalized_random(0, 0).to_bits(), 0x3f4c_4fd1);
        assert_eq!(normalized_random(42, 7).to_bits(), 0x3f37_7b06);
        assert_eq!(normalized_random(0x1234_5678_9abc_def0, 999).to_bits(), 0x3ebb_fc65);
    }

    #[test]
    fn test_standard_normal_known_values() {
        // Transcendentals may differ by an ulp across libm builds, so pin the
        // normal draws approximately rather than bit-for-bit.
        let cases = [
            (0u64, 0u64, 0.123_988_51_f32),
            (42, 0, 0.660_613_1),
            (0x1234_5678_9abc_def0, 999, -0.588_317_16),
        ];
        for (seed, offset, expected) in cases {
            let z = standard_normal_random(seed, offset);
            assert!(
                (z - expected).abs() < 1e-6,
                "randn({}, {}) = {}, expected {}",
                seed,
                offset,
                z,
                expected
            );
        }
    }

    #[test]
    fn test_distinct_offsets_distinct_draws() {
        let mut same = 0usize;
        for offset in 0..1000u64 {
            if normalized_random(9, offset).to_bits() == normalized_random(9, offset + 1).to_bits()
            {
                same += 1;
            }
        }
        // Collisions of full 32-bit patterns should be essentially absent.
        assert_eq!(same, 0);
    }
}
