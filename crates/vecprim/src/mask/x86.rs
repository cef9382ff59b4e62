//! AVX2 fast path for mask materialization.
//!
//! Replaces the scalar store/convert/reload round trip with a single
//! `vcvtdq2ps`. Only valid for the constrained {0, -1} lane domain described
//! on [`super::i32_lanes_to_float_mask`]; callers reach these functions
//! through that runtime-dispatched wrapper or their own feature detection.

use core::arch::x86_64::{
    __m256, __m256i, _mm256_cvtepi32_ps, _mm256_loadu_si256, _mm256_storeu_ps,
};

/// Convert an 8-lane i32 mask register to a float mask register.
///
/// # Safety
///
/// The caller must ensure the CPU supports AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn i32x8_to_float_mask(src: __m256i) -> __m256 {
    // SAFETY: AVX2 is guaranteed by the caller.
    unsafe { _mm256_cvtepi32_ps(src) }
}

/// Array form of [`i32x8_to_float_mask`].
///
/// # Safety
///
/// The caller must ensure the CPU supports AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn i32_lanes_to_float_mask_avx2(src: [i32; 8]) -> [f32; 8] {
    // SAFETY: AVX2 is guaranteed by the caller; unaligned load/store
    // intrinsics take arbitrary 8-lane buffers.
    unsafe {
        let v = _mm256_loadu_si256(src.as_ptr().cast::<__m256i>());
        let mask = i32x8_to_float_mask(v);
        let mut dst = [0.0f32; 8];
        _mm256_storeu_ps(dst.as_mut_ptr(), mask);
        dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avx2_matches_fallback_conversion() {
        if !is_x86_feature_detected!("avx2") {
            return;
        }
        let lanes = [0i32, -1, 0, -1, -1, -1, 0, 0];
        // SAFETY: detection above.
        let fast = unsafe { i32_lanes_to_float_mask_avx2(lanes) };
        for (f, &v) in fast.iter().zip(lanes.iter()) {
            assert_eq!(f.to_bits(), (v as f32).to_bits());
        }
    }
}
