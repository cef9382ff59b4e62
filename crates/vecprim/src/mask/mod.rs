//! Boolean-to-float mask materialization.
//!
//! Vectorized kernels consume branch conditions as per-lane select masks: a
//! 32-bit word that is all ones for a taken lane and all zeros otherwise,
//! stored in a float-typed buffer. The words are written as bit patterns
//! through an integer view of the destination, never as the numeric values
//! 1.0/0.0, because blend instructions interpret the raw lane bits.
//!
//! Inputs are trusted: the caller guarantees every flag encodes TRUE or
//! FALSE. A byte other than 0/1 is only subjected to a truthiness test.

#[cfg(target_arch = "x86_64")]
pub mod x86;

/// All-ones mask word selecting a lane.
const MASK_SET: u32 = 0xFFFF_FFFF;

/// Flag encodings accepted by the mask materializer.
pub trait MaskFlag: Copy {
    /// Truthiness of the flag in the caller's encoding.
    fn is_set(self) -> bool;
}

impl MaskFlag for bool {
    #[inline]
    fn is_set(self) -> bool {
        self
    }
}

impl MaskFlag for u8 {
    #[inline]
    fn is_set(self) -> bool {
        self != 0
    }
}

/// Materialize one mask word per flag into the float destination.
///
/// Writes 0xFFFFFFFF for a set flag and 0x00000000 otherwise, as raw bit
/// patterns.
///
/// # Panics
///
/// Panics if `flags` and `dst` have different lengths.
pub fn flags_to_float_mask<T: MaskFlag>(flags: &[T], dst: &mut [f32]) {
    assert_eq!(flags.len(), dst.len(), "flag and destination lengths differ");
    let words: &mut [u32] = bytemuck::cast_slice_mut(dst);
    for (flag, word) in flags.iter().zip(words.iter_mut()) {
        *word = if flag.is_set() { MASK_SET } else { 0 };
    }
}

/// Broadcast a single flag into every word of the float destination.
pub fn flag_to_float_mask<T: MaskFlag>(flag: T, dst: &mut [f32]) {
    let word = if flag.is_set() { MASK_SET } else { 0 };
    bytemuck::cast_slice_mut::<f32, u32>(dst).fill(word);
}

/// Per-lane mask materialization over a fixed-width lane array.
///
/// The always-available generic form of the vector path; hardware-specific
/// fast paths live in the capability-gated submodules and must agree with
/// this on lane selection.
pub fn lanes_to_float_mask<T: MaskFlag, const N: usize>(src: [T; N]) -> [f32; N] {
    let mut dst = [0.0f32; N];
    for (lane, flag) in dst.iter_mut().zip(src) {
        *lane = f32::from_bits(if flag.is_set() { MASK_SET } else { 0 });
    }
    dst
}

/// Mask materialization for an 8-lane i32 source, with an AVX2 fast path.
///
/// Narrow, caller-constrained optimization: every source lane must already
/// be 0 or -1 (all ones). The fast path is a single integer-to-float convert,
/// which maps -1 to -1.0f32 rather than to the 0xFFFFFFFF pattern; that is
/// still a usable mask because blend instructions select on the lane's sign
/// bit, and the scalar fallback mirrors the same numeric conversion so every
/// target produces identical bits. For general truthy flags use
/// [`lanes_to_float_mask`].
pub fn i32_lanes_to_float_mask(src: [i32; 8]) -> [f32; 8] {
    #[cfg(target_arch = "x86_64")]
    if is_x86_feature_detected!("avx2") {
        // SAFETY: AVX2 support verified at runtime.
        return unsafe { x86::i32_lanes_to_float_mask_avx2(src) };
    }
    let mut dst = [0.0f32; 8];
    for (lane, value) in dst.iter_mut().zip(src) {
        *lane = value as f32;
    }
    dst
}
