//! Lock-free floating-point accumulation.
//!
//! Hardware has no float atomics at every width we need, so the accumulator
//! runs a compare-exchange loop over the equal-width unsigned integer view of
//! the cell: read the current bits, add in float space, and publish the new
//! bits only if nobody raced in between. A failed exchange pauses with the
//! CPU spin hint and retries with the freshly observed value.
//!
//! The loop is unbounded: there is no timeout and no fallback lock, and
//! livelock under pathological contention is an accepted tradeoff. While
//! concurrent writers exist, this protocol is the only legal way to touch the
//! cell; mixing it with plain read-modify-write on the same address is a data
//! race.

use std::sync::atomic::{AtomicU16, AtomicU32, AtomicU64, Ordering};

use half::{bf16, f16};

/// Floating types with an equal-width lock-free unsigned atomic view.
///
/// Implemented for `f32`, `f64`, and the two 16-bit formats from the `half`
/// crate. The width match between the float and its atomic integer is a
/// compile-time invariant, asserted per implementation.
pub trait AtomicFloat: Copy + core::ops::Add<Output = Self> {
    /// Atomically add `delta` to the value stored at `addr`.
    ///
    /// # Safety
    ///
    /// - `addr` must be valid for reads and writes and aligned for `Self`.
    /// - While concurrent writers exist, the cell must only be accessed
    ///   through this protocol; a plain load or store racing with it is
    ///   undefined behavior.
    unsafe fn atomic_add(addr: *mut Self, delta: Self);
}

macro_rules! impl_atomic_float {
    ($float:ty, $atomic:ty) => {
        const _: () = assert!(
            std::mem::size_of::<$atomic>() == std::mem::size_of::<$float>()
                && std::mem::align_of::<$atomic>() == std::mem::align_of::<$float>()
        );

        impl AtomicFloat for $float {
            unsafe fn atomic_add(addr: *mut Self, delta: Self) {
                // SAFETY: caller guarantees validity and alignment; the
                // width/alignment match is asserted above.
                let cell = unsafe { <$atomic>::from_ptr(addr.cast()) };
                let mut expected = cell.load(Ordering::Relaxed);
                loop {
                    let desired = (<$float>::from_bits(expected) + delta).to_bits();
                    match cell.compare_exchange(
                        expected,
                        desired,
                        Ordering::SeqCst,
                        Ordering::Relaxed,
                    ) {
                        Ok(_) => return,
                        Err(observed) => {
                            std::hint::spin_loop();
                            expected = observed;
                        }
                    }
                }
            }
        }
    };
}

impl_atomic_float!(f32, AtomicU32);
impl_atomic_float!(f64, AtomicU64);
impl_atomic_float!(f16, AtomicU16);
impl_atomic_float!(bf16, AtomicU16);

/// Atomically add `delta` to the float stored at `addr`.
///
/// Safe against any number of concurrent callers on the same address; the
/// final value is the exact sum of all deltas applied in some serial order.
/// Never blocks on a lock and never fails.
///
/// # Safety
///
/// See [`AtomicFloat::atomic_add`]: `addr` must be valid and aligned, and
/// concurrently written only through this protocol.
#[inline]
pub unsafe fn atomic_add<T: AtomicFloat>(addr: *mut T, delta: T) {
    // SAFETY: forwarded contract.
    unsafe { T::atomic_add(addr, delta) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_thread_f32() {
        let mut cell = 1.5f32;
        unsafe { atomic_add(&mut cell, 2.25) };
        assert_eq!(cell, 3.75);
        unsafe { atomic_add(&mut cell, -3.75) };
        assert_eq!(cell, 0.0);
    }

    #[test]
    fn test_single_thread_f64() {
        let mut cell = 0.0f64;
        for _ in 0..1000 {
            unsafe { atomic_add(&mut cell, 0.5) };
        }
        assert_eq!(cell, 500.0);
    }

    #[test]
    fn test_single_thread_f16() {
        let mut cell = f16::from_f32(1.0);
        unsafe { atomic_add(&mut cell, f16::from_f32(2.0)) };
        assert_eq!(cell, f16::from_f32(3.0));
    }

    #[test]
    fn test_single_thread_bf16() {
        let mut cell = bf16::from_f32(2.0);
        unsafe { atomic_add(&mut cell, bf16::from_f32(-0.5)) };
        assert_eq!(cell, bf16::from_f32(1.5));
    }

    #[test]
    fn test_matches_plain_addition() {
        let deltas = [0.125f32, -7.5, 3.0, 0.0625, -0.25];
        let mut atomic_cell = 10.0f32;
        let mut plain = 10.0f32;
        for &d in &deltas {
            unsafe { atomic_add(&mut atomic_cell, d) };
            plain += d;
        }
        assert_eq!(atomic_cell.to_bits(), plain.to_bits());
    }
}
