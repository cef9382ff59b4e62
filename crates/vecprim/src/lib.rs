//! Low-level numeric primitives for vectorized compute kernels.
//!
//! This crate provides the bit-level building blocks that generated kernel
//! code calls directly:
//!
//! - **Counter-based RNG**: a Philox4x32-10 engine addressed by an explicit
//!   (seed, offset) pair, so parallel workers can draw reproducible,
//!   order-independent random values with no shared generator state
//! - **Atomic float accumulation**: lock-free scatter-add on f16/bf16/f32/f64
//!   cells via a compare-exchange loop on the equal-width integer view
//! - **Mask materialization**: bool/byte flags to 32-bit all-ones/all-zeros
//!   SIMD select masks, with an AVX2 fast path
//! - **Modulo dispatch**: one remainder call signature for integer and
//!   floating operands
//!
//! Every function is synchronous and reentrant. Nothing here allocates,
//! blocks, or fails at runtime; misuse is ruled out at compile time or
//! documented as a caller precondition.
//!
//! # Example
//!
//! ```
//! use vecprim::prelude::*;
//!
//! // Same (seed, offset) always yields the same draw.
//! let u = normalized_random(42, 7);
//! assert_eq!(u, normalized_random(42, 7));
//! assert!((0.0..1.0).contains(&u));
//!
//! let mut mask = [0.0f32; 4];
//! flag_to_float_mask(true, &mut mask);
//! assert_eq!(mask[0].to_bits(), 0xFFFF_FFFF);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod atomic;
pub mod mask;
pub mod modulo;
pub mod rng;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::atomic::{atomic_add, AtomicFloat};
    pub use crate::mask::{
        flag_to_float_mask, flags_to_float_mask, i32_lanes_to_float_mask, lanes_to_float_mask,
        MaskFlag,
    };
    pub use crate::modulo::{generic_mod, Modulo};
    pub use crate::rng::{normalized_random, standard_normal_random, Philox4x32};
}

// Re-exports
pub use atomic::{atomic_add, AtomicFloat};
pub use mask::{
    flag_to_float_mask, flags_to_float_mask, i32_lanes_to_float_mask, lanes_to_float_mask, MaskFlag,
};
pub use modulo::{generic_mod, Modulo};
pub use rng::{normalized_random, standard_normal_random, Philox4x32};
