//! Remainder dispatch shared by integer and floating kernels.
//!
//! Generated kernel code emits one `generic_mod(a, b)` call regardless of the
//! operand type. Integers use the truncating `%`; floats use Rust's `%`,
//! which is the IEEE remainder with the sign of the dividend and magnitude in
//! [0, |b|). Division by zero keeps each type's native semantics (integer
//! panic, float NaN).

/// Types with a remainder operation usable from generated kernels.
pub trait Modulo: Copy {
    /// Remainder of `self / rhs`, truncating for integers, fmod for floats.
    fn modulo(self, rhs: Self) -> Self;
}

macro_rules! impl_modulo {
    ($($ty:ty),*) => {
        $(
            impl Modulo for $ty {
                #[inline]
                fn modulo(self, rhs: Self) -> Self {
                    self % rhs
                }
            }
        )*
    };
}

impl_modulo!(i8, i16, i32, i64, i128, isize);
impl_modulo!(u8, u16, u32, u64, u128, usize);
impl_modulo!(f32, f64);

/// Remainder of `a / b` with per-type semantics. See [`Modulo`].
#[inline]
pub fn generic_mod<T: Modulo>(a: T, b: T) -> T {
    a.modulo(b)
}
