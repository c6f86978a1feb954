//! Numeric priorities.
//!
//! Every key is stored as an `f64`. Extractors may return any primitive
//! numeric type; the value is widened with `as` at insertion time.
//!
//! Integers wider than the `f64` mantissa (53 bits) lose precision, so two
//! distinct large `u64` priorities can compare equal once stored:
//!
//! ```
//! use nexus_keyed_heap::Priority;
//!
//! let a = (1u64 << 53).into_key();
//! let b = ((1u64 << 53) + 1).into_key();
//! assert_eq!(a, b);
//! ```

/// A numeric value usable as a heap priority.
pub trait Priority: Copy {
    /// Converts the priority to the stored key representation.
    fn into_key(self) -> f64;
}

macro_rules! impl_priority {
    ($($ty:ty),*) => {
        $(
            impl Priority for $ty {
                #[inline]
                fn into_key(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_priority!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);
