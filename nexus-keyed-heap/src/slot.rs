//! Slot index types.
//!
//! A slot is a 1-based position in the heap array. Slot 0 is never occupied,
//! which keeps `child = 2 * parent` exact at the root and frees the zero value
//! to act as the "detached" sentinel while two entries trade places.
//!
//! The slot type also bounds how many objects a heap can hold: a heap over
//! `u8` slots tops out at 255 live objects.

/// Trait for integer types used to number heap slots.
///
/// # Example
///
/// ```
/// use nexus_keyed_heap::Slot;
///
/// assert_eq!(<u8 as Slot>::LIMIT, 255);
/// assert!(<u32 as Slot>::NONE.is_none());
/// assert!(u32::from_usize(1).is_some());
/// ```
pub trait Slot: Copy + Eq + core::fmt::Debug {
    /// Sentinel for "no slot". Always zero, since slot 0 is never live.
    const NONE: Self;

    /// Largest live slot this type can number, as a `usize`.
    ///
    /// This is the capacity ceiling of a heap using this slot type.
    const LIMIT: usize;

    /// Creates a slot from a `usize` position.
    fn from_usize(val: usize) -> Self;

    /// Returns the slot as a `usize` position.
    fn as_usize(self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is a real slot.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_slot_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Slot for $ty {
                const NONE: Self = 0;

                const LIMIT: usize = if (<$ty>::MAX as u128) < (usize::MAX as u128) {
                    <$ty>::MAX as usize
                } else {
                    usize::MAX
                };

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val <= Self::LIMIT, "slot {val} out of range");
                    val as Self
                }

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_slot_for_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_slot_sentinel {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty as Slot>::NONE.is_none());
                    assert!(!<$ty as Slot>::NONE.is_some());
                    assert!(<$ty>::from_usize(1).is_some());
                    assert_eq!(<$ty>::from_usize(<$ty as Slot>::LIMIT).as_usize(), <$ty as Slot>::LIMIT);
                }
            )*
        };
    }

    test_slot_sentinel!(
        u8 => u8_sentinel,
        u16 => u16_sentinel,
        u32 => u32_sentinel,
        u64 => u64_sentinel,
        usize => usize_sentinel
    );

    #[test]
    fn limits() {
        assert_eq!(<u8 as Slot>::LIMIT, 255);
        assert_eq!(<u16 as Slot>::LIMIT, 65_535);
        assert_eq!(<u32 as Slot>::LIMIT, u32::MAX as usize);
        assert_eq!(<usize as Slot>::LIMIT, usize::MAX);
    }
}
