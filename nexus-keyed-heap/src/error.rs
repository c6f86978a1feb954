//! Error types for heap operations.

use core::fmt;

/// The heap already holds as many objects as its slot type can number.
///
/// Returned by [`IndexedMinHeap::add`](crate::IndexedMinHeap::add) before any
/// state is touched. Carries the rejected object so the caller can recover it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded<T> {
    /// The object that could not be inserted.
    pub value: T,
    /// Maximum number of live objects for the heap's slot type.
    pub limit: usize,
}

impl<T> CapacityExceeded<T> {
    /// Returns the object that could not be inserted.
    pub fn into_inner(self) -> T {
        self.value
    }
}

// Does not require `T: Debug`.
impl<T> fmt::Debug for CapacityExceeded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityExceeded")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for CapacityExceeded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heap is full: slot limit of {} reached", self.limit)
    }
}

impl<T> std::error::Error for CapacityExceeded<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = CapacityExceeded {
            value: "fig",
            limit: 255,
        };
        assert_eq!(err.to_string(), "heap is full: slot limit of 255 reached");
    }

    #[test]
    fn into_inner_returns_value() {
        let err = CapacityExceeded {
            value: String::from("fig"),
            limit: 1,
        };
        assert_eq!(err.into_inner(), "fig");
    }
}
