//! Builder for [`IndexedMinHeap`].

use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;

use hashbrown::DefaultHashBuilder;

use crate::{IndexedMinHeap, Priority, Slot};

/// Configures capacity, slot type and identity hasher before building a heap.
///
/// The key extractor is passed to [`build`](Self::build), so a heap can never
/// exist without one.
///
/// # Example
///
/// ```
/// use nexus_keyed_heap::HeapBuilder;
///
/// let mut heap = HeapBuilder::new()
///     .capacity(1024)
///     .slot_type::<u16>()
///     .build(|name: &String| name.len());
///
/// heap.add("banana".to_string()).unwrap();
/// heap.add("fig".to_string()).unwrap();
///
/// assert_eq!(heap.capacity_limit(), 65_535);
/// assert_eq!(heap.pop_min().as_deref(), Some("fig"));
/// ```
#[derive(Clone, Debug)]
pub struct HeapBuilder<S = u32, H = DefaultHashBuilder> {
    capacity: usize,
    hash_builder: H,
    _slot: PhantomData<S>,
}

impl Default for HeapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapBuilder {
    /// Creates a builder with `u32` slots, no preallocation and the default
    /// hasher.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            hash_builder: DefaultHashBuilder::default(),
            _slot: PhantomData,
        }
    }
}

impl<S: Slot, H: BuildHasher> HeapBuilder<S, H> {
    /// Preallocates room for `capacity` objects.
    ///
    /// Values above the slot type's limit are clamped at build time.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Selects the slot index type, which sets the capacity ceiling.
    pub fn slot_type<S2: Slot>(self) -> HeapBuilder<S2, H> {
        HeapBuilder {
            capacity: self.capacity,
            hash_builder: self.hash_builder,
            _slot: PhantomData,
        }
    }

    /// Uses `hash_builder` for the identity table.
    pub fn hasher<H2: BuildHasher>(self, hash_builder: H2) -> HeapBuilder<S, H2> {
        HeapBuilder {
            capacity: self.capacity,
            hash_builder,
            _slot: PhantomData,
        }
    }

    /// Builds an empty heap ordered by `extractor`.
    pub fn build<T, P, F>(self, extractor: F) -> IndexedMinHeap<T, S, H>
    where
        T: Hash + Eq,
        P: Priority,
        F: Fn(&T) -> P + 'static,
    {
        IndexedMinHeap::with_capacity_and_hasher(self.capacity, self.hash_builder, extractor)
    }
}
