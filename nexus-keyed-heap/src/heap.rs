//! Min-heap keyed by object identity with O(log n) removal by value.
//!
//! The heap is three structures kept in lock-step:
//!
//! ```text
//! keys:    [k1, k2, k3, ...]      dense f64 heap array, slot s at offset s-1
//! objects: [o1, o2, o3, ...]      slot -> object, owns the objects
//! hashes:  [h1, h2, h3, ...]      identity hash of each object
//! slots:   HashTable<Slot>        object -> slot, stores slot numbers only
//! ```
//!
//! The identity table never holds a copy of an object. A lookup hashes the
//! probe value and compares it against `objects[slot]`, so `T` only needs
//! `Hash + Eq`. Each object is hashed once, on `add`; sifts and table growth
//! reuse the cached hash.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;

use hashbrown::{DefaultHashBuilder, HashTable};

use crate::{CapacityExceeded, Priority, Slot};

/// Vector offset of a 1-based slot.
#[inline(always)]
const fn at(slot: usize) -> usize {
    slot - 1
}

/// Folds every NaN onto the positive quiet NaN, which orders after `+inf`.
///
/// `total_cmp` orders NaN by its sign bit, and arithmetic such as `0.0 / 0.0`
/// yields a negative NaN on common targets.
#[inline]
fn canonical_key(key: f64) -> f64 {
    if key.is_nan() { f64::NAN } else { key }
}

/// A min-priority queue of distinct objects with O(log n) removal by value.
///
/// Each object's key is extracted once, when it is added, and cached. If the
/// underlying value changes later the cached key is stale until the object is
/// removed and added again.
///
/// Adding an object equal to one already present replaces the old entry, so
/// the heap never holds two equal objects.
///
/// # Example
///
/// ```
/// use nexus_keyed_heap::IndexedMinHeap;
///
/// let mut heap = IndexedMinHeap::new(|s: &&str| s.len());
///
/// heap.add("pineapple").unwrap();
/// heap.add("coco").unwrap();
/// heap.add("mango").unwrap();
///
/// assert_eq!(heap.pop_min(), Some("coco"));
///
/// // Arbitrary removal by value
/// assert!(heap.remove("pineapple"));
/// assert!(!heap.remove("pineapple"));
///
/// assert_eq!(heap.pop_min(), Some("mango"));
/// assert_eq!(heap.pop_min(), None);
/// ```
///
/// # Capacity
///
/// The slot type `S` bounds the number of live objects. With `u8` slots the
/// heap holds at most 255 objects; the next distinct `add` is rejected and
/// hands the object back.
///
/// ```
/// use nexus_keyed_heap::HeapBuilder;
///
/// let mut heap = HeapBuilder::new().slot_type::<u8>().build(|v: &u32| *v);
/// for v in 0..255u32 {
///     heap.add(v).unwrap();
/// }
///
/// let err = heap.add(1000).unwrap_err();
/// assert_eq!(err.limit, 255);
/// assert_eq!(err.into_inner(), 1000);
///
/// // Replacing a present object does not grow the heap
/// heap.add(7).unwrap();
/// assert_eq!(heap.len(), 255);
/// ```
pub struct IndexedMinHeap<T, S: Slot = u32, H = DefaultHashBuilder> {
    /// Heap-ordered keys.
    keys: Vec<f64>,
    /// Objects, parallel to `keys`.
    objects: Vec<T>,
    /// Identity hashes, parallel to `keys`.
    hashes: Vec<u64>,
    /// Identity -> slot.
    slots: HashTable<S>,
    hash_builder: H,
    extractor: Box<dyn Fn(&T) -> f64>,
}

impl<T: Hash + Eq> IndexedMinHeap<T> {
    /// Creates an empty heap ordered by `extractor`.
    pub fn new<P, F>(extractor: F) -> Self
    where
        P: Priority,
        F: Fn(&T) -> P + 'static,
    {
        Self::with_capacity(0, extractor)
    }

    /// Creates an empty heap with room for `capacity` objects.
    pub fn with_capacity<P, F>(capacity: usize, extractor: F) -> Self
    where
        P: Priority,
        F: Fn(&T) -> P + 'static,
    {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default(), extractor)
    }
}

impl<T, S, H> IndexedMinHeap<T, S, H>
where
    T: Hash + Eq,
    S: Slot,
    H: BuildHasher,
{
    /// Creates an empty heap with the given capacity and identity hasher.
    ///
    /// `capacity` is clamped to the slot type's limit.
    pub fn with_capacity_and_hasher<P, F>(capacity: usize, hash_builder: H, extractor: F) -> Self
    where
        P: Priority,
        F: Fn(&T) -> P + 'static,
    {
        let capacity = capacity.min(S::LIMIT);
        Self {
            keys: Vec::with_capacity(capacity),
            objects: Vec::with_capacity(capacity),
            hashes: Vec::with_capacity(capacity),
            slots: HashTable::with_capacity(capacity),
            hash_builder,
            extractor: Box::new(move |value: &T| canonical_key(extractor(value).into_key())),
        }
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Adds an object, keyed by the extractor.
    ///
    /// If an equal object is already present it is removed first, and the new
    /// object takes its place with a freshly extracted key.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] holding `value` if the heap already holds
    /// [`capacity_limit`](Self::capacity_limit) objects and `value` is not
    /// one of them. The heap is unchanged.
    pub fn add(&mut self, value: T) -> Result<(), CapacityExceeded<T>> {
        let hash = self.hash_builder.hash_one(&value);

        match self.find(hash, &value) {
            Some(slot) => {
                self.remove_slot(slot);
            }
            None if self.len() >= S::LIMIT => {
                return Err(CapacityExceeded {
                    value,
                    limit: S::LIMIT,
                });
            }
            None => {}
        }

        let key = (self.extractor)(&value);
        self.keys.push(key);
        self.objects.push(value);
        self.hashes.push(hash);
        let slot = self.keys.len();

        let hashes = &self.hashes;
        self.slots
            .insert_unique(hash, S::from_usize(slot), |s| hashes[at(s.as_usize())]);

        self.sift_up(slot);
        Ok(())
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Removes an object by value.
    ///
    /// Returns `true` if it was present. Absent objects leave the heap
    /// untouched.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes an object by value and returns the stored one.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(value);
        let slot = self.find(hash, value)?;
        Some(self.remove_slot(slot).0)
    }

    /// Removes and returns the object with the smallest key.
    ///
    /// Returns `None` if the heap is empty.
    pub fn pop_min(&mut self) -> Option<T> {
        self.pop_min_with_key().map(|(value, _)| value)
    }

    /// Removes and returns the object with the smallest key, and that key.
    pub fn pop_min_with_key(&mut self) -> Option<(T, f64)> {
        if self.is_empty() {
            return None;
        }
        Some(self.remove_slot(1))
    }

    /// Removes objects in key order while `pred` returns `true`.
    ///
    /// The predicate sees the current minimum and its key.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_keyed_heap::IndexedMinHeap;
    ///
    /// let mut deadlines = IndexedMinHeap::new(|d: &u64| *d);
    /// for d in [40, 10, 30, 20] {
    ///     deadlines.add(d).unwrap();
    /// }
    ///
    /// let expired: Vec<_> = deadlines.drain_while(|_, key| key <= 25.0).collect();
    /// assert_eq!(expired, vec![10, 20]);
    /// assert_eq!(deadlines.len(), 2);
    /// ```
    pub fn drain_while<F>(&mut self, pred: F) -> DrainWhile<'_, T, S, H, F>
    where
        F: FnMut(&T, f64) -> bool,
    {
        DrainWhile { heap: self, pred }
    }

    /// Consumes the heap, returning its objects in non-decreasing key order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(value) = self.pop_min() {
            sorted.push(value);
        }
        sorted
    }

    /// Removes every object. The extractor is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.hashes.clear();
        self.objects.clear();
        self.keys.clear();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns `true` if an equal object is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.hash_builder.hash_one(value), value).is_some()
    }

    /// Returns the key cached for an equal object, if present.
    pub fn key_of<Q>(&self, value: &Q) -> Option<f64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.hash_builder.hash_one(value), value)
            .map(|slot| self.keys[at(slot)])
    }

    /// Returns the 1-based heap slot of an equal object, if present.
    pub fn slot_of<Q>(&self, value: &Q) -> Option<S>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.hash_builder.hash_one(value), value)
            .map(S::from_usize)
    }

    // ========================================================================
    // Storage
    // ========================================================================

    /// Reserves room for at least `additional` more objects.
    pub fn reserve(&mut self, additional: usize) {
        self.keys.reserve(additional);
        self.objects.reserve(additional);
        self.hashes.reserve(additional);
        let hashes = &self.hashes;
        self.slots
            .reserve(additional, |s| hashes[at(s.as_usize())]);
    }

    /// Releases unused capacity.
    pub fn shrink_to_fit(&mut self) {
        self.keys.shrink_to_fit();
        self.objects.shrink_to_fit();
        self.hashes.shrink_to_fit();
        let hashes = &self.hashes;
        self.slots
            .shrink_to_fit(|s| hashes[at(s.as_usize())]);
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Checks the full structural invariant.
    ///
    /// Verifies the heap property against both children of every slot, and
    /// that the identity table maps every live object back to its own slot
    /// under its cached hash. Intended for tests; O(n).
    pub fn check_full_invariant(&self) -> bool {
        let len = self.len();
        if self.objects.len() != len || self.hashes.len() != len || self.slots.len() != len {
            return false;
        }

        for slot in 1..=len {
            let key = self.keys[at(slot)];
            for child in [2 * slot, 2 * slot + 1] {
                if child <= len && self.keys[at(child)].total_cmp(&key).is_lt() {
                    return false;
                }
            }

            let value = &self.objects[at(slot)];
            let hash = self.hashes[at(slot)];
            if hash != self.hash_builder.hash_one(value) || self.find(hash, value) != Some(slot) {
                return false;
            }
        }
        true
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Finds the slot holding an object equal to `value`.
    #[inline]
    fn find<Q>(&self, hash: u64, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let objects = &self.objects;
        self.slots
            .find(hash, |&s| {
                let stored: &Q = objects[at(s.as_usize())].borrow();
                stored == value
            })
            .map(|s| s.as_usize())
    }

    /// Points the identity entry currently holding `from` at `to`.
    ///
    /// Slot numbers are unique in the table, so `from` identifies the entry.
    #[inline]
    fn relink(&mut self, hash: u64, from: S, to: S) {
        let entry = self
            .slots
            .find_mut(hash, |&s| s == from)
            .expect("identity table out of sync with heap");
        *entry = to;
    }

    /// Exchanges two live slots in every parallel structure.
    ///
    /// The entry for `b` is parked on `S::NONE` while `a` moves, so slot
    /// numbers stay unique in the table at every step.
    fn swap_slots(&mut self, a: usize, b: usize) {
        debug_assert_ne!(a, b);
        let hash_a = self.hashes[at(a)];
        let hash_b = self.hashes[at(b)];
        let (sa, sb) = (S::from_usize(a), S::from_usize(b));

        self.relink(hash_b, sb, S::NONE);
        self.relink(hash_a, sa, sb);
        self.relink(hash_b, S::NONE, sa);

        self.keys.swap(at(a), at(b));
        self.objects.swap(at(a), at(b));
        self.hashes.swap(at(a), at(b));
    }

    /// Removes the object at `slot`, returning it with its key.
    ///
    /// The last slot is swapped into the hole, then moved down if its key is
    /// larger than the departed one, up if smaller, and left alone if equal.
    fn remove_slot(&mut self, slot: usize) -> (T, f64) {
        let last = self.len();
        debug_assert!(slot >= 1 && slot <= last, "slot {slot} not live");

        let removed_key = self.keys[at(slot)];
        let last_key = self.keys[at(last)];

        if slot != last {
            self.swap_slots(slot, last);
        }

        let hash = self.hashes[at(last)];
        let last_slot = S::from_usize(last);
        if let Ok(entry) = self.slots.find_entry(hash, |&s| s == last_slot) {
            entry.remove();
        } else {
            debug_assert!(false, "identity table out of sync with heap");
        }

        self.keys.truncate(at(last));
        self.hashes.truncate(at(last));
        let value = self
            .objects
            .pop()
            .expect("live slot implies a stored object");

        if slot != last {
            match last_key.total_cmp(&removed_key) {
                core::cmp::Ordering::Greater => self.sift_down(slot),
                core::cmp::Ordering::Less => self.sift_up(slot),
                core::cmp::Ordering::Equal => {}
            }
        }

        (value, removed_key)
    }

    /// Moves the object at `slot` toward the root while its parent is larger.
    fn sift_up(&mut self, mut slot: usize) {
        while slot > 1 {
            let parent = slot / 2;
            if self.keys[at(parent)]
                .total_cmp(&self.keys[at(slot)])
                .is_le()
            {
                break;
            }
            self.swap_slots(parent, slot);
            slot = parent;
        }
    }

    /// Moves the object at `slot` toward the leaves while a child is smaller.
    ///
    /// Follows the smaller child; on a tie the left child wins.
    fn sift_down(&mut self, mut slot: usize) {
        let len = self.len();
        loop {
            let left = 2 * slot;
            if left > len {
                break;
            }

            let right = left + 1;
            let child = if right <= len
                && self.keys[at(right)]
                    .total_cmp(&self.keys[at(left)])
                    .is_lt()
            {
                right
            } else {
                left
            };

            if self.keys[at(child)]
                .total_cmp(&self.keys[at(slot)])
                .is_ge()
            {
                break;
            }
            self.swap_slots(slot, child);
            slot = child;
        }
    }
}

impl<T, S: Slot, H> IndexedMinHeap<T, S, H> {
    /// Returns the number of objects in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of objects the heap can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.objects.capacity()
    }

    /// Returns the maximum number of live objects for the slot type `S`.
    #[inline]
    pub const fn capacity_limit(&self) -> usize {
        S::LIMIT
    }

    /// Returns the object with the smallest key without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.objects.first()
    }

    /// Returns the object with the smallest key and that key.
    #[inline]
    pub fn peek_with_key(&self) -> Option<(&T, f64)> {
        Some((self.objects.first()?, *self.keys.first()?))
    }

    /// Iterates over `(object, key)` pairs in slot order, not key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            objects: self.objects.iter(),
            keys: self.keys.iter(),
        }
    }

    /// Checks the heap ordering.
    ///
    /// Verifies that no key is below the root's and that every slot's key is
    /// at most the key of its left child. An empty heap passes. Intended for
    /// tests; O(n).
    pub fn check_invariant(&self) -> bool {
        let len = self.len();
        let Some(&root) = self.keys.first() else {
            return true;
        };

        for slot in 1..=len {
            let key = self.keys[at(slot)];
            if key.total_cmp(&root).is_lt() {
                return false;
            }
            let child = 2 * slot;
            if child <= len && self.keys[at(child)].total_cmp(&key).is_lt() {
                return false;
            }
        }
        true
    }
}

impl<T: fmt::Debug, S: Slot, H> fmt::Debug for IndexedMinHeap<T, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedMinHeap")
            .field("len", &self.len())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<'a, T, S: Slot, H> IntoIterator for &'a IndexedMinHeap<T, S, H> {
    type Item = (&'a T, f64);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator over `(object, key)` pairs in slot order.
///
/// Created by [`IndexedMinHeap::iter`].
pub struct Iter<'a, T> {
    objects: core::slice::Iter<'a, T>,
    keys: core::slice::Iter<'a, f64>,
}

// Does not require `T: Clone`.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            objects: self.objects.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, f64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.objects.next()?, *self.keys.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.objects.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// An iterator that pops objects while a predicate holds.
///
/// Created by [`IndexedMinHeap::drain_while`].
pub struct DrainWhile<'a, T, S: Slot, H, F> {
    heap: &'a mut IndexedMinHeap<T, S, H>,
    pred: F,
}

impl<T, S, H, F> Iterator for DrainWhile<'_, T, S, H, F>
where
    T: Hash + Eq,
    S: Slot,
    H: BuildHasher,
    F: FnMut(&T, f64) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (min, key) = self.heap.peek_with_key()?;
        if (self.pred)(min, key) {
            self.heap.pop_min()
        } else {
            None
        }
    }
}
