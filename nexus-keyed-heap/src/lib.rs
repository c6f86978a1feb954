//! Min-priority queue keyed by object identity.
//!
//! [`IndexedMinHeap`] orders distinct objects by a numeric key extracted from
//! each object, and removes any stored object by value in O(log n).
//!
//! A plain binary heap can only find an arbitrary element by scanning it. This
//! crate pairs the heap array with an identity table that tracks every
//! object's slot, so removal jumps straight to the right position:
//!
//! ```text
//! keys     [ 4 | 5 | 9 | 6 ]   heap-ordered f64 keys
//! objects  [ c | m | p | b ]   slot -> object
//! slots    { c:1 m:2 p:3 b:4 } object -> slot
//! ```
//!
//! All of them are updated together on every swap, so they agree at every step
//! of every operation.
//!
//! # Quick Start
//!
//! ```
//! use nexus_keyed_heap::IndexedMinHeap;
//!
//! // Key extractor is fixed at construction
//! let mut queue = IndexedMinHeap::new(|fruit: &&str| fruit.len());
//!
//! queue.add("pineapple").unwrap();
//! queue.add("coco").unwrap();
//! queue.add("mango").unwrap();
//! queue.add("banana").unwrap();
//!
//! assert_eq!(queue.pop_min(), Some("coco"));
//!
//! // O(log n) removal from anywhere
//! assert!(queue.remove("banana"));
//! assert_eq!(queue.len(), 2);
//! ```
//!
//! # Keys
//!
//! Keys are computed once per insertion and cached as `f64`. Any primitive
//! numeric type can be returned by the extractor (see [`Priority`]); integers
//! wider than 53 bits lose precision. A key never changes while its object is
//! in the heap. To reprioritize, add the object again: an equal object
//! replaces the old entry.
//!
//! Keys are compared with [`f64::total_cmp`]. Every NaN, whatever its sign
//! bit, is stored as [`f64::NAN`] and sorts after `+inf` instead of
//! corrupting the order. `-0.0` sorts before `+0.0`.
//!
//! # Capacity
//!
//! The slot type bounds the number of live objects (`u32` by default). An
//! `add` past the limit fails with [`CapacityExceeded`] and returns the object
//! without touching the heap. See [`HeapBuilder::slot_type`].
//!
//! # Threading
//!
//! Single-threaded. Every operation touches all three structures, so shared
//! use needs one lock around the whole heap.

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod heap;
pub mod priority;
pub mod slot;

pub use builder::HeapBuilder;
pub use error::CapacityExceeded;
pub use heap::{DrainWhile, IndexedMinHeap, Iter};
pub use priority::Priority;
pub use slot::Slot;
