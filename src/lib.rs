//! Pointer-based (array-free) intrusive binary min-heap.
//!
//! Most binary heaps sit on top of a growable array and navigate it with
//! index arithmetic. This crate keeps the same almost-complete tree shape but
//! stores it as a real tree: the two child links live *inside* each element
//! (the heap is intrusive), and the path from the root to any breadth-first
//! position is re-derived on every operation from nothing but the current
//! element count. There is no backing array to grow or copy, and no
//! per-node state beyond the two child links.
//!
//! The layout trick comes from the paper "Peaps: Heaps implemented without
//! arrays" (<https://www.cpp.edu/~ftang/courses/CS241/notes/Building_Heaps_With_Pointers.pdf>).
//!
//! # Overview
//!
//! - [`Linked`] / [`Element`]: the capability contract a stored type must
//!   satisfy: two child slots plus a strict-less comparison.
//! - [`Links`]: reusable link storage to embed in your type, together with
//!   the [`impl_linked!`] macro that forwards the accessors to it.
//! - [`Keyed`]: a ready-made element for the common case where the ordering
//!   key is the whole payload.
//! - [`Heap`]: the container; `push`, `pop`, `peek`, `len`, all `O(log n)`
//!   or better, with zero allocations inside the heap itself.
//! - [`arena::ArenaHeap`] (feature `arena-storage`): the same algorithm over
//!   a slotmap arena with keys in place of pointers, for callers who want to
//!   avoid caller-owned allocation entirely.
//!
//! # Example
//!
//! ```rust
//! use intrusive_pointer_heap::{Element, Heap, Links, impl_linked};
//!
//! struct Job {
//!     deadline: u64,
//!     links: Links<Job>,
//! }
//!
//! impl_linked!(Job { links });
//!
//! impl Element for Job {
//!     fn less(&self, other: &Self) -> bool {
//!         self.deadline < other.deadline
//!     }
//! }
//!
//! let mut heap = Heap::new();
//! for deadline in [30, 10, 20] {
//!     heap.push(Box::new(Job { deadline, links: Links::new() }));
//! }
//!
//! assert_eq!(heap.peek().map(|j| j.deadline), Some(10));
//! assert_eq!(heap.pop().map(|j| j.deadline), Some(10));
//! assert_eq!(heap.len(), 2);
//! ```
//!
//! # Ownership
//!
//! The caller allocates each element (`Box<T>`) and hands ownership to the
//! heap on `push`; `pop` hands it back with both child slots cleared.
//! Dropping a non-empty heap frees every element it still owns.
//!
//! # Concurrency
//!
//! The heap performs no internal synchronization. Sharing one heap between
//! threads requires external serialization (a mutex around the whole heap);
//! see the crate's parallel tests for the intended pattern.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(feature = "arena-storage")]
pub mod arena;
mod heap;
mod keyed;
mod links;
mod traits;

pub use heap::Heap;
pub use keyed::Keyed;
pub use links::Links;
pub use traits::{Element, Linked};
