//! A ready-made element for key-only payloads.

use alloc::boxed::Box;
use core::fmt;
use core::ptr::NonNull;

use crate::links::Links;
use crate::traits::{Element, Linked};

/// An element whose ordering key is its entire payload.
///
/// For callers that have no struct of their own to thread links through,
/// `Keyed` wraps any `Ord` key into a heap-storable element, giving the
/// intrusive heap a `BinaryHeap`-like feel:
///
/// ```rust
/// use intrusive_pointer_heap::{Heap, Keyed};
///
/// let mut heap = Heap::new();
/// for key in [5, 3, 8] {
///     heap.push(Keyed::new(key));
/// }
///
/// assert_eq!(heap.pop().map(Keyed::into_key), Some(3));
/// assert_eq!(heap.pop().map(Keyed::into_key), Some(5));
/// assert_eq!(heap.pop().map(Keyed::into_key), Some(8));
/// ```
pub struct Keyed<K: Ord> {
    key: K,
    links: Links<Keyed<K>>,
}

impl<K: Ord> Keyed<K> {
    /// Allocates a new boxed element holding `key`, ready to push.
    pub fn new(key: K) -> Box<Self> {
        Box::new(Keyed {
            key,
            links: Links::new(),
        })
    }

    /// Returns the key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the element, returning the key.
    #[inline]
    pub fn into_key(self: Box<Self>) -> K {
        self.key
    }
}

// `impl_linked!` does not cover generic types, so the forwarding is spelled
// out. The slots live in `self.links` and nothing else touches them.
unsafe impl<K: Ord> Linked for Keyed<K> {
    #[inline]
    fn left(&self) -> Option<NonNull<Self>> {
        self.links.left()
    }

    #[inline]
    fn right(&self) -> Option<NonNull<Self>> {
        self.links.right()
    }

    #[inline]
    fn set_left(&mut self, child: Option<NonNull<Self>>) {
        self.links.set_left(child)
    }

    #[inline]
    fn set_right(&mut self, child: Option<NonNull<Self>>) {
        self.links.set_right(child)
    }
}

impl<K: Ord> Element for Keyed<K> {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self.key < other.key
    }
}

impl<K: Ord + fmt::Display> fmt::Display for Keyed<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for Keyed<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Keyed").field(&self.key).finish()
    }
}
