//! The capability contract stored elements must satisfy.
//!
//! A type becomes storable in a [`Heap`](crate::Heap) by exposing exactly
//! five operations: get/set for each of its two child slots, and a
//! strict-less comparison against another element of the same type. Nothing
//! else is required; in particular there is no parent link and no
//! per-node size or key bookkeeping.
//!
//! Most implementations embed a [`Links`](crate::Links) field and forward
//! the accessors to it with [`impl_linked!`](crate::impl_linked), leaving
//! only [`Element::less`] to write by hand.

use core::ptr::NonNull;

/// Child-link accessors for an intrusive heap element.
///
/// `None` is the explicit "absent child" sentinel. The heap stores the links
/// through these accessors and reads them back while navigating; it never
/// inspects the element in any other way.
///
/// # Safety
///
/// Implementations must behave as plain storage for the two slots:
///
/// - `left`/`right` must return exactly the value most recently passed to
///   the corresponding setter (or `None` if it was never called), and
/// - the slots must not be read, written, or otherwise disturbed by the
///   implementation while the element is owned by a heap.
///
/// The heap dereferences the pointers it reads back from these accessors.
/// An implementation that fabricates or corrupts them makes `push`/`pop`
/// dereference invalid pointers.
pub unsafe trait Linked: Sized {
    /// Returns the left child, if any.
    fn left(&self) -> Option<NonNull<Self>>;

    /// Returns the right child, if any.
    fn right(&self) -> Option<NonNull<Self>>;

    /// Stores `child` as the left child.
    fn set_left(&mut self, child: Option<NonNull<Self>>);

    /// Stores `child` as the right child.
    fn set_right(&mut self, child: Option<NonNull<Self>>);
}

/// A heap-storable element: link storage plus a strict order.
///
/// `less` must be a strict weak ordering for the heap to produce sorted
/// output. The heap does not verify this; a `less` that violates it yields
/// arbitrary pop order, never memory unsafety; the heap only ever follows
/// links it installed itself.
///
/// Ties under `less` are broken arbitrarily: of two equal elements, which
/// one surfaces first is unspecified and may change between releases.
pub trait Element: Linked {
    /// Returns true if `self` is strictly less than `other`.
    fn less(&self, other: &Self) -> bool;
}
