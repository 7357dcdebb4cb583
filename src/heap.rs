//! The heap container and its shape-repair algorithm.
//!
//! The tree is kept almost-complete: for a heap of `size` n, the occupied
//! breadth-first positions (root = 1, children of p at 2p and 2p+1) are
//! exactly 1..=n. No structure records this; the path from the root to
//! position n is re-derived from the bits of n below its highest set bit,
//! most significant first: a 0 bit descends left, a 1 bit descends right.
//!
//! `push` and `pop` both walk that path once. `push` descends to the first
//! free position and repairs heap order on the way back up with single-level
//! rotations; `pop` detaches the node at position `size`, transplants the
//! old root's children onto it, and lets it sink with [`fix_down`].

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::traits::{Element, Linked};

/// Integer log base 2 of `n`, for positive `n`.
///
/// The count of path bits below the highest set bit of a breadth-first
/// position. Calling this with `n = 0` is a precondition violation and
/// panics; heap sizes are at least 1 whenever it is consulted.
#[inline]
pub(crate) fn log2(n: usize) -> u32 {
    assert!(n > 0, "log2 is only defined for positive values, got {n}");
    usize::BITS - 1 - n.leading_zeros()
}

/// A pointer-based intrusive binary min-heap.
///
/// Elements are caller-allocated (`Box<T>`); the heap owns them between
/// [`push`](Heap::push) and [`pop`](Heap::pop) and frees any it still holds
/// on drop. Both operations run in `O(log n)` with `O(1)` pointer work per
/// level and never allocate; their recursion depth is `floor(log2 n) + 1`,
/// so at most `usize::BITS` frames even for pathological sizes.
///
/// The heap performs no internal synchronization; share it between threads
/// only behind external serialization such as a mutex.
pub struct Heap<T: Element> {
    size: usize,
    root: Option<NonNull<T>>,
    _owned: PhantomData<Box<T>>,
}

// The heap exclusively owns its elements, so it moves and shares between
// threads whenever the element type does.
unsafe impl<T: Element + Send> Send for Heap<T> {}
unsafe impl<T: Element + Sync> Sync for Heap<T> {}

impl<T: Element> Heap<T> {
    /// Creates an empty heap.
    #[inline]
    pub const fn new() -> Self {
        Heap {
            size: 0,
            root: None,
            _owned: PhantomData,
        }
    }

    /// Returns the number of elements currently in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the minimum element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.root.map(|root| unsafe { root.as_ref() })
    }

    /// Inserts an element, taking ownership of it.
    ///
    /// The element's child slots are overwritten; whatever they held before
    /// the call is ignored.
    pub fn push(&mut self, node: Box<T>) {
        // Increment first so that `size` is the breadth-first position the
        // new element will occupy.
        self.size += 1;

        let node = NonNull::from(Box::leak(node));
        let order = log2(self.size) as i32 - 1;
        let root = self.root;
        self.root = Some(unsafe { self.insert(root, order, node) });
    }

    /// Removes and returns the minimum element, or `None` if the heap is
    /// empty.
    ///
    /// The returned element's child slots are cleared; it can be reused or
    /// pushed again as-is.
    pub fn pop(&mut self) -> Option<Box<T>> {
        let removed = self.root?;

        // Detach the node at breadth-first position `size` before the
        // decrement, so the bit path still addresses it.
        let order = log2(self.size) as i32 - 1;
        let last = unsafe { self.detach_last(removed, order) };
        self.size -= 1;

        match last {
            // `detach_last` bottomed out immediately: the root was the only
            // node, and the heap is now empty.
            None => self.root = None,
            Some(last) => unsafe {
                // The detached node takes the removed root's place; it
                // inherits both children and sinks until heap order holds.
                (*last.as_ptr()).set_left((*removed.as_ptr()).left());
                (*last.as_ptr()).set_right((*removed.as_ptr()).right());
                self.root = Some(fix_down(last));
            },
        }

        let mut node = unsafe { Box::from_raw(removed.as_ptr()) };
        node.set_left(None);
        node.set_right(None);
        Some(node)
    }

    /// Removes and frees every element in the heap.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            unsafe { free_subtree(root) };
        }
        self.size = 0;
    }

    /// Recursive step of `push`: descends along the bit path of `size` and
    /// repairs heap order on the way back up.
    ///
    /// Assumes `size` has already been incremented to account for `new`.
    unsafe fn insert(
        &mut self,
        cur: Option<NonNull<T>>,
        order: i32,
        new: NonNull<T>,
    ) -> NonNull<T> {
        if order < 0 {
            // Reached the free position: install the new leaf.
            (*new.as_ptr()).set_left(None);
            (*new.as_ptr()).set_right(None);
            return new;
        }

        let cur = cur.expect("almost-complete tree: interior node missing");

        // val = size / 2^order; its parity picks the branch at this level.
        let val = self.size >> order as u32;
        if val & 1 == 0 {
            let child = self.insert((*cur.as_ptr()).left(), order - 1, new);
            (*cur.as_ptr()).set_left(Some(child));
            if (*child.as_ptr()).less(&*cur.as_ptr()) {
                return swap_with_left(cur);
            }
            cur
        } else {
            let child = self.insert((*cur.as_ptr()).right(), order - 1, new);
            (*cur.as_ptr()).set_right(Some(child));
            if (*child.as_ptr()).less(&*cur.as_ptr()) {
                return swap_with_right(cur);
            }
            cur
        }
    }

    /// Recursive step of `pop`: finds the node at breadth-first position
    /// `size`, unhooks it from its parent, and returns it.
    ///
    /// Returns `None` only after descending past the last level; the caller
    /// at the level above interprets that as "my child is the last node"
    /// and performs the detach. Assumes `size` has not been decremented yet.
    unsafe fn detach_last(&mut self, cur: NonNull<T>, order: i32) -> Option<NonNull<T>> {
        if order < 0 {
            return None;
        }

        let val = self.size >> order as u32;
        if val & 1 == 0 {
            let left = (*cur.as_ptr())
                .left()
                .expect("almost-complete tree: node missing on the path");
            match self.detach_last(left, order - 1) {
                Some(got) => Some(got),
                None => {
                    (*cur.as_ptr()).set_left(None);
                    Some(left)
                }
            }
        } else {
            let right = (*cur.as_ptr())
                .right()
                .expect("almost-complete tree: node missing on the path");
            match self.detach_last(right, order - 1) {
                Some(got) => Some(got),
                None => {
                    (*cur.as_ptr()).set_right(None);
                    Some(right)
                }
            }
        }
    }
}

impl<T: Element> Default for Heap<T> {
    #[inline]
    fn default() -> Self {
        Heap::new()
    }
}

impl<T: Element> Drop for Heap<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Element> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Rotates `old_root`'s left child into its place and returns it.
///
/// Pure pointer surgery: the child keeps its own left subtree as the
/// demoted node's new left subtree, adopts the demoted node on its left and
/// the demoted node's former right subtree on its right.
unsafe fn swap_with_left<T: Element>(old_root: NonNull<T>) -> NonNull<T> {
    let new_root = (*old_root.as_ptr())
        .left()
        .expect("rotation requires a left child");

    let old_right = (*old_root.as_ptr()).right();
    (*old_root.as_ptr()).set_right((*new_root.as_ptr()).right());
    (*new_root.as_ptr()).set_right(old_right);

    (*old_root.as_ptr()).set_left((*new_root.as_ptr()).left());
    (*new_root.as_ptr()).set_left(Some(old_root));

    new_root
}

/// Mirror image of [`swap_with_left`].
unsafe fn swap_with_right<T: Element>(old_root: NonNull<T>) -> NonNull<T> {
    let new_root = (*old_root.as_ptr())
        .right()
        .expect("rotation requires a right child");

    let old_left = (*old_root.as_ptr()).left();
    (*old_root.as_ptr()).set_left((*new_root.as_ptr()).left());
    (*new_root.as_ptr()).set_left(old_left);

    (*old_root.as_ptr()).set_right((*new_root.as_ptr()).right());
    (*new_root.as_ptr()).set_right(Some(old_root));

    new_root
}

/// Restores heap order in a subtree where only the root may be out of
/// place and both subtrees below it are already valid heaps. Returns the
/// subtree's new root.
unsafe fn fix_down<T: Element>(cur: NonNull<T>) -> NonNull<T> {
    let left = (*cur.as_ptr()).left();
    let right = (*cur.as_ptr()).right();

    let Some(left) = left else {
        // A node with no left child has no right child either.
        return cur;
    };

    // The candidate is whichever present child is not greater than the
    // other; only it can displace `cur`.
    match right {
        Some(right) if !(*left.as_ptr()).less(&*right.as_ptr()) => {
            if !(*right.as_ptr()).less(&*cur.as_ptr()) {
                return cur;
            }
            let new_root = swap_with_right(cur);
            // `cur` landed as the new root's right child; keep sinking it.
            (*new_root.as_ptr()).set_right(Some(fix_down(cur)));
            new_root
        }
        _ => {
            if !(*left.as_ptr()).less(&*cur.as_ptr()) {
                return cur;
            }
            let new_root = swap_with_left(cur);
            (*new_root.as_ptr()).set_left(Some(fix_down(cur)));
            new_root
        }
    }
}

/// Frees a subtree, element drops included. Recursion depth is the tree
/// height, at most `usize::BITS`.
unsafe fn free_subtree<T: Element>(node: NonNull<T>) {
    let node = Box::from_raw(node.as_ptr());
    if let Some(left) = node.left() {
        free_subtree(left);
    }
    if let Some(right) = node.right() {
        free_subtree(right);
    }
}

impl<T: Element + fmt::Display> Heap<T> {
    /// Renders up to `max_rows` breadth-first rows, one per line.
    ///
    /// Each row after the first emits two slots per occupied node of the
    /// previous row, mirroring the ideal complete-tree layout; absent
    /// children render as `_`. The trailing rows can consist entirely of
    /// placeholders, so the row bound is what stops the walk. Rendering is
    /// diagnostic output only and plays no part in the heap's operation.
    pub fn render(&self, max_rows: usize) -> String {
        let mut out = String::new();
        let mut row: Vec<Option<NonNull<T>>> = Vec::new();
        row.push(self.root);

        let mut emitted = 0;
        while !row.is_empty() && emitted < max_rows {
            let mut next = Vec::new();
            for (i, slot) in row.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                match slot {
                    Some(node) => {
                        let node = unsafe { node.as_ref() };
                        out.push_str(&format!("{node}"));
                        next.push(node.left());
                        next.push(node.right());
                    }
                    None => out.push('_'),
                }
            }
            out.push('\n');
            emitted += 1;
            row = next;
        }
        out
    }
}

impl<T: Element + fmt::Display> fmt::Display for Heap<T> {
    /// Renders every row down to (and including) the first row with no
    /// occupied slots.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(usize::MAX))
    }
}
