//! Arena-backed variant of the pointer heap.
//!
//! [`ArenaHeap`] runs the same count-derived path arithmetic as
//! [`Heap`](crate::Heap), but stores its nodes in a [`slotmap`] arena and
//! links them with keys instead of raw pointers. That trades away the
//! intrusive heap's zero-extra-allocation property for a fully safe
//! implementation over owned values, with no link storage in the element
//! type and no `Box` at the API boundary.
//!
//! The walks here are iterative (an explicit stack over the precomputed
//! bit path rather than recursion), so the two variants double as the two
//! standard renditions of the algorithm.

use alloc::vec::Vec;
use core::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::heap::log2;

new_key_type! {
    struct HeapKey;
}

#[derive(Debug)]
struct Slot<T> {
    value: T,
    left: Option<HeapKey>,
    right: Option<HeapKey>,
}

/// A min-heap over owned values, stored in a slotmap arena.
///
/// Same almost-complete tree, same rotations, same `O(log n)` push and pop
/// as [`Heap`](crate::Heap); ordering comes from the value's `Ord` impl.
///
/// # Example
///
/// ```rust
/// use intrusive_pointer_heap::arena::ArenaHeap;
///
/// let mut heap = ArenaHeap::new();
/// for key in [5, 3, 8] {
///     heap.push(key);
/// }
///
/// assert_eq!(heap.peek(), Some(&3));
/// assert_eq!(heap.pop(), Some(3));
/// assert_eq!(heap.len(), 2);
/// ```
#[derive(Debug)]
pub struct ArenaHeap<T: Ord> {
    nodes: SlotMap<HeapKey, Slot<T>>,
    root: Option<HeapKey>,
}

impl<T: Ord> ArenaHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        ArenaHeap {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Returns the number of elements currently in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the minimum value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[root].value)
    }

    /// Removes every element from the heap.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Inserts a value.
    pub fn push(&mut self, value: T) {
        let leaf = self.nodes.insert(Slot {
            value,
            left: None,
            right: None,
        });

        // The arena count now includes the leaf, so it is also the
        // breadth-first position the leaf must occupy.
        let size = self.nodes.len();
        let Some(root) = self.root else {
            self.root = Some(leaf);
            return;
        };

        // Descend along the bit path of `size`, recording the node and
        // branch taken at each level.
        let top = log2(size) as i32 - 1;
        let mut path: Vec<(HeapKey, bool)> = Vec::with_capacity(top as usize + 1);
        let mut cur = root;
        for order in (0..=top).rev() {
            let went_left = (size >> order as u32) & 1 == 0;
            path.push((cur, went_left));
            if order > 0 {
                cur = if went_left {
                    self.nodes[cur].left
                } else {
                    self.nodes[cur].right
                }
                .expect("almost-complete tree: node missing on the path");
            }
        }

        // Unwind: attach the subtree at each level and promote the new
        // value with a rotation wherever it undercuts its parent.
        let mut sub = leaf;
        while let Some((parent, went_left)) = path.pop() {
            if went_left {
                self.nodes[parent].left = Some(sub);
            } else {
                self.nodes[parent].right = Some(sub);
            }
            if self.nodes[sub].value < self.nodes[parent].value {
                sub = if went_left {
                    self.rotate_left(parent)
                } else {
                    self.rotate_right(parent)
                };
            } else {
                sub = parent;
            }
        }
        self.root = Some(sub);
    }

    /// Removes and returns the minimum value, or `None` if the heap is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        let root = self.root?;
        let size = self.nodes.len();

        if size == 1 {
            self.root = None;
            return self.nodes.remove(root).map(|slot| slot.value);
        }

        // Walk to the parent of position `size`; the final path bit says
        // which of its children is the last node.
        let top = log2(size) as i32 - 1;
        let mut cur = root;
        for order in (1..=top).rev() {
            let went_left = (size >> order as u32) & 1 == 0;
            cur = if went_left {
                self.nodes[cur].left
            } else {
                self.nodes[cur].right
            }
            .expect("almost-complete tree: node missing on the path");
        }
        let last = if size & 1 == 0 {
            self.nodes[cur].left.take()
        } else {
            self.nodes[cur].right.take()
        }
        .expect("almost-complete tree: last node missing");

        // The detached node takes the root's place. Read the root's links
        // only after the detach: when the last node was the root's own
        // child, its slot is already cleared.
        let (left, right) = {
            let slot = &self.nodes[root];
            (slot.left, slot.right)
        };
        self.nodes[last].left = left;
        self.nodes[last].right = right;
        self.root = Some(self.fix_down(last));

        self.nodes.remove(root).map(|slot| slot.value)
    }

    /// Promotes `old_root`'s left child over it and returns the child.
    fn rotate_left(&mut self, old_root: HeapKey) -> HeapKey {
        let new_root = self.nodes[old_root]
            .left
            .expect("rotation requires a left child");

        let old_right = self.nodes[old_root].right;
        let new_right = self.nodes[new_root].right;
        self.nodes[old_root].right = new_right;
        self.nodes[new_root].right = old_right;

        let new_left = self.nodes[new_root].left;
        self.nodes[old_root].left = new_left;
        self.nodes[new_root].left = Some(old_root);

        new_root
    }

    /// Mirror image of [`ArenaHeap::rotate_left`].
    fn rotate_right(&mut self, old_root: HeapKey) -> HeapKey {
        let new_root = self.nodes[old_root]
            .right
            .expect("rotation requires a right child");

        let old_left = self.nodes[old_root].left;
        let new_left = self.nodes[new_root].left;
        self.nodes[old_root].left = new_left;
        self.nodes[new_root].left = old_left;

        let new_right = self.nodes[new_root].right;
        self.nodes[old_root].right = new_right;
        self.nodes[new_root].right = Some(old_root);

        new_root
    }

    /// Sinks `cur` until it is not greater than both present children, and
    /// returns the subtree's new root. Iterative counterpart of the
    /// pointer heap's fix-down.
    fn fix_down(&mut self, cur: HeapKey) -> HeapKey {
        let mut top = None;
        let mut attach: Option<(HeapKey, bool)> = None;
        loop {
            let Some(left) = self.nodes[cur].left else {
                // No left child means no right child either.
                break;
            };
            let right = self.nodes[cur].right;

            let child = match right {
                Some(right) if self.nodes[right].value <= self.nodes[left].value => right,
                _ => left,
            };
            if self.nodes[child].value >= self.nodes[cur].value {
                break;
            }

            let went_left = child == left;
            let sub = if went_left {
                self.rotate_left(cur)
            } else {
                self.rotate_right(cur)
            };
            match attach {
                None => top = Some(sub),
                Some((parent, was_left)) => {
                    if was_left {
                        self.nodes[parent].left = Some(sub);
                    } else {
                        self.nodes[parent].right = Some(sub);
                    }
                }
            }
            // `cur` is now the child of `sub` on the side it was promoted
            // from; keep sinking it.
            attach = Some((sub, went_left));
        }
        top.unwrap_or(cur)
    }
}

impl<T: Ord> Default for ArenaHeap<T> {
    fn default() -> Self {
        ArenaHeap::new()
    }
}

impl<T: Ord + fmt::Display> fmt::Display for ArenaHeap<T> {
    /// Breadth-first rows, absent children rendered as `_`, matching the
    /// pointer heap's renderer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut row: Vec<Option<HeapKey>> = Vec::new();
        row.push(self.root);
        while !row.is_empty() {
            let mut next = Vec::new();
            for (i, slot) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                match slot {
                    Some(key) => {
                        let node = &self.nodes[*key];
                        write!(f, "{}", node.value)?;
                        next.push(node.left);
                        next.push(node.right);
                    }
                    None => f.write_str("_")?,
                }
            }
            f.write_str("\n")?;
            row = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    struct Lcg {
        state: u64,
    }

    impl Lcg {
        fn new(seed: u64) -> Self {
            Lcg { state: seed }
        }

        fn next_key(&mut self) -> u32 {
            self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (self.state >> 33) as u32 % 1000
        }
    }

    fn drain(heap: &mut ArenaHeap<u32>) -> Vec<u32> {
        let mut out = Vec::new();
        while let Some(value) = heap.pop() {
            out.push(value);
        }
        out
    }

    /// Occupied breadth-first positions, sorted.
    fn occupied_positions(heap: &ArenaHeap<u32>) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut queue = Vec::new();
        if let Some(root) = heap.root {
            queue.push((root, 1usize));
        }
        while let Some((key, pos)) = queue.pop() {
            positions.push(pos);
            let slot = &heap.nodes[key];
            if let Some(left) = slot.left {
                queue.push((left, 2 * pos));
            }
            if let Some(right) = slot.right {
                queue.push((right, 2 * pos + 1));
            }
        }
        positions.sort_unstable();
        positions
    }

    #[test]
    fn empty_heap() {
        let mut heap: ArenaHeap<u32> = ArenaHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn push_pop_sequence() {
        let mut heap = ArenaHeap::new();
        for key in [5u32, 3, 8, 1, 4] {
            heap.push(key);
        }
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(drain(&mut heap), vec![1, 3, 4, 5, 8]);
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn interleaved_push_pop() {
        let mut heap = ArenaHeap::new();
        heap.push(10u32);
        heap.push(7);
        assert_eq!(heap.pop(), Some(7));
        heap.push(3);
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.pop(), Some(10));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn pops_come_out_sorted() {
        let mut rng = Lcg::new(11);
        let keys: Vec<u32> = (0..200).map(|_| rng.next_key()).collect();

        let mut heap = ArenaHeap::new();
        for &key in &keys {
            heap.push(key);
        }

        let mut want = keys;
        want.sort_unstable();
        assert_eq!(drain(&mut heap), want);
    }

    #[test]
    fn duplicate_keys_pop_as_multiset() {
        let keys = [2u32, 2, 2, 1, 2, 1];
        let mut heap = ArenaHeap::new();
        for &key in &keys {
            heap.push(key);
        }

        let mut want = keys.to_vec();
        want.sort_unstable();
        assert_eq!(drain(&mut heap), want);
    }

    #[test]
    fn shape_is_position_prefix_after_every_push() {
        let mut rng = Lcg::new(5);
        let mut heap = ArenaHeap::new();
        for n in 1..=64usize {
            heap.push(rng.next_key());
            let want: Vec<usize> = (1..=n).collect();
            assert_eq!(occupied_positions(&heap), want, "after push #{n}");
        }
    }

    #[test]
    fn shape_holds_through_mixed_ops() {
        let mut rng = Lcg::new(17);
        let mut heap = ArenaHeap::new();
        for round in 0..500 {
            if round % 3 == 2 {
                heap.pop();
            } else {
                heap.push(rng.next_key());
            }
            let want: Vec<usize> = (1..=heap.len()).collect();
            assert_eq!(occupied_positions(&heap), want, "after round {round}");
        }
    }

    #[test]
    fn arena_slots_are_reclaimed() {
        let mut heap = ArenaHeap::new();
        for round in 0..100u32 {
            heap.push(round);
            heap.push(round + 1000);
            heap.pop();
        }
        while heap.pop().is_some() {}
        assert_eq!(heap.nodes.len(), 0);
    }

    #[test]
    fn display_rows_for_ascending_pushes() {
        let mut heap = ArenaHeap::new();
        for key in 0u32..10 {
            heap.push(key);
        }
        let want = "0\n\
                    1 2\n\
                    3 4 5 6\n\
                    7 8 9 _ _ _ _ _\n\
                    _ _ _ _ _ _\n";
        assert_eq!(heap.to_string(), want);
    }

    #[test]
    fn clear_resets() {
        let mut heap = ArenaHeap::new();
        for key in [9u32, 1, 5] {
            heap.push(key);
        }
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);

        heap.push(2);
        assert_eq!(heap.pop(), Some(2));
    }
}
