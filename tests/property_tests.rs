//! Property-based tests using proptest.
//!
//! Random operation sequences are run against `std::collections::BinaryHeap`
//! as the model, with the arena-backed variant driven in lock-step so every
//! implementation of the algorithm answers identically at every step.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use proptest::prelude::*;

use intrusive_pointer_heap::{Heap, Keyed};

#[cfg(feature = "arena-storage")]
use intrusive_pointer_heap::arena::ArenaHeap;

fn drain(heap: &mut Heap<Keyed<i32>>) -> Vec<i32> {
    std::iter::from_fn(|| heap.pop().map(Keyed::into_key)).collect()
}

proptest! {
    /// Popping everything yields the ascending sort of what was pushed,
    /// duplicates included.
    #[test]
    fn pop_sequence_is_sorted(keys in prop::collection::vec(any::<i32>(), 0..256)) {
        let mut heap = Heap::new();
        for &key in &keys {
            heap.push(Keyed::new(key));
        }
        prop_assert_eq!(heap.len(), keys.len());

        let got = drain(&mut heap);
        let mut want = keys;
        want.sort_unstable();
        prop_assert_eq!(got, want);
        prop_assert_eq!(heap.len(), 0);
        prop_assert!(heap.peek().is_none());
    }

    /// After every push, `peek` reports the minimum pushed so far.
    #[test]
    fn peek_matches_running_minimum(keys in prop::collection::vec(any::<i32>(), 1..128)) {
        let mut heap = Heap::new();
        let mut min = i32::MAX;
        for &key in &keys {
            min = min.min(key);
            heap.push(Keyed::new(key));
            prop_assert_eq!(heap.peek().map(|n| *n.key()), Some(min));
        }
    }

    /// Random interleavings of push and pop agree with the std model at
    /// every intermediate step.
    #[test]
    fn model_agreement(ops in prop::collection::vec((any::<bool>(), any::<i32>()), 0..512)) {
        let mut heap = Heap::new();
        let mut model: BinaryHeap<Reverse<i32>> = BinaryHeap::new();
        #[cfg(feature = "arena-storage")]
        let mut arena: ArenaHeap<i32> = ArenaHeap::new();

        for (should_pop, key) in ops {
            if should_pop {
                let got = heap.pop().map(Keyed::into_key);
                let want = model.pop().map(|Reverse(key)| key);
                prop_assert_eq!(got, want);
                #[cfg(feature = "arena-storage")]
                prop_assert_eq!(arena.pop(), want);
            } else {
                heap.push(Keyed::new(key));
                model.push(Reverse(key));
                #[cfg(feature = "arena-storage")]
                arena.push(key);
            }

            prop_assert_eq!(heap.len(), model.len());
            prop_assert_eq!(heap.peek().map(|n| *n.key()), model.peek().map(|&Reverse(key)| key));
            #[cfg(feature = "arena-storage")]
            {
                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.peek().copied(), model.peek().map(|&Reverse(key)| key));
            }
        }

        // Drain whatever is left and compare the tails too.
        let got = drain(&mut heap);
        let mut want = Vec::new();
        while let Some(Reverse(key)) = model.pop() {
            want.push(key);
        }
        prop_assert_eq!(&got, &want);

        #[cfg(feature = "arena-storage")]
        {
            let arena_got: Vec<i32> = std::iter::from_fn(|| arena.pop()).collect();
            prop_assert_eq!(&arena_got, &want);
        }
    }

    /// Heavily duplicated keys: only the multiset of popped values is
    /// specified, which equals the sorted input.
    #[test]
    fn duplicates_pop_as_multiset(keys in prop::collection::vec(0i32..4, 0..128)) {
        let mut heap = Heap::new();
        for &key in &keys {
            heap.push(Keyed::new(key));
        }

        let got = drain(&mut heap);
        let mut want = keys;
        want.sort_unstable();
        prop_assert_eq!(got, want);
    }
}
