//! Min-priority queues of candidate arcs

use std::{cmp::Reverse, collections::BinaryHeap, fmt};

/// A min-priority queue
#[derive(Clone)]
#[repr(transparent)]
pub struct MinHeap<T>(BinaryHeap<Reverse<T>>);

impl<T: Ord + fmt::Debug> fmt::Debug for MinHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items: Vec<_> = self.0.iter().map(|Reverse(t)| t).collect();
        items.sort_unstable();
        f.debug_list().entries(items).finish()
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self { Self(BinaryHeap::new()) }
}

impl<T: Ord> MinHeap<T> {
    #[must_use]
    #[inline]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    #[inline]
    pub fn insert(&mut self, value: T) { self.0.push(Reverse(value)); }

    #[must_use]
    #[inline]
    pub fn peek_min(&self) -> Option<&T> { self.0.peek().map(|Reverse(t)| t) }

    #[inline]
    pub fn delete_min(&mut self) -> Option<T> { self.0.pop().map(|Reverse(t)| t) }

    /// Move every element of `other` into this heap, leaving `other` empty
    pub fn merge(&mut self, other: &mut Self) {
        if self.0.len() < other.0.len() {
            std::mem::swap(&mut self.0, &mut other.0);
        }

        self.0.append(&mut other.0);
    }

    pub fn into_sorted_vec(self) -> Vec<T> {
        self.0.into_sorted_vec().into_iter().rev().map(|Reverse(t)| t).collect()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Reverse).collect())
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Reverse));
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::MinHeap;

    #[test]
    fn merge_empties_other() {
        let mut a: MinHeap<_> = [5, 3, 9].into_iter().collect();
        let mut b: MinHeap<_> = [1, 7, 2, 8].into_iter().collect();
        a.merge(&mut b);

        assert!(b.is_empty());
        assert_eq!(a.len(), 7);
        assert_eq!(a.peek_min(), Some(&1));
        assert_eq!(a.into_sorted_vec(), vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn empty() {
        let mut h = MinHeap::<u8>::new();
        assert_eq!(h.peek_min(), None);
        assert_eq!(h.delete_min(), None);
    }

    proptest! {
        #[test]
        fn drains_in_order(
            l in prop::collection::vec(any::<i32>(), 0..256),
            r in prop::collection::vec(any::<i32>(), 0..256),
        ) {
            let mut heap: MinHeap<_> = l.iter().copied().collect();
            let mut other = MinHeap::new();
            other.extend(r.iter().copied());
            heap.merge(&mut other);

            let mut expected: Vec<_> = l.into_iter().chain(r).collect();
            expected.sort_unstable();

            let mut drained = vec![];
            while let Some(x) = heap.delete_min() {
                drained.push(x);
            }
            prop_assert_eq!(drained, expected);
        }
    }
}
