//! A circular list of partial trees

use std::fmt;

use crate::{fragment::PartialTree, graph::VertexId, union_find::FragmentForest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("Partial tree list is empty")]
    Empty,
    #[error("No partial tree contains vertex {0:?}")]
    NoSuchFragment(VertexId),
}

#[derive(Debug, Clone)]
struct Slot {
    tree: Option<PartialTree>,
    next: usize,
}

/// A FIFO ring of partial trees, along with the forest that records which
/// fragment every vertex belongs to
///
/// Nodes live in an arena and link to each other by index.  `rear` names the
/// most recently appended node, and the front of the queue is always the
/// node after it.  Slots vacated by removal are recycled by later appends.
#[derive(Clone, Default)]
pub struct PartialTreeList {
    slots: Vec<Slot>,
    free: Vec<usize>,
    rear: Option<usize>,
    size: usize,
    forest: FragmentForest,
}

impl fmt::Debug for PartialTreeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialTreeList")
            .field("trees", &self.iter().map(PartialTree::root).collect::<Vec<_>>())
            .field("forest", &self.forest)
            .finish()
    }
}

impl PartialTreeList {
    /// Construct an empty list over the given fragment forest
    #[must_use]
    pub fn new(forest: FragmentForest) -> Self {
        Self {
            slots: vec![],
            free: vec![],
            rear: None,
            size: 0,
            forest,
        }
    }

    #[must_use]
    pub fn with_capacity(forest: FragmentForest, capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new(forest)
        }
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize { self.size }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool { self.size == 0 }

    #[must_use]
    #[inline]
    pub fn forest(&self) -> &FragmentForest { &self.forest }

    #[inline]
    pub fn forest_mut(&mut self) -> &mut FragmentForest { &mut self.forest }

    fn tree(&self, slot: usize) -> &PartialTree {
        self.slots[slot]
            .tree
            .as_ref()
            .unwrap_or_else(|| unreachable!())
    }

    fn alloc(&mut self, tree: PartialTree) -> usize {
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Slot {
                tree: Some(tree),
                next: slot,
            };
            slot
        } else {
            let slot = self.slots.len();
            self.slots.push(Slot {
                tree: Some(tree),
                next: slot,
            });
            slot
        }
    }

    /// Splice `slot` out of the ring, given the slot that precedes it
    fn unlink(&mut self, prev: usize, slot: usize) -> PartialTree {
        debug_assert_eq!(self.slots[prev].next, slot);

        if prev == slot {
            self.rear = None;
        } else {
            self.slots[prev].next = self.slots[slot].next;
            if self.rear == Some(slot) {
                self.rear = Some(prev);
            }
        }

        self.size -= 1;
        self.free.push(slot);
        self.slots[slot].tree.take().unwrap_or_else(|| unreachable!())
    }

    /// Add a tree to the back of the list
    pub fn append(&mut self, tree: PartialTree) {
        let slot = self.alloc(tree);

        if let Some(rear) = self.rear {
            self.slots[slot].next = self.slots[rear].next;
            self.slots[rear].next = slot;
        }

        self.rear = Some(slot);
        self.size += 1;
    }

    /// Remove the tree at the front of the list
    ///
    /// # Errors
    /// This method fails if the list is empty.
    pub fn remove(&mut self) -> Result<PartialTree, ListError> {
        let rear = self.rear.ok_or(ListError::Empty)?;
        let front = self.slots[rear].next;

        Ok(self.unlink(rear, front))
    }

    /// Remove the first tree, scanning from the front, that satisfies `pred`
    pub fn remove_where<F: FnMut(&PartialTree) -> bool>(
        &mut self,
        mut pred: F,
    ) -> Option<PartialTree> {
        let mut prev = self.rear?;

        for _ in 0..self.size {
            let slot = self.slots[prev].next;
            if pred(self.tree(slot)) {
                return Some(self.unlink(prev, slot));
            }

            prev = slot;
        }

        None
    }

    /// Remove the tree whose fragment contains `vertex`
    ///
    /// # Errors
    /// This method fails if no tree in the list represents the fragment of
    /// the given vertex.
    pub fn remove_tree_containing(&mut self, vertex: VertexId) -> Result<PartialTree, ListError> {
        let root = self
            .forest
            .find(vertex)
            .map_err(|_| ListError::NoSuchFragment(vertex))?;

        self.remove_where(|t| t.root() == root)
            .ok_or(ListError::NoSuchFragment(vertex))
    }

    /// Iterate over the trees from front to rear
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            slot: self.rear.map(|r| self.slots[r].next),
            rest: self.size,
        }
    }

    /// Verify the ring structure: walking `len` links from the rear visits
    /// only occupied slots, each once, and returns to the rear
    #[must_use]
    pub fn check_ring(&self) -> bool {
        let Some(rear) = self.rear else {
            return self.size == 0;
        };

        let occupied = self.slots.iter().filter(|s| s.tree.is_some()).count();
        if occupied != self.size || self.size == 0 {
            return false;
        }

        let mut seen = vec![false; self.slots.len()];
        let mut slot = rear;
        for _ in 0..self.size {
            slot = self.slots[slot].next;
            if seen[slot] || self.slots[slot].tree.is_none() {
                return false;
            }
            seen[slot] = true;
        }

        slot == rear
    }
}

impl<'a> IntoIterator for &'a PartialTreeList {
    type IntoIter = Iter<'a>;
    type Item = &'a PartialTree;

    fn into_iter(self) -> Iter<'a> { self.iter() }
}

/// A single pass over a [`PartialTreeList`], front to rear
#[derive(Debug, Clone)]
#[must_use]
#[allow(missing_copy_implementations)]
pub struct Iter<'a> {
    list: &'a PartialTreeList,
    slot: Option<usize>,
    rest: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PartialTree;

    fn next(&mut self) -> Option<&'a PartialTree> {
        if self.rest == 0 {
            return None;
        }

        let slot = self.slot?;
        let list = self.list;
        self.slot = Some(list.slots[slot].next);
        self.rest -= 1;

        Some(list.tree(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.rest, Some(self.rest)) }
}

impl ExactSizeIterator for Iter<'_> {}
