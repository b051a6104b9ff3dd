//! Partial trees and their queues of candidate arcs

use crate::{
    graph::{Arc, VertexId},
    heap::MinHeap,
    union_find::{FragmentForest, NoVertex},
};

/// A min-queue of arcs leaving a fragment
///
/// Every arc in the queue has at least one endpoint inside the owning
/// fragment.  Merges make some arcs internal to the fragment; these stale
/// arcs are never searched for eagerly.  They are dropped only when they
/// surface at the front of the queue during [`peek_crossing`].
///
/// [`peek_crossing`]: ArcQueue::peek_crossing
#[derive(Debug, Clone, Default)]
#[repr(transparent)]
pub struct ArcQueue(MinHeap<Arc>);

impl ArcQueue {
    #[must_use]
    #[inline]
    pub fn new() -> Self { Self::default() }

    /// The number of queued arcs, including any stale ones
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    #[inline]
    pub fn insert(&mut self, arc: Arc) { self.0.insert(arc); }

    /// The cheapest arc regardless of staleness
    #[must_use]
    #[inline]
    pub fn peek_min(&self) -> Option<&Arc> { self.0.peek_min() }

    /// Discard stale arcs until the cheapest remaining arc crosses out of the
    /// fragment rooted at `root`, then return it without removing it
    ///
    /// Returns `Ok(None)` once the queue is exhausted.
    ///
    /// # Errors
    /// This method fails if an arc names a vertex the forest does not track.
    pub fn peek_crossing(
        &mut self,
        forest: &FragmentForest,
        root: VertexId,
    ) -> Result<Option<&Arc>, NoVertex> {
        while let Some(&arc) = self.0.peek_min() {
            if forest.find(arc.v2())? != root || forest.find(arc.v1())? != root {
                break;
            }

            tracing::trace!(?arc, ?root, "Discarding stale arc");
            self.0.delete_min();
        }

        Ok(self.0.peek_min())
    }

    /// Like [`peek_crossing`](Self::peek_crossing), but removes the arc
    ///
    /// # Errors
    /// This method fails if an arc names a vertex the forest does not track.
    pub fn pop_crossing(
        &mut self,
        forest: &FragmentForest,
        root: VertexId,
    ) -> Result<Option<Arc>, NoVertex> {
        if self.peek_crossing(forest, root)?.is_none() {
            return Ok(None);
        }

        Ok(self.0.delete_min())
    }

    /// Take every arc queued in `other`
    #[inline]
    pub fn absorb(&mut self, other: &mut Self) { self.0.merge(&mut other.0); }
}

impl Extend<Arc> for ArcQueue {
    fn extend<I: IntoIterator<Item = Arc>>(&mut self, iter: I) { self.0.extend(iter); }
}

impl FromIterator<Arc> for ArcQueue {
    fn from_iter<I: IntoIterator<Item = Arc>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

/// One fragment of the growing spanning tree
#[derive(Debug, Clone)]
pub struct PartialTree {
    root: VertexId,
    arcs: ArcQueue,
}

impl PartialTree {
    /// A single-vertex fragment with no candidate arcs
    #[must_use]
    pub fn new(root: VertexId) -> Self {
        Self {
            root,
            arcs: ArcQueue::new(),
        }
    }

    #[must_use]
    pub fn with_arcs(root: VertexId, arcs: ArcQueue) -> Self { Self { root, arcs } }

    /// The vertex representing this fragment
    #[must_use]
    #[inline]
    pub fn root(&self) -> VertexId { self.root }

    #[must_use]
    #[inline]
    pub fn arcs(&self) -> &ArcQueue { &self.arcs }

    #[must_use]
    #[inline]
    pub fn arcs_mut(&mut self) -> &mut ArcQueue { &mut self.arcs }

    /// Fold `other` into this fragment.  `root` is the representative of the
    /// combined fragment, as reported by the forest union.
    pub fn merge(&mut self, mut other: PartialTree, root: VertexId) {
        debug_assert!(root == self.root || root == other.root);

        self.arcs.absorb(&mut other.arcs);
        self.root = root;
    }
}
