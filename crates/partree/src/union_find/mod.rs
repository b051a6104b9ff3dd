//! Fragment identity: a disjoint-set forest over graph vertices

use std::{cell::Cell, fmt, iter, slice};

use disjoint_set::ForestNodes;

use crate::graph::VertexId;

pub mod disjoint_set;

pub type NoVertex = disjoint_set::NoNode<VertexId>;
pub type Unioned = disjoint_set::Unioned<VertexId>;

#[derive(Clone)]
struct Node {
    parent: Cell<usize>,
    size: usize,
}

/// Tracks which fragment each vertex belongs to.  Every vertex starts out as
/// the root of its own single-vertex fragment.
#[derive(Default, Clone)]
pub struct FragmentForest(Vec<Node>);

impl fmt::Debug for FragmentForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_map();

        for i in 0..self.0.len() {
            let id = VertexId::new(i);
            let root = self.find(id).unwrap_or_else(|_| unreachable!());
            f.entry(&id, &(root != id).then_some(root));
        }

        f.finish()
    }
}

impl FragmentForest {
    #[must_use]
    #[inline]
    pub fn new() -> Self { Self::default() }

    /// Construct a forest of `len` singleton fragments
    #[must_use]
    pub fn with_singletons(len: usize) -> Self {
        Self(
            (0..len)
                .map(|i| Node {
                    parent: i.into(),
                    size: 1,
                })
                .collect(),
        )
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Add a new singleton fragment, returning its vertex ID
    pub fn add(&mut self) -> VertexId {
        let key = self.0.len();
        self.0.push(Node {
            parent: key.into(),
            size: 1,
        });
        VertexId::new(key)
    }

    #[inline]
    pub fn roots(&self) -> Roots<'_> { Roots(self.0.iter().enumerate()) }

    /// Find the root vertex of the fragment containing `vertex`, flattening
    /// the path walked along the way
    ///
    /// # Errors
    /// This method fails if the vertex is not tracked by this forest.
    #[inline]
    pub fn find(&self, vertex: VertexId) -> Result<VertexId, NoVertex> {
        disjoint_set::find_root(self, vertex)
    }

    /// Returns true if both vertices resolve to the same root
    ///
    /// # Errors
    /// This method fails if either vertex is not tracked by this forest.
    pub fn same(&self, a: VertexId, b: VertexId) -> Result<bool, NoVertex> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// The number of vertices in the fragment containing `vertex`
    ///
    /// # Errors
    /// This method fails if the vertex is not tracked by this forest.
    pub fn size_of(&self, vertex: VertexId) -> Result<usize, NoVertex> {
        let root = self.find(vertex)?;
        Ok(self.0[root.id()].size)
    }

    /// Merge the fragments containing the two given vertices, keeping the
    /// root of the larger one
    ///
    /// # Errors
    /// This method fails if either vertex is not tracked by this forest.
    #[inline]
    pub fn union(&mut self, a: VertexId, b: VertexId) -> Result<Unioned, NoVertex> {
        disjoint_set::union_by_size(self, a, b)
    }
}

impl ForestNodes<VertexId> for FragmentForest {
    #[inline]
    fn parent(&self, key: VertexId) -> Option<VertexId> {
        Some(VertexId::new(self.0.get(key.id())?.parent.get()))
    }

    #[inline]
    fn set_parent(&self, key: VertexId, parent: VertexId) {
        self.0
            .get(key.id())
            .unwrap_or_else(|| unreachable!())
            .parent
            .set(parent.id());
    }

    #[inline]
    fn size(&self, root: VertexId) -> Option<usize> { Some(self.0.get(root.id())?.size) }

    fn link(&mut self, root: VertexId, absorbed: VertexId) {
        let absorbed = self
            .0
            .get_mut(absorbed.id())
            .unwrap_or_else(|| unreachable!());
        absorbed.parent.set(root.id());
        let absorbed_size = absorbed.size;

        let node = self.0.get_mut(root.id()).unwrap_or_else(|| unreachable!());
        node.size = node
            .size
            .checked_add(absorbed_size)
            .unwrap_or_else(|| unreachable!());
    }
}

#[derive(Debug, Clone)]
#[must_use]
#[repr(transparent)]
pub struct Roots<'a>(iter::Enumerate<slice::Iter<'a, Node>>);

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("parent", &self.parent.get())
            .field("size", &self.size)
            .finish()
    }
}

impl Iterator for Roots<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        loop {
            let (id, node) = self.0.next()?;

            if node.parent.get() == id {
                break Some(VertexId::new(id));
            }
        }
    }
}
