//! Weighted undirected graphs and their plain-text representation

use std::{cmp::Ordering, fmt, num::ParseIntError, str::FromStr};

use hashbrown::HashMap;

/// Edge weight type
pub type Weight = i64;

/// Index of a vertex within its [`Graph`]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VertexId(usize);

impl VertexId {
    #[must_use]
    #[inline]
    pub const fn new(id: usize) -> Self { Self(id) }

    #[must_use]
    #[inline]
    pub fn id(self) -> usize { self.0 }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "v{}", self.0) }
}

impl From<VertexId> for usize {
    fn from(value: VertexId) -> Self { value.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub vertex: VertexId,
    pub weight: Weight,
}

#[derive(Debug, Clone)]
pub struct Vertex {
    name: String,
    neighbors: Vec<Neighbor>,
}

impl Vertex {
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    #[inline]
    pub fn neighbors(&self) -> &[Neighbor] { &self.neighbors }
}

/// A weighted edge, materialized from one endpoint's adjacency
///
/// Arcs order by weight first.  Ties fall back to the endpoint IDs so that
/// every heap of arcs has a deterministic minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    v1: VertexId,
    v2: VertexId,
    weight: Weight,
}

impl Arc {
    #[must_use]
    #[inline]
    pub const fn new(v1: VertexId, v2: VertexId, weight: Weight) -> Self { Self { v1, v2, weight } }

    #[must_use]
    #[inline]
    pub fn v1(self) -> VertexId { self.v1 }

    #[must_use]
    #[inline]
    pub fn v2(self) -> VertexId { self.v2 }

    #[must_use]
    #[inline]
    pub fn weight(self) -> Weight { self.weight }

    /// The endpoints with the smaller ID first
    #[must_use]
    pub fn endpoints(self) -> (VertexId, VertexId) {
        if self.v1 <= self.v2 {
            (self.v1, self.v2)
        } else {
            (self.v2, self.v1)
        }
    }
}

impl Ord for Arc {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.v1.cmp(&other.v1))
            .then_with(|| self.v2.cmp(&other.v2))
    }
}

impl PartialOrd for Arc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Vertex name {0:?} is already in use")]
    DuplicateName(String),
    #[error("No vertex found with ID {0:?}")]
    UnknownVertex(VertexId),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing vertex count")]
    MissingCount,
    #[error("Invalid vertex count on line {line}")]
    BadCount {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("Expected {expected} vertex names, found {found}")]
    MissingVertices { expected: usize, found: usize },
    #[error("Duplicate vertex {name:?} on line {line}")]
    DuplicateVertex { line: usize, name: String },
    #[error("Expected `<vertex> <vertex> <weight>` on line {line}")]
    MalformedEdge { line: usize },
    #[error("Unknown vertex {name:?} on line {line}")]
    UnknownVertex { line: usize, name: String },
    #[error("Invalid edge weight on line {line}")]
    BadWeight {
        line: usize,
        #[source]
        source: ParseIntError,
    },
}

/// A connected-or-not weighted undirected graph with a fixed vertex order
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
}

impl Graph {
    #[must_use]
    #[inline]
    pub fn builder() -> GraphBuilder { GraphBuilder::default() }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize { self.vertices.len() }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    #[must_use]
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> { self.vertices.get(id.0) }

    /// Iterate over all vertices in graph order
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i), v))
    }

    /// Look up a vertex by name.  This is a linear scan; use a
    /// [`GraphBuilder`] for repeated lookups.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| v.name == name)
            .map(VertexId)
    }

    /// Materialize one arc per adjacency entry of the given vertex, with the
    /// vertex itself as the first endpoint
    pub fn arcs_from(&self, id: VertexId) -> impl Iterator<Item = Arc> {
        self.vertex(id)
            .into_iter()
            .flat_map(move |v| v.neighbors.iter().map(move |n| Arc::new(id, n.vertex, n.weight)))
    }

    /// Count each undirected edge once
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.vertices()
            .map(|(id, v)| v.neighbors.iter().filter(|n| n.vertex >= id).count())
            .sum()
    }

    /// Sum arc weights, widened so that no set of `i64` weights a graph can
    /// hold overflows
    #[must_use]
    pub fn total_weight<'a, I: IntoIterator<Item = &'a Arc>>(arcs: I) -> i128 {
        arcs.into_iter().map(|a| i128::from(a.weight)).sum()
    }

    #[must_use]
    pub fn display_arc(&self, arc: Arc) -> DisplayArc<'_> { DisplayArc(self, arc) }
}

#[derive(Clone, Copy)]
pub struct DisplayArc<'a>(&'a Graph, Arc);

impl fmt::Debug for DisplayArc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(self, f) }
}

impl fmt::Display for DisplayArc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(graph, arc) = *self;
        let name = |id| graph.vertex(id).map_or("?", Vertex::name);

        write!(f, "{} -- {} ({})", name(arc.v1), name(arc.v2), arc.weight)
    }
}

#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    names: HashMap<String, VertexId>,
}

impl GraphBuilder {
    /// Add a new, unconnected vertex
    ///
    /// # Errors
    /// This method fails if another vertex already has the given name.
    pub fn add_vertex<S: Into<String>>(&mut self, name: S) -> Result<VertexId, BuildError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(BuildError::DuplicateName(name));
        }

        let id = VertexId(self.vertices.len());
        self.names.insert(name.clone(), id);
        self.vertices.push(Vertex {
            name,
            neighbors: vec![],
        });

        Ok(id)
    }

    #[must_use]
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<VertexId> { self.names.get(name).copied() }

    /// Add an undirected edge, recorded in the adjacency of both endpoints
    ///
    /// # Errors
    /// This method fails if either endpoint was not created by this builder.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: Weight) -> Result<(), BuildError> {
        for id in [a, b] {
            if id.0 >= self.vertices.len() {
                return Err(BuildError::UnknownVertex(id));
            }
        }

        self.vertices[a.0].neighbors.push(Neighbor { vertex: b, weight });
        if a != b {
            self.vertices[b.0].neighbors.push(Neighbor { vertex: a, weight });
        }

        Ok(())
    }

    #[must_use]
    pub fn build(self) -> Graph {
        Graph {
            vertices: self.vertices,
        }
    }
}

impl FromStr for Graph {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (line, count) = lines.next().ok_or(ParseError::MissingCount)?;
        let count: usize = count
            .parse()
            .map_err(|source| ParseError::BadCount { line, source })?;

        let mut builder = Graph::builder();

        for found in 0..count {
            let (line, name) = lines.next().ok_or(ParseError::MissingVertices {
                expected: count,
                found,
            })?;

            builder.add_vertex(name).map_err(|_| ParseError::DuplicateVertex {
                line,
                name: name.into(),
            })?;
        }

        for (line, edge) in lines {
            let mut parts = edge.split_whitespace();
            let (Some(a), Some(b), Some(weight), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(ParseError::MalformedEdge { line });
            };

            let vertex = |name: &str| {
                builder.lookup(name).ok_or_else(|| ParseError::UnknownVertex {
                    line,
                    name: name.into(),
                })
            };
            let a = vertex(a)?;
            let b = vertex(b)?;
            let weight = weight
                .parse()
                .map_err(|source| ParseError::BadWeight { line, source })?;

            builder
                .add_edge(a, b, weight)
                .unwrap_or_else(|_| unreachable!());
        }

        Ok(builder.build())
    }
}
