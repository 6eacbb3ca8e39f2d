//! Vertex handles and edge triples.

use std::fmt;

/// Identity of a node in a [`super::Graph`].
///
/// A vertex is an index into the payload arena of the graph it was built
/// in. Equal payloads inside one graph always map to the same vertex, and
/// every graph derived from it (reverse, sub-graph, pruned) keeps the same
/// handles. Handles from unrelated builds must not be mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex(usize);

impl Vertex {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the payload in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed, weighted edge `from -> to`.
///
/// Edges are not stored as values; they are materialized on demand from the
/// adjacency map, which holds at most one weight per ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: i64,
}

impl Edge {
    #[must_use]
    pub const fn new(from: Vertex, to: Vertex, weight: i64) -> Self {
        Self { from, to, weight }
    }
}
