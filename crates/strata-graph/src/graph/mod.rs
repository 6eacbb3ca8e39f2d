//! Immutable weighted graph over arbitrary payloads.
//!
//! # Overview
//!
//! A [`Graph`] maps payloads to [`Vertex`] handles and stores an adjacency
//! map `from -> (to -> weight)`. Both levels keep first-insertion order, so
//! every traversal, rendering and derived graph is deterministic for a given
//! construction sequence.
//!
//! Graphs are built once through [`GraphBuilder`] (or
//! [`Graph::from_adjacency`]) and never mutated afterwards. Transformations
//! ([`Graph::reverse`], [`Graph::sub_graph`], [`Graph::with_fewer_edges`],
//! ...) return new graphs that share the payload arena with their source and
//! allocate a fresh adjacency map.
//!
//! ## Vertex identity
//!
//! Payloads live in an append-only arena; a [`Vertex`] is an index into it.
//! The arena is shared behind an [`Arc`], so a graph and everything derived
//! from it agree on vertex identity and can be read from several threads.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A depends on B". Sinks (vertices without outgoing
//! edges) are the leaves that the decomposition places first.

#![allow(clippy::module_name_repetitions)]

mod builder;
mod edges;
mod transform;
mod vertex;

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::error::GraphError;

pub use builder::GraphBuilder;
pub use edges::SortedEdges;
pub use vertex::{Edge, Vertex};

/// Outgoing edges of one vertex: `target -> weight`.
pub type EdgeMap = IndexMap<Vertex, i64>;

/// Full adjacency: `from -> (to -> weight)`.
pub type AdjacencyMap = IndexMap<Vertex, EdgeMap>;

/// An immutable, weighted, directed graph.
///
/// Invariants:
/// - every edge endpoint is a member vertex;
/// - at most one weight per ordered `(from, to)` pair;
/// - a vertex without outgoing edges has no entry in the adjacency map.
///
/// Self-loops are allowed.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    /// Payload arena shared by every graph derived from the same build.
    payloads: Arc<IndexSet<T>>,
    /// Member vertices, in insertion order.
    vertices: Arc<IndexSet<Vertex>>,
    edges: AdjacencyMap,
}

impl<T> Graph<T> {
    pub(crate) fn from_parts(
        payloads: Arc<IndexSet<T>>,
        vertices: Arc<IndexSet<Vertex>>,
        edges: AdjacencyMap,
    ) -> Self {
        Self {
            payloads,
            vertices,
            edges,
        }
    }

    /// Return the payload carried by `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` was not created by this graph's build.
    #[must_use]
    pub fn payload(&self, vertex: Vertex) -> &T {
        match self.payloads.get_index(vertex.index()) {
            Some(payload) => payload,
            None => panic!("{vertex} does not belong to this graph's build"),
        }
    }

    /// Return `true` if `vertex` is a member of this graph.
    #[must_use]
    pub fn contains(&self, vertex: Vertex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Iterate over member vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = Vertex> + '_ {
        self.vertices.iter().copied()
    }

    /// The member vertex set, in insertion order.
    #[must_use]
    pub fn vertex_set(&self) -> &IndexSet<Vertex> {
        &self.vertices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Outgoing edges of `vertex`, or `None` when it has none.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a member of this graph. Check with
    /// [`Graph::contains`] first when the vertex comes from elsewhere.
    #[must_use]
    pub fn edges(&self, vertex: Vertex) -> Option<&EdgeMap> {
        assert!(
            self.contains(vertex),
            "{vertex} is not a vertex of this graph"
        );
        self.edges.get(&vertex)
    }

    /// Weight of the edge `from -> to`, if present.
    #[must_use]
    pub fn weight(&self, from: Vertex, to: Vertex) -> Option<i64> {
        self.edges.get(&from)?.get(&to).copied()
    }

    /// The raw adjacency map, for export and interop.
    #[must_use]
    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.edges
    }

    /// Iterate over all edges, grouped by origin in insertion order.
    pub fn edges_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().flat_map(|(&from, targets)| {
            targets
                .iter()
                .map(move |(&to, &weight)| Edge::new(from, to, weight))
        })
    }

    /// Sum of the weights of the outgoing edges of `vertex` (0 for sinks).
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a member of this graph.
    #[must_use]
    pub fn outgoing_weight(&self, vertex: Vertex) -> i64 {
        self.edges(vertex)
            .map_or(0, |targets| targets.values().copied().sum())
    }
}

impl<T: Eq + Hash> Graph<T> {
    /// Look up the vertex carrying `payload`.
    ///
    /// Returns `None` when the payload is unknown or its vertex is not part
    /// of this (possibly derived) graph.
    #[must_use]
    pub fn vertex<Q>(&self, payload: &Q) -> Option<Vertex>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let vertex = Vertex::new(self.payloads.get_index_of(payload)?);
        self.contains(vertex).then_some(vertex)
    }

    /// Like [`Graph::vertex`], but reports a missing payload as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if no member vertex carries
    /// `payload`.
    pub fn require_vertex<Q>(&self, payload: &Q) -> Result<Vertex, GraphError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        self.vertex(payload)
            .ok_or_else(|| GraphError::UnknownVertex(payload.to_string()))
    }
}

impl<T: Eq + Hash + Clone> Graph<T> {
    /// Build a graph from a nested `payload -> (payload -> weight)` mapping.
    ///
    /// Keys become vertices in iteration order; targets that are not keys
    /// are added as vertices when first seen. A repeated pair keeps the
    /// last weight.
    pub fn from_adjacency<I, J>(initial: I) -> Self
    where
        I: IntoIterator<Item = (T, J)>,
        J: IntoIterator<Item = (T, i64)>,
    {
        let mut builder = GraphBuilder::new(|_: i64, latest: i64| latest);
        for (from, targets) in initial {
            builder.add_vertex(from.clone());
            for (to, weight) in targets {
                builder.merge_edge(from.clone(), to, weight);
            }
        }
        builder.build()
    }
}

impl<T: fmt::Display> Graph<T> {
    /// Render every edge as `from->weight->to`, sorted, joined by `delimiter`.
    #[must_use]
    pub fn render(&self, delimiter: &str) -> String {
        self.rendered_edges().join(delimiter)
    }

    /// BLAKE3 hash of the sorted edge list, for cache invalidation.
    ///
    /// Equal for graphs that render the same edges, regardless of insertion
    /// order.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for line in self.rendered_edges() {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        format!("blake3:{}", hasher.finalize().to_hex())
    }

    fn rendered_edges(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .edges_iter()
            .map(|edge| {
                format!(
                    "{}->{}->{}",
                    self.payload(edge.from),
                    edge.weight,
                    self.payload(edge.to)
                )
            })
            .collect();
        lines.sort_unstable();
        lines
    }
}

impl<T: fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(", "))
    }
}

impl<T> PartialEq for Graph<T> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.edges == other.edges
    }
}

impl<T> Eq for Graph<T> {}
