//! Whole-graph edge queries: incoming weight, weight-sorted edge stream and
//! the petgraph view.

use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};

use super::{AdjacencyMap, Edge, Graph, Vertex};

/// Edges in a caller-defined weight order.
///
/// Sorting needs the whole edge set, so the sequence is materialized once
/// and then drained; it cannot be restarted.
#[derive(Debug, Clone)]
pub struct SortedEdges {
    inner: std::vec::IntoIter<Edge>,
}

impl SortedEdges {
    /// The next edge as a single-edge adjacency fragment `{from: {to: weight}}`.
    pub fn next_fragment(&mut self) -> Option<AdjacencyMap> {
        self.next().map(|edge| {
            let mut fragment = AdjacencyMap::new();
            fragment.entry(edge.from).or_default().insert(edge.to, edge.weight);
            fragment
        })
    }
}

impl Iterator for SortedEdges {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SortedEdges {}

impl<T> Graph<T> {
    /// Combined weight of all edges ending in each vertex.
    ///
    /// Vertices without incoming edges are absent from the result. Used as a
    /// cheap "how depended-upon is this vertex" measure.
    #[must_use]
    pub fn incoming_vertex_weight<F>(&self, combine: F) -> IndexMap<Vertex, i64>
    where
        F: Fn(i64, i64) -> i64,
    {
        let mut incoming: IndexMap<Vertex, i64> = IndexMap::new();
        for edge in self.edges_iter() {
            incoming
                .entry(edge.to)
                .and_modify(|total| *total = combine(*total, edge.weight))
                .or_insert(edge.weight);
        }
        incoming
    }

    /// All edges sorted by weight under `compare`, optionally restricted to
    /// weights strictly below `limit`.
    ///
    /// The sort is stable: edges of equal weight keep insertion order.
    pub fn edge_iterator<C>(&self, mut compare: C, limit: Option<i64>) -> SortedEdges
    where
        C: FnMut(&i64, &i64) -> Ordering,
    {
        let mut edges: Vec<Edge> = self
            .edges_iter()
            .filter(|edge| limit.is_none_or(|limit| edge.weight < limit))
            .collect();
        edges.sort_by(|a, b| compare(&a.weight, &b.weight));
        SortedEdges {
            inner: edges.into_iter(),
        }
    }

    /// Copy the graph into a petgraph [`DiGraph`] whose node weights are the
    /// vertex handles and edge weights the edge weights.
    ///
    /// Node order follows vertex insertion order. The returned map resolves a
    /// vertex to its node index.
    #[must_use]
    pub fn to_petgraph(&self) -> (DiGraph<Vertex, i64>, HashMap<Vertex, NodeIndex>) {
        let mut graph = DiGraph::with_capacity(self.vertex_count(), self.edge_count());
        let mut node_map = HashMap::with_capacity(self.vertex_count());
        for vertex in self.vertices() {
            node_map.insert(vertex, graph.add_node(vertex));
        }
        for edge in self.edges_iter() {
            if let (Some(&from), Some(&to)) = (node_map.get(&edge.from), node_map.get(&edge.to)) {
                graph.add_edge(from, to, edge.weight);
            }
        }
        (graph, node_map)
    }
}
