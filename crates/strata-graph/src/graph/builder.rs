//! Mutable staging area that freezes into a [`Graph`].

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument};

use super::{AdjacencyMap, EdgeMap, Graph, Vertex};

/// Incremental graph construction.
///
/// Repeated edges between the same ordered pair are folded with the
/// combinator given at construction (commonly addition). [`GraphBuilder::build`]
/// consumes the builder, so no mutable handle outlives the frozen graph.
///
/// Not meant to be shared across threads while edges are being added.
#[derive(Debug, Clone)]
pub struct GraphBuilder<T, F = fn(i64, i64) -> i64> {
    combine: F,
    map: IndexMap<T, IndexMap<T, i64>>,
}

impl<T: Eq + Hash + Clone> GraphBuilder<T> {
    /// A builder that sums the weights of repeated edges (saturating).
    #[must_use]
    pub fn summing() -> Self {
        Self::new(i64::saturating_add)
    }
}

impl<T, F> GraphBuilder<T, F>
where
    T: Eq + Hash + Clone,
    F: Fn(i64, i64) -> i64,
{
    /// Create a builder folding repeated edge weights with `combine(old, new)`.
    pub fn new(combine: F) -> Self {
        Self {
            combine,
            map: IndexMap::new(),
        }
    }

    /// Make sure `payload` becomes a vertex, even without edges.
    pub fn add_vertex(&mut self, payload: T) {
        self.ensure_vertex(payload);
    }

    fn ensure_vertex(&mut self, payload: T) -> &mut IndexMap<T, i64> {
        self.map.entry(payload).or_default()
    }

    /// Add `from -> to` with `weight`, combining with an existing weight.
    pub fn merge_edge(&mut self, from: T, to: T, weight: i64) {
        self.ensure_vertex(to.clone());
        let combine = &self.combine;
        let targets = self.map.entry(from).or_default();
        targets
            .entry(to)
            .and_modify(|existing| *existing = combine(*existing, weight))
            .or_insert(weight);
    }

    /// Add an edge of weight 1 from `from` to every target.
    ///
    /// Repeated targets accumulate by addition, independent of the
    /// builder's combinator.
    pub fn add<I>(&mut self, from: T, targets: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.ensure_vertex(from.clone());
        for to in targets {
            self.ensure_vertex(to.clone());
            let count = self.ensure_vertex(from.clone()).entry(to).or_insert(0);
            *count = count.saturating_add(1);
        }
    }

    /// Outgoing edges recorded so far for `payload`.
    #[must_use]
    pub fn edges<Q>(&self, payload: &Q) -> Option<&IndexMap<T, i64>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(payload)
    }

    /// Iterate over `(payload, targets)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &IndexMap<T, i64>)> {
        self.map.iter()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.map.len()
    }

    /// Freeze into an immutable [`Graph`].
    ///
    /// Vertices and edges keep first-insertion order; nothing is re-sorted.
    #[must_use]
    #[instrument(skip(self), fields(vertices = self.map.len()))]
    pub fn build(self) -> Graph<T> {
        let mut payloads: IndexSet<T> = IndexSet::with_capacity(self.map.len());
        for payload in self.map.keys() {
            payloads.insert(payload.clone());
        }

        let mut edges = AdjacencyMap::new();
        for (from, targets) in self.map {
            if targets.is_empty() {
                continue;
            }
            let Some(from_index) = payloads.get_index_of(&from) else {
                continue;
            };
            let local: EdgeMap = targets
                .into_iter()
                .filter_map(|(to, weight)| {
                    payloads
                        .get_index_of(&to)
                        .map(|index| (Vertex::new(index), weight))
                })
                .collect();
            edges.insert(Vertex::new(from_index), local);
        }

        let vertices: IndexSet<Vertex> = (0..payloads.len()).map(Vertex::new).collect();
        debug!(
            vertices = vertices.len(),
            edges = edges.values().map(IndexMap::len).sum::<usize>(),
            "graph built"
        );
        Graph::from_parts(Arc::new(payloads), Arc::new(vertices), edges)
    }
}
