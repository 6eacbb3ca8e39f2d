//! Copy-producing transformations: reversal, induced sub-graphs, pruning.
//!
//! None of these mutate the source graph. The payload arena is always
//! shared; the vertex set is shared where it does not change, and the
//! adjacency map is always freshly allocated.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use super::{AdjacencyMap, EdgeMap, Graph, Vertex};

impl<T> Graph<T> {
    /// Reverse every edge whose *original target* satisfies `predicate`.
    ///
    /// The result answers "who depends on me", restricted to the vertices
    /// accepted by `predicate`. Edges into rejected targets are dropped.
    #[must_use]
    pub fn reverse<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        let mut reversed = AdjacencyMap::new();
        for edge in self.edges_iter() {
            if predicate(self.payload(edge.to)) {
                reversed
                    .entry(edge.to)
                    .or_default()
                    .insert(edge.from, edge.weight);
            }
        }
        Self::from_parts(
            Arc::clone(&self.payloads),
            Arc::clone(&self.vertices),
            reversed,
        )
    }

    /// Induced sub-graph on `subset`: only member vertices, only edges with
    /// both endpoints in `subset`.
    ///
    /// Vertices keep the order in which `subset` lists them.
    ///
    /// # Panics
    ///
    /// Panics if `subset` contains a vertex that is not a member.
    #[must_use]
    pub fn sub_graph(&self, subset: &IndexSet<Vertex>) -> Self {
        let mut edges = AdjacencyMap::new();
        for &vertex in subset {
            let Some(targets) = self.edges(vertex) else {
                continue;
            };
            let local: EdgeMap = targets
                .iter()
                .filter(|(to, _)| subset.contains(*to))
                .map(|(&to, &weight)| (to, weight))
                .collect();
            if !local.is_empty() {
                edges.insert(vertex, local);
            }
        }
        Self::from_parts(
            Arc::clone(&self.payloads),
            Arc::new(subset.clone()),
            edges,
        )
    }

    /// Reversed sub-graph seen from `subset`.
    ///
    /// Every outgoing edge `v -> to` of a vertex `v` in `subset` becomes
    /// `to -> v`, whether or not `to` is in `subset`. Targets outside
    /// `subset` are appended to the vertex set so every edge endpoint stays
    /// a member.
    ///
    /// # Panics
    ///
    /// Panics if `subset` contains a vertex that is not a member.
    #[must_use]
    pub fn reverse_sub_graph(&self, subset: &IndexSet<Vertex>) -> Self {
        let mut vertices = subset.clone();
        let mut edges = AdjacencyMap::new();
        for &vertex in subset {
            let Some(targets) = self.edges(vertex) else {
                continue;
            };
            for (&to, &weight) in targets {
                vertices.insert(to);
                edges.entry(to).or_default().insert(vertex, weight);
            }
        }
        Self::from_parts(Arc::clone(&self.payloads), Arc::new(vertices), edges)
    }

    /// Remove the edges `v -> t` for every `t` in `to_remove[v]`.
    ///
    /// A vertex whose last outgoing edge is removed disappears from the
    /// adjacency map but stays a vertex.
    #[must_use]
    pub fn with_fewer_edges(&self, to_remove: &IndexMap<Vertex, IndexSet<Vertex>>) -> Self {
        self.prune(|from, to| to_remove.get(&from).is_some_and(|targets| targets.contains(&to)))
    }

    /// Like [`Graph::with_fewer_edges`], taking the edges to remove as an
    /// adjacency map; the weights in `to_remove` are ignored.
    #[must_use]
    pub fn with_fewer_edges_map(&self, to_remove: &AdjacencyMap) -> Self {
        self.prune(|from, to| {
            to_remove
                .get(&from)
                .is_some_and(|targets| targets.contains_key(&to))
        })
    }

    fn prune<R>(&self, remove: R) -> Self
    where
        R: Fn(Vertex, Vertex) -> bool,
    {
        let mut edges = AdjacencyMap::new();
        for (&from, targets) in &self.edges {
            let kept: EdgeMap = targets
                .iter()
                .filter(|(to, _)| !remove(from, **to))
                .map(|(&to, &weight)| (to, weight))
                .collect();
            if !kept.is_empty() {
                edges.insert(from, kept);
            }
        }
        Self::from_parts(
            Arc::clone(&self.payloads),
            Arc::clone(&self.vertices),
            edges,
        )
    }
}
