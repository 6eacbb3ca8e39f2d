//! Single-source shortest paths with caller-defined path state.
//!
//! # Overview
//!
//! Classic Dijkstra over dense vertex ids `0..n`, using an addressable
//! min-heap with decrease-key. Each vertex carries not only a distance but a
//! [`Connection`]: an immutable, caller-defined value describing *why* the
//! best path to it is valid (for example which kinds of dependency edges it
//! crossed).
//!
//! # Relaxation
//!
//! For an edge `u -> v` with value [`EdgeValue`] `(w, ec)`:
//!
//! 1. If `u` is unreachable, so is `v` through this edge.
//! 2. Without an edge connection the current connection passes through.
//!    Otherwise `ec.next(u, v, current)` decides:
//!    - [`Accept::Reject`]: the edge contributes nothing;
//!    - [`Accept::NoConnection`]: the path continues with the solver's
//!      initial connection, if the edge allows it, else it is rejected;
//!    - [`Accept::Next`]: the path continues with the new connection.
//! 3. A strictly shorter candidate replaces the best entry of `v`.
//! 4. An equally short candidate is merged into it with
//!    [`Connection::merge`], so equally cheap explanations are all kept.
//!
//! With [`Unconstrained`] every edge is accepted and the algorithm is plain
//! Dijkstra. Weights are expected to be non-negative.
//!
//! # Dense ids
//!
//! The solver only sees ids. [`DenseIndex`] maps the vertices of a
//! [`Graph`] onto `0..n` and produces edge values for them.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::error::GraphError;
use crate::graph::{Edge, Graph, Vertex};

use super::heap::IndexedMinHeap;

/// Distance reported for vertices that cannot be reached.
pub const NO_PATH: i64 = i64::MAX;

/// Outcome of extending a connection across one edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accept<C> {
    /// The edge may not be used on this path.
    Reject,
    /// The edge may be used, but the path loses its connection information.
    NoConnection,
    /// The edge may be used; the path continues with this connection.
    Next(C),
}

/// Path state threaded through the relaxation.
pub trait Connection: Clone + fmt::Debug {
    /// Extend `current` (the state at `from`) across the edge `from -> to`.
    ///
    /// `self` is the connection attached to the edge.
    fn next(&self, from: usize, to: usize, current: &Self) -> Accept<Self>;

    /// Combine two states found at the same shortest distance.
    #[must_use]
    fn merge(&self, other: &Self) -> Self;
}

/// Connection that accepts every edge and carries no information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unconstrained;

impl Connection for Unconstrained {
    fn next(&self, _from: usize, _to: usize, _current: &Self) -> Accept<Self> {
        Accept::NoConnection
    }

    fn merge(&self, _other: &Self) -> Self {
        *self
    }
}

/// Value attached to an edge for the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeValue<C> {
    pub distance: i64,
    /// `None` lets the current connection pass through unchanged.
    pub connection: Option<C>,
    /// Whether [`Accept::NoConnection`] continues the path (with the initial
    /// connection) instead of rejecting the edge.
    pub allow_no_connection: bool,
}

impl<C> EdgeValue<C> {
    /// An edge that only contributes its distance.
    #[must_use]
    pub const fn plain(distance: i64) -> Self {
        Self {
            distance,
            connection: None,
            allow_no_connection: true,
        }
    }

    #[must_use]
    pub const fn with_connection(distance: i64, connection: C) -> Self {
        Self {
            distance,
            connection: Some(connection),
            allow_no_connection: true,
        }
    }

    /// Reject the edge when its connection collapses to "no information".
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.allow_no_connection = false;
        self
    }
}

/// Best distance and connection found for one vertex.
///
/// Unreachable vertices have distance [`NO_PATH`] and no connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dc<C> {
    pub dist: i64,
    pub connection: Option<C>,
}

impl<C: Connection> Dc<C> {
    const fn unreachable() -> Self {
        Self {
            dist: NO_PATH,
            connection: None,
        }
    }

    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.connection.is_some()
    }

    fn merge(self, alternative: Self) -> Self {
        match (&self.connection, &alternative.connection) {
            (Some(current), Some(other)) => Self {
                dist: self.dist,
                connection: Some(current.merge(other)),
            },
            (None, _) => alternative,
            (Some(_), None) => self,
        }
    }
}

/// Generalized Dijkstra solver.
///
/// Holds only configuration; every call allocates its own working state, so
/// one solver can serve concurrent searches.
pub struct DijkstraShortestPath<C> {
    initial: C,
    labeler: Option<Box<dyn Fn(usize) -> String + Send + Sync>>,
}

impl Default for DijkstraShortestPath<Unconstrained> {
    fn default() -> Self {
        Self::new(Unconstrained)
    }
}

impl<C: fmt::Debug> fmt::Debug for DijkstraShortestPath<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DijkstraShortestPath")
            .field("initial", &self.initial)
            .field("labeler", &self.labeler.is_some())
            .finish()
    }
}

impl<C: Connection> DijkstraShortestPath<C> {
    /// Solver whose source (and every "no connection" continuation) starts
    /// from `initial`.
    pub fn new(initial: C) -> Self {
        Self {
            initial,
            labeler: None,
        }
    }

    /// Render ids through `labeler` in trace output.
    #[must_use]
    pub fn with_labels<L>(mut self, labeler: L) -> Self
    where
        L: Fn(usize) -> String + Send + Sync + 'static,
    {
        self.labeler = Some(Box::new(labeler));
        self
    }

    fn label(&self, id: usize) -> String {
        self.labeler
            .as_ref()
            .map_or_else(|| id.to_string(), |labeler| labeler(id))
    }

    /// Shortest distances from `source`; [`NO_PATH`] marks unreachable ids.
    ///
    /// # Errors
    ///
    /// See [`DijkstraShortestPath::shortest_path_dc`].
    pub fn shortest_path<F, I>(
        &self,
        num_vertices: usize,
        edges: F,
        source: usize,
    ) -> Result<Vec<i64>, GraphError>
    where
        F: FnMut(usize) -> I,
        I: IntoIterator<Item = (usize, EdgeValue<C>)>,
    {
        Ok(self
            .shortest_path_dc(num_vertices, edges, source)?
            .into_iter()
            .map(|dc| dc.dist)
            .collect())
    }

    /// Shortest distance and connection for every id in `0..num_vertices`.
    ///
    /// `edges(u)` lists the outgoing edges of `u` as `(target, value)`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::StartOutOfRange`] if `source >= num_vertices`
    /// and [`GraphError::TargetOutOfRange`] if `edges` yields a target
    /// outside the id space.
    #[instrument(skip(self, edges))]
    pub fn shortest_path_dc<F, I>(
        &self,
        num_vertices: usize,
        mut edges: F,
        source: usize,
    ) -> Result<Vec<Dc<C>>, GraphError>
    where
        F: FnMut(usize) -> I,
        I: IntoIterator<Item = (usize, EdgeValue<C>)>,
    {
        if source >= num_vertices {
            return Err(GraphError::StartOutOfRange {
                vertex: source,
                count: num_vertices,
            });
        }

        let mut dist: Vec<Dc<C>> = (0..num_vertices).map(|_| Dc::unreachable()).collect();
        dist[source] = Dc {
            dist: 0,
            connection: Some(self.initial.clone()),
        };
        let mut keys = vec![NO_PATH; num_vertices];
        keys[source] = 0;
        let mut queue = IndexedMinHeap::with_keys(keys);

        while let Some(u) = queue.pop_min() {
            let Some(current) = dist[u].connection.clone() else {
                // Everything still queued is unreachable as well.
                break;
            };
            let base = dist[u].dist;

            for (v, edge) in edges(u) {
                if v >= num_vertices {
                    return Err(GraphError::TargetOutOfRange {
                        from: u,
                        to: v,
                        count: num_vertices,
                    });
                }
                let Some(connection) = self.extend(&edge, u, v, &current) else {
                    trace!(from = %self.label(u), to = %self.label(v), "edge rejected");
                    continue;
                };
                let Some(alt) = base.checked_add(edge.distance).filter(|d| *d < NO_PATH) else {
                    continue;
                };
                let candidate = Dc {
                    dist: alt,
                    connection: Some(connection),
                };
                if alt < dist[v].dist {
                    trace!(to = %self.label(v), dist = alt, "shorter path");
                    dist[v] = candidate;
                    queue.decrease_key(v, alt);
                } else if alt == dist[v].dist {
                    trace!(to = %self.label(v), dist = alt, "equal path, merging");
                    let previous = std::mem::replace(&mut dist[v], Dc::unreachable());
                    dist[v] = previous.merge(candidate);
                }
            }
        }

        debug!(
            reachable = dist.iter().filter(|dc| dc.is_reachable()).count(),
            "shortest paths computed"
        );
        Ok(dist)
    }

    fn extend(&self, edge: &EdgeValue<C>, from: usize, to: usize, current: &C) -> Option<C> {
        let Some(edge_connection) = &edge.connection else {
            return Some(current.clone());
        };
        match edge_connection.next(from, to, current) {
            Accept::Reject => None,
            Accept::NoConnection => edge.allow_no_connection.then(|| self.initial.clone()),
            Accept::Next(next) => Some(next),
        }
    }
}

/// Dense `0..n` numbering of the vertices of a graph, in vertex order.
#[derive(Debug, Clone)]
pub struct DenseIndex {
    vertices: Vec<Vertex>,
    ids: HashMap<Vertex, usize>,
}

impl DenseIndex {
    #[must_use]
    pub fn new<T>(graph: &Graph<T>) -> Self {
        let vertices: Vec<Vertex> = graph.vertices().collect();
        let ids = vertices.iter().enumerate().map(|(id, v)| (*v, id)).collect();
        Self { vertices, ids }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn id(&self, vertex: Vertex) -> Option<usize> {
        self.ids.get(&vertex).copied()
    }

    #[must_use]
    pub fn vertex(&self, id: usize) -> Option<Vertex> {
        self.vertices.get(id).copied()
    }

    /// Outgoing edges of `id` carrying only their weight as distance.
    #[must_use]
    pub fn plain_edges<T, C>(&self, graph: &Graph<T>, id: usize) -> Vec<(usize, EdgeValue<C>)> {
        self.edges_with(graph, id, |edge| EdgeValue::plain(edge.weight))
    }

    /// Outgoing edges of `id`, with values produced by `decorate`.
    ///
    /// Unknown ids have no edges.
    pub fn edges_with<T, C, D>(
        &self,
        graph: &Graph<T>,
        id: usize,
        mut decorate: D,
    ) -> Vec<(usize, EdgeValue<C>)>
    where
        D: FnMut(Edge) -> EdgeValue<C>,
    {
        let Some(from) = self.vertex(id) else {
            return Vec::new();
        };
        graph
            .edges(from)
            .into_iter()
            .flatten()
            .filter_map(|(&to, &weight)| {
                let target = self.id(to)?;
                Some((target, decorate(Edge::new(from, to, weight))))
            })
            .collect()
    }
}
