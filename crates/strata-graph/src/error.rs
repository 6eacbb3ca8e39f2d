//! Error types for graph lookups and the dense-id shortest path adapter.

/// Errors from graph operations that take caller-provided identifiers.
///
/// Missing results (no cycle, unreachable vertex) are never errors; they
/// are reported as `None` or as the [`crate::ops::dijkstra::NO_PATH`]
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// No vertex in the graph carries the given payload.
    #[error("vertex not found in graph: {0}")]
    UnknownVertex(String),

    /// The start vertex of a shortest path search is outside `0..count`.
    #[error("start vertex {vertex} is out of range for {count} vertices")]
    StartOutOfRange {
        /// The offending dense id.
        vertex: usize,
        /// Size of the dense id space.
        count: usize,
    },

    /// An edge provider produced a target outside `0..count`.
    #[error("edge {from} -> {to} leaves the id space of {count} vertices")]
    TargetOutOfRange {
        /// Dense id of the edge's origin.
        from: usize,
        /// Dense id the provider returned as target.
        to: usize,
        /// Size of the dense id space.
        count: usize,
    },
}
