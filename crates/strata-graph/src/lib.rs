#![forbid(unsafe_code)]
//! strata-graph library.
//!
//! A weighted, directed dependency graph over arbitrary payloads, plus the
//! algorithms a dependency-aware tool needs on top of it:
//!
//! - [`ops::follow`]: forward reachability.
//! - [`ops::dijkstra`]: single-source shortest paths where every path carries
//!   a caller-defined [`ops::dijkstra::Connection`] that can veto, replace or
//!   merge path state.
//! - [`ops::shortest_cycle`]: cheapest simple cycle through a vertex.
//! - [`ops::linearize`]: layered order of a possibly cyclic graph plus the
//!   irreducible cycles that block a total order.
//!
//! # Conventions
//!
//! - **Errors**: typed [`GraphError`] for fallible lookups, `anyhow::Result`
//!   for configuration loading. Handing a foreign [`Vertex`] to a graph is a
//!   programming error and panics.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`, `warn!`).
//!
//! # Example
//!
//! ```
//! use strata_graph::{GraphBuilder, ops::linearize::{linearize, LinearizationMode}};
//!
//! let mut builder = GraphBuilder::summing();
//! builder.add("app", ["lib", "util"]);
//! builder.add("lib", ["util"]);
//! let graph = builder.build();
//!
//! let result = linearize(&graph, LinearizationMode::All);
//! assert!(result.remaining_cycles.is_empty());
//! assert_eq!(result.hierarchy.render(&graph), "[util]; [lib]; [app]");
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod ops;

pub use error::GraphError;
pub use graph::{AdjacencyMap, Edge, EdgeMap, Graph, GraphBuilder, SortedEdges, Vertex};
