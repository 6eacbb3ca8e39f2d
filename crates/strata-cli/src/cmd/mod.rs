pub mod cycle;
pub mod edges;
pub mod follow;
pub mod linearize;
pub mod path;
pub mod stats;

use serde::Serialize;
use strata_graph::config::AnalysisConfig;
use strata_graph::ops::Cycle;
use strata_graph::{Graph, Vertex};

use crate::output::{CliError, OutputMode, render_error};

/// Settings every command runs under.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: AnalysisConfig,
    pub output: OutputMode,
}

/// Look up a vertex by name, reporting a structured error when it is absent.
pub fn resolve_vertex(graph: &Graph<String>, name: &str, output: OutputMode) -> anyhow::Result<Vertex> {
    match graph.require_vertex(name) {
        Ok(vertex) => Ok(vertex),
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    err.to_string(),
                    "vertex names are the keys and targets of the graph file",
                    "unknown_vertex",
                ),
            )?;
            Err(err.into())
        }
    }
}

/// Payload names for `vertices`, in iteration order.
pub fn names<I>(graph: &Graph<String>, vertices: I) -> Vec<String>
where
    I: IntoIterator<Item = Vertex>,
{
    vertices.into_iter().map(|v| graph.payload(v).clone()).collect()
}

/// Serializable view of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleView {
    pub path: Vec<String>,
    pub distance: i64,
}

impl CycleView {
    pub fn new(graph: &Graph<String>, cycle: &Cycle) -> Self {
        Self {
            path: names(graph, cycle.vertices.iter().copied()),
            distance: cycle.distance,
        }
    }

    /// `a -> b -> c -> a (distance 7)`.
    pub fn describe(&self) -> String {
        format!("{} (distance {})", self.path.join(" -> "), self.distance)
    }
}

/// `[a, b]; [c]`.
pub fn layers_line(layers: &[Vec<String>]) -> String {
    layers
        .iter()
        .map(|layer| format!("[{}]", layer.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
