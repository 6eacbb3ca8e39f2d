//! Graph files: JSON, either a nested map or an edge list.
//!
//! ```json
//! {"app": {"lib": 2, "util": 1}, "lib": {"util": 1}}
//! ```
//!
//! ```json
//! [{"from": "app", "to": "lib", "weight": 2}, {"from": "lib", "to": "util"}]
//! ```
//!
//! Repeated `(from, to)` pairs are folded with the configured combinator.
//! A missing `weight` in an edge record means 1.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use strata_graph::config::WeightCombine;
use strata_graph::{Graph, GraphBuilder};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GraphFile {
    Nested(IndexMap<String, IndexMap<String, i64>>),
    EdgeList(Vec<EdgeRecord>),
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    #[serde(default = "default_weight")]
    weight: i64,
}

const fn default_weight() -> i64 {
    1
}

/// Read and build the graph stored at `path`.
pub fn load_graph(path: &Path, combine: WeightCombine) -> Result<Graph<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let graph = parse_graph(&content, combine)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Build a graph from JSON text.
pub fn parse_graph(content: &str, combine: WeightCombine) -> Result<Graph<String>> {
    let file: GraphFile = serde_json::from_str(content)
        .context("expected a {from: {to: weight}} map or a [{from, to, weight}] list")?;

    let mut builder = GraphBuilder::new(move |existing, latest| combine.apply(existing, latest));
    match file {
        GraphFile::Nested(map) => {
            for (from, targets) in map {
                builder.add_vertex(from.clone());
                for (to, weight) in targets {
                    builder.merge_edge(from.clone(), to, weight);
                }
            }
        }
        GraphFile::EdgeList(records) => {
            for record in records {
                builder.merge_edge(record.from, record.to, record.weight);
            }
        }
    }
    Ok(builder.build())
}
