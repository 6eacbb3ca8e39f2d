//! `strata path`: shortest distances from one vertex.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use strata_graph::ops::dijkstra::{DenseIndex, DijkstraShortestPath, NO_PATH, Unconstrained};

use super::{RunContext, resolve_vertex};
use crate::input::load_graph;
use crate::output::{pretty_section, render_mode};

/// Arguments for `strata path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Graph file (JSON).
    pub graph: PathBuf,

    /// Source vertex.
    pub source: String,

    /// Leave unreachable vertices out of the report.
    #[arg(long)]
    pub reachable_only: bool,
}

#[derive(Debug, Serialize)]
struct PathOutput {
    source: String,
    distances: Vec<Distance>,
}

#[derive(Debug, Serialize)]
struct Distance {
    vertex: String,
    /// `None` when unreachable.
    distance: Option<i64>,
}

/// Execute `strata path`.
pub fn run_path(args: &PathArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = load_graph(&args.graph, ctx.config.build.combine)?;
    let source = resolve_vertex(&graph, &args.source, ctx.output)?;

    let index = DenseIndex::new(&graph);
    let labels: Vec<String> = graph.vertices().map(|v| graph.payload(v).clone()).collect();
    let solver = DijkstraShortestPath::<Unconstrained>::default().with_labels(move |id| {
        labels.get(id).cloned().unwrap_or_else(|| id.to_string())
    });

    let source_id = index
        .id(source)
        .ok_or_else(|| anyhow::anyhow!("vertex {} has no dense id", args.source))?;
    let dist = solver.shortest_path(index.len(), |id| index.plain_edges(&graph, id), source_id)?;

    let distances = dist
        .into_iter()
        .enumerate()
        .filter_map(|(id, d)| {
            let vertex = graph.payload(index.vertex(id)?).clone();
            let distance = (d != NO_PATH).then_some(d);
            (distance.is_some() || !args.reachable_only).then_some(Distance { vertex, distance })
        })
        .collect();

    let report = PathOutput {
        source: args.source.clone(),
        distances,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn shown(distance: Option<i64>) -> String {
    distance.map_or_else(|| "unreachable".to_string(), |d| d.to_string())
}

fn render_text(report: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for entry in &report.distances {
        writeln!(w, "{}  {}", entry.vertex, shown(entry.distance))?;
    }
    Ok(())
}

fn render_pretty(report: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Shortest distances from {}", report.source))?;
    for entry in &report.distances {
        writeln!(w, "  {:<24} {}", entry.vertex, shown(entry.distance))?;
    }
    Ok(())
}
