//! `strata edges`: edges sorted by weight.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use strata_graph::config::SortOrder;

use super::RunContext;
use crate::input::load_graph;
use crate::output::{pretty_section, render_mode};

/// Arguments for `strata edges`.
#[derive(Args, Debug)]
pub struct EdgesArgs {
    /// Graph file (JSON).
    pub graph: PathBuf,

    /// Keep only edges with a weight strictly below this value.
    #[arg(long)]
    pub limit: Option<i64>,

    /// Heaviest edges first.
    #[arg(long)]
    pub descending: bool,
}

#[derive(Debug, Serialize)]
struct EdgesOutput {
    edges: Vec<EdgeView>,
}

#[derive(Debug, Serialize)]
struct EdgeView {
    from: String,
    to: String,
    weight: i64,
}

/// Execute `strata edges`. Flags override the `[edges]` config section.
pub fn run_edges(args: &EdgesArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = load_graph(&args.graph, ctx.config.build.combine)?;
    let order = if args.descending {
        SortOrder::Descending
    } else {
        ctx.config.edges.order
    };
    let limit = args.limit.or(ctx.config.edges.limit);

    let edges: Vec<EdgeView> = graph
        .edge_iterator(|a, b| order.compare(a, b), limit)
        .map(|edge| EdgeView {
            from: graph.payload(edge.from).clone(),
            to: graph.payload(edge.to).clone(),
            weight: edge.weight,
        })
        .collect();
    render_mode(ctx.output, &EdgesOutput { edges }, render_text, render_pretty)
}

fn render_text(report: &EdgesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for edge in &report.edges {
        writeln!(w, "{}  {}  {}", edge.from, edge.to, edge.weight)?;
    }
    Ok(())
}

fn render_pretty(report: &EdgesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Edges ({})", report.edges.len()))?;
    for edge in &report.edges {
        writeln!(w, "  {:>6}  {} -> {}", edge.weight, edge.from, edge.to)?;
    }
    Ok(())
}
