//! `strata stats`: size, content hash and the most depended-upon vertices.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use strata_graph::Graph;

use super::RunContext;
use crate::input::load_graph;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `strata stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Graph file (JSON).
    pub graph: PathBuf,

    /// How many of the most depended-upon vertices to list.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

#[derive(Debug, Serialize)]
struct StatsOutput {
    vertices: usize,
    edges: usize,
    content_hash: String,
    most_depended_upon: Vec<Ranked>,
}

#[derive(Debug, Serialize)]
struct Ranked {
    vertex: String,
    incoming_weight: i64,
}

/// Execute `strata stats`.
pub fn run_stats(args: &StatsArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let combine = ctx.config.build.combine;
    let graph = load_graph(&args.graph, combine)?;
    let report = collect(&graph, args.top, |a, b| combine.apply(a, b));
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn collect<F>(graph: &Graph<String>, top: usize, combine: F) -> StatsOutput
where
    F: Fn(i64, i64) -> i64,
{
    let mut ranked: Vec<Ranked> = graph
        .incoming_vertex_weight(combine)
        .into_iter()
        .map(|(vertex, incoming_weight)| Ranked {
            vertex: graph.payload(vertex).clone(),
            incoming_weight,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.incoming_weight
            .cmp(&a.incoming_weight)
            .then_with(|| a.vertex.cmp(&b.vertex))
    });
    ranked.truncate(top);

    StatsOutput {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        content_hash: graph.content_hash(),
        most_depended_upon: ranked,
    }
}

fn render_text(report: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "vertices  {}", report.vertices)?;
    writeln!(w, "edges  {}", report.edges)?;
    writeln!(w, "hash  {}", report.content_hash)?;
    for entry in &report.most_depended_upon {
        writeln!(w, "incoming  {}  {}", entry.vertex, entry.incoming_weight)?;
    }
    Ok(())
}

fn render_pretty(report: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph")?;
    pretty_kv(w, "vertices", report.vertices.to_string())?;
    pretty_kv(w, "edges", report.edges.to_string())?;
    pretty_kv(w, "hash", &report.content_hash)?;
    if !report.most_depended_upon.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Most depended upon")?;
        for entry in &report.most_depended_upon {
            writeln!(w, "  {:<24} {}", entry.vertex, entry.incoming_weight)?;
        }
    }
    Ok(())
}
