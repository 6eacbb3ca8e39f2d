//! `strata cycle`: cheapest cycle through one vertex.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use strata_graph::ops::shortest_cycle;

use super::{CycleView, RunContext, resolve_vertex};
use crate::input::load_graph;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `strata cycle`.
#[derive(Args, Debug)]
pub struct CycleArgs {
    /// Graph file (JSON).
    pub graph: PathBuf,

    /// Vertex the cycle must pass through.
    pub vertex: String,
}

#[derive(Debug, Serialize)]
struct CycleOutput {
    vertex: String,
    cycle: Option<CycleView>,
}

/// Execute `strata cycle`. Finding no cycle is not an error.
pub fn run_cycle(args: &CycleArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = load_graph(&args.graph, ctx.config.build.combine)?;
    let start = resolve_vertex(&graph, &args.vertex, ctx.output)?;
    let report = CycleOutput {
        vertex: args.vertex.clone(),
        cycle: shortest_cycle(&graph, start).map(|cycle| CycleView::new(&graph, &cycle)),
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(report: &CycleOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match &report.cycle {
        Some(cycle) => writeln!(w, "{}", cycle.describe()),
        None => writeln!(w, "no cycle through {}", report.vertex),
    }
}

fn render_pretty(report: &CycleOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Shortest cycle through {}", report.vertex))?;
    match &report.cycle {
        Some(cycle) => {
            pretty_kv(w, "path", cycle.path.join(" -> "))?;
            pretty_kv(w, "distance", cycle.distance.to_string())
        }
        None => writeln!(w, "No cycle of three or more vertices passes through it."),
    }
}
