//! `strata linearize`: layered order, irreducible cycles and the vertices
//! attached to them.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use strata_graph::Graph;
use strata_graph::ops::linearize::{Linearization, linearize_with};

use super::{CycleView, RunContext, layers_line};
use crate::input::load_graph;
use crate::output::{pretty_section, render_mode};

/// Arguments for `strata linearize`.
#[derive(Args, Debug)]
pub struct LinearizeArgs {
    /// Graph file (JSON).
    pub graph: PathBuf,

    /// Skip the shortest witness cycle of each irreducible cycle.
    #[arg(long)]
    pub no_witness: bool,
}

#[derive(Debug, Serialize)]
struct LinearizeOutput {
    hierarchy: Vec<Vec<String>>,
    cycles: Vec<CycleGroupView>,
    attached_to_cycles: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct CycleGroupView {
    members: Vec<String>,
    shortest: Option<CycleView>,
}

/// Execute `strata linearize`.
pub fn run_linearize(args: &LinearizeArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = load_graph(&args.graph, ctx.config.build.combine)?;
    let mut config = ctx.config.linearize.clone();
    if args.no_witness {
        config.shortest_cycles = false;
    }
    let result = linearize_with(&graph, &config);
    render_mode(ctx.output, &view(&graph, &result), render_text, render_pretty)
}

fn view(graph: &Graph<String>, result: &Linearization) -> LinearizeOutput {
    let layers = |hierarchy: &strata_graph::ops::Hierarchy| -> Vec<Vec<String>> {
        hierarchy
            .layers()
            .iter()
            .map(|layer| {
                let mut names = super::names(graph, layer.iter().copied());
                names.sort_unstable();
                names
            })
            .collect()
    };

    let mut cycles: Vec<CycleGroupView> = result
        .remaining_cycles
        .iter()
        .map(|group| CycleGroupView {
            members: group.sorted_payloads(graph, String::cmp).into_iter().cloned().collect(),
            shortest: group.shortest().map(|cycle| CycleView::new(graph, cycle)),
        })
        .collect();
    cycles.sort_by(|a, b| {
        b.members
            .len()
            .cmp(&a.members.len())
            .then_with(|| a.members.first().cmp(&b.members.first()))
    });

    LinearizeOutput {
        hierarchy: layers(&result.hierarchy),
        cycles,
        attached_to_cycles: layers(&result.attached_to_cycles),
    }
}

fn render_text(report: &LinearizeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "hierarchy  {}", layers_line(&report.hierarchy))?;
    let groups: Vec<Vec<String>> = report.cycles.iter().map(|c| c.members.clone()).collect();
    writeln!(w, "cycles  {}", layers_line(&groups))?;
    writeln!(w, "attached  {}", layers_line(&report.attached_to_cycles))
}

fn render_pretty(report: &LinearizeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Hierarchy ({} layers)", report.hierarchy.len()))?;
    for (depth, layer) in report.hierarchy.iter().enumerate() {
        writeln!(w, "  {depth:>3}  {}", layer.join(", "))?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Irreducible cycles ({})", report.cycles.len()))?;
    for (idx, group) in report.cycles.iter().enumerate() {
        writeln!(w, "  Cycle {} ({} vertices): {}", idx + 1, group.members.len(), group.members.join(", "))?;
        if let Some(shortest) = &group.shortest {
            writeln!(w, "    shortest: {}", shortest.describe())?;
        }
    }

    writeln!(w)?;
    pretty_section(w, &format!("Attached to cycles ({} layers)", report.attached_to_cycles.len()))?;
    for (depth, layer) in report.attached_to_cycles.iter().enumerate() {
        writeln!(w, "  {depth:>3}  {}", layer.join(", "))?;
    }
    Ok(())
}
