//! `strata follow`: everything reachable from a set of vertices.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use strata_graph::ops::follow_all;

use super::{RunContext, names, resolve_vertex};
use crate::input::load_graph;
use crate::output::{pretty_section, render_mode};

/// Arguments for `strata follow`.
#[derive(Args, Debug)]
pub struct FollowArgs {
    /// Graph file (JSON).
    pub graph: PathBuf,

    /// Starting vertices.
    #[arg(required = true, num_args = 1..)]
    pub vertices: Vec<String>,

    /// Leave starting points out of the result unless they are reachable
    /// from another start (or from themselves).
    #[arg(long)]
    pub exclude_start: bool,
}

#[derive(Debug, Serialize)]
struct FollowOutput {
    starts: Vec<String>,
    reached: Vec<String>,
}

/// Execute `strata follow`.
pub fn run_follow(args: &FollowArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let graph = load_graph(&args.graph, ctx.config.build.combine)?;
    let starts = args
        .vertices
        .iter()
        .map(|name| resolve_vertex(&graph, name, ctx.output))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let reached = follow_all(&graph, starts.iter().copied(), !args.exclude_start);
    let report = FollowOutput {
        starts: args.vertices.clone(),
        reached: names(&graph, reached),
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(report: &FollowOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for name in &report.reached {
        writeln!(w, "{name}")?;
    }
    Ok(())
}

fn render_pretty(report: &FollowOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Reachable from {} ({})", report.starts.join(", "), report.reached.len()),
    )?;
    for name in &report.reached {
        writeln!(w, "  {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: FollowArgs,
    }

    #[test]
    fn parses_multiple_starts() {
        let parsed = Wrapper::parse_from(["test", "g.json", "a", "b", "--exclude-start"]);
        assert_eq!(parsed.args.vertices, ["a", "b"]);
        assert!(parsed.args.exclude_start);
    }

    #[test]
    fn requires_a_start() {
        assert!(Wrapper::try_parse_from(["test", "g.json"]).is_err());
    }

    #[test]
    fn text_lists_one_vertex_per_line() {
        let report = FollowOutput {
            starts: vec!["a".to_string()],
            reached: vec!["a".to_string(), "b".to_string()],
        };
        let mut out = Vec::new();
        render_text(&report, &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "a\nb\n");
    }
}
