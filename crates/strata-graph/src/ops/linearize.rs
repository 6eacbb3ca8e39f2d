//! Decomposition of a possibly cyclic graph into ordered layers.
//!
//! # Overview
//!
//! Every vertex ends up in exactly one of three places:
//!
//! 1. [`Linearization::hierarchy`]: vertices that do not reach any cycle,
//!    layered leaves first.
//! 2. [`Linearization::remaining_cycles`]: the irreducible cycles, i.e. the
//!    strongly connected components with at least two members.
//! 3. [`Linearization::attached_to_cycles`]: vertices that reach a cycle but
//!    are not on one, layered as if every cycle were a single placed unit.
//!
//! Self-loops never block placement.
//!
//! # Edge Direction
//!
//! An edge `A → B` means "A depends on B", so a vertex is placed only after
//! all of its targets.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use petgraph::algo::tarjan_scc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::cycles::{CycleGroup, Cycles};
use super::follow::follow_all;
use super::hierarchy::Hierarchy;
use super::shortest_cycle::shortest_cycle;
use crate::config::LinearizeConfig;
use crate::graph::{Graph, Vertex};

/// Decomposition strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum LinearizationMode {
    /// Decompose the whole graph.
    #[default]
    All,
}

/// Result of [`linearize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Linearization {
    pub hierarchy: Hierarchy,
    pub remaining_cycles: Cycles,
    pub attached_to_cycles: Hierarchy,
}

impl Linearization {
    /// Number of vertices accounted for across all three parts.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.hierarchy.vertex_count()
            + self.remaining_cycles.vertex_count()
            + self.attached_to_cycles.vertex_count()
    }

    /// `true` when the graph has a total acyclic order.
    #[must_use]
    pub const fn is_acyclic(&self) -> bool {
        self.remaining_cycles.is_empty()
    }
}

/// Linearize `graph` with default settings for everything but `mode`.
#[must_use]
pub fn linearize<T>(graph: &Graph<T>, mode: LinearizationMode) -> Linearization {
    let config = LinearizeConfig {
        mode,
        ..LinearizeConfig::default()
    };
    linearize_with(graph, &config)
}

/// Linearize `graph` under `config`.
#[must_use]
#[instrument(skip(graph, config), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn linearize_with<T>(graph: &Graph<T>, config: &LinearizeConfig) -> Linearization {
    let LinearizationMode::All = config.mode;

    let components = cycle_components(graph);
    let in_cycle: HashSet<Vertex> = components.iter().flatten().copied().collect();

    let attached: IndexSet<Vertex> = if in_cycle.is_empty() {
        IndexSet::new()
    } else {
        let dependents = graph.reverse(|_| true);
        let mut reached = follow_all(&dependents, components.iter().flatten().copied(), false);
        reached.retain(|v| !in_cycle.contains(v));
        // Back to graph insertion order so layering is independent of BFS order.
        graph
            .vertices()
            .filter(|v| reached.contains(v))
            .collect()
    };

    let acyclic: IndexSet<Vertex> = graph
        .vertices()
        .filter(|v| !in_cycle.contains(v) && !attached.contains(v))
        .collect();

    let mut placed: HashSet<Vertex> = HashSet::with_capacity(graph.vertex_count());
    let hierarchy = peel(graph, &acyclic, &mut placed);
    placed.extend(in_cycle.iter().copied());
    let attached_to_cycles = peel(graph, &attached, &mut placed);

    let groups = components
        .into_iter()
        .map(|members| {
            let witness = if config.shortest_cycles {
                members
                    .first()
                    .and_then(|&start| shortest_cycle(&graph.sub_graph(&members), start))
            } else {
                None
            };
            CycleGroup::new(members, witness)
        })
        .collect();
    let remaining_cycles = Cycles::new(groups);

    debug!(
        layers = hierarchy.len(),
        cycles = remaining_cycles.len(),
        attached_layers = attached_to_cycles.len(),
        "linearized graph"
    );

    Linearization {
        hierarchy,
        remaining_cycles,
        attached_to_cycles,
    }
}

/// Strongly connected components with two or more members.
///
/// Members are in graph insertion order and components are ordered by their
/// first member.
fn cycle_components<T>(graph: &Graph<T>) -> Vec<IndexSet<Vertex>> {
    let (pg, _) = graph.to_petgraph();
    let order = graph.vertex_set();
    let position = |v: &Vertex| order.get_index_of(v).unwrap_or(usize::MAX);

    let mut components: Vec<IndexSet<Vertex>> = tarjan_scc(&pg)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| {
            let mut members: Vec<Vertex> = component.into_iter().map(|idx| pg[idx]).collect();
            members.sort_by_key(position);
            members.into_iter().collect()
        })
        .collect();
    components.sort_by_key(|members| members.first().map_or(usize::MAX, position));
    components
}

/// Layer `candidates` leaves first. A candidate is ready once every target
/// other than itself is in `placed`; ready vertices are added to `placed`.
///
/// Within a layer, vertices keep the order of `candidates`.
fn peel<T>(graph: &Graph<T>, candidates: &IndexSet<Vertex>, placed: &mut HashSet<Vertex>) -> Hierarchy {
    let mut pending: Vec<usize> = vec![0; candidates.len()];
    let mut dependents: HashMap<Vertex, Vec<usize>> = HashMap::new();

    for (index, &vertex) in candidates.iter().enumerate() {
        let Some(targets) = graph.edges(vertex) else {
            continue;
        };
        for &target in targets.keys() {
            if target == vertex || placed.contains(&target) {
                continue;
            }
            pending[index] += 1;
            dependents.entry(target).or_default().push(index);
        }
    }

    let mut hierarchy = Hierarchy::new();
    let mut ready: Vec<usize> = (0..candidates.len()).filter(|&i| pending[i] == 0).collect();
    let mut remaining = candidates.len();

    while !ready.is_empty() {
        ready.sort_unstable();
        let mut next: Vec<usize> = Vec::new();
        let mut layer: IndexSet<Vertex> = IndexSet::with_capacity(ready.len());
        for &index in &ready {
            let Some(&vertex) = candidates.get_index(index) else {
                continue;
            };
            layer.insert(vertex);
            placed.insert(vertex);
            for &dependent in dependents.get(&vertex).map_or(&[][..], Vec::as_slice) {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    next.push(dependent);
                }
            }
        }
        remaining -= layer.len();
        hierarchy.push_layer(layer);
        ready = next;
    }

    if remaining > 0 {
        // Only reachable when candidates are not closed under their
        // dependencies; keep the result total.
        let stuck: IndexSet<Vertex> = candidates
            .iter()
            .copied()
            .filter(|v| !placed.contains(v))
            .collect();
        warn!(count = stuck.len(), "vertices could not be layered; placed in a final layer");
        placed.extend(stuck.iter().copied());
        hierarchy.push_layer(stuck);
    }

    hierarchy
}
