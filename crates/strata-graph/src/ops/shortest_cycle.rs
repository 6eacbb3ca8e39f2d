//! Cheapest simple cycle through a given vertex.
//!
//! # Algorithm
//!
//! Best-first expansion of partial paths starting at the vertex, ordered by
//! accumulated weight. A partial path never revisits a vertex except the
//! start, and only returns to the start once it holds at least three
//! vertices, so self-loops and two-vertex back-and-forth cycles are never
//! reported.
//!
//! Partial paths are de-duplicated on `(current vertex, first hop)`: a path
//! reaching a vertex no cheaper than an earlier path with the same first hop
//! is dropped.
//!
//! Weights are expected to be non-negative.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use tracing::{debug, instrument};

use crate::graph::{Graph, Vertex};

/// Smallest number of path entries (start included twice) that counts as a
/// cycle: `[a, b, a]` is rejected, `[a, b, c, a]` accepted.
const MIN_CYCLE_SIZE: usize = 3;

/// A closed walk `start -> ... -> start` and its total weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Vertices in traversal order; first and last are the start vertex.
    pub vertices: Vec<Vertex>,
    pub distance: i64,
}

impl Cycle {
    /// Number of distinct vertices on the cycle.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `"[a, b, c, a], distance=7"`, using the payloads of `graph`.
    #[must_use]
    pub fn render<T: fmt::Display>(&self, graph: &Graph<T>) -> String {
        let names: Vec<String> = self
            .vertices
            .iter()
            .map(|v| graph.payload(*v).to_string())
            .collect();
        format!("[{}], distance={}", names.join(", "), self.distance)
    }
}

#[derive(Debug)]
struct PathState {
    vertex: Vertex,
    distance: i64,
    path: Vec<Vertex>,
    first_hop: Vertex,
    /// Insertion counter; keeps pop order deterministic among equal distances.
    seq: u64,
}

impl PartialEq for PathState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathState {}

impl PartialOrd for PathState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathState {
    // Reversed: BinaryHeap is a max-heap, we want the cheapest path first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Find the cheapest cycle of at least three vertices through `start`.
///
/// Returns `None` when `start` is not on any such cycle.
///
/// # Panics
///
/// Panics if `start` is not a member of `graph`.
#[must_use]
#[instrument(skip(graph))]
pub fn shortest_cycle<T>(graph: &Graph<T>, start: Vertex) -> Option<Cycle> {
    let first_edges = graph.edges(start)?;

    let mut queue: BinaryHeap<PathState> = BinaryHeap::new();
    let mut seq: u64 = 0;
    for (&to, &weight) in first_edges {
        if to == start {
            continue;
        }
        queue.push(PathState {
            vertex: to,
            distance: weight,
            path: vec![start, to],
            first_hop: to,
            seq,
        });
        seq += 1;
    }

    let mut visited: HashMap<(Vertex, Vertex), i64> = HashMap::new();
    let mut shortest: Option<Cycle> = None;

    while let Some(current) = queue.pop() {
        let key = (current.vertex, current.first_hop);
        if visited.get(&key).is_some_and(|best| *best <= current.distance) {
            continue;
        }
        visited.insert(key, current.distance);

        if current.vertex == start && current.path.len() >= MIN_CYCLE_SIZE {
            if shortest
                .as_ref()
                .is_none_or(|found| current.distance < found.distance)
            {
                shortest = Some(Cycle {
                    vertices: current.path,
                    distance: current.distance,
                });
            }
            continue;
        }

        let Some(edges) = graph.edges(current.vertex) else {
            continue;
        };
        for (&to, &weight) in edges {
            let is_start = to == start;
            if !is_start && current.path.contains(&to) {
                continue;
            }
            if is_start && current.path.len() < MIN_CYCLE_SIZE {
                continue;
            }
            let Some(distance) = current.distance.checked_add(weight) else {
                continue;
            };
            let mut path = Vec::with_capacity(current.path.len() + 1);
            path.extend_from_slice(&current.path);
            path.push(to);
            queue.push(PathState {
                vertex: to,
                distance,
                path,
                first_hop: current.first_hop,
                seq,
            });
            seq += 1;
        }
    }

    if let Some(cycle) = &shortest {
        debug!(length = cycle.len(), distance = cycle.distance, "shortest cycle found");
    }
    shortest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphBuilder;

    fn graph(edges: &[(u32, u32, i64)]) -> Graph<u32> {
        let mut builder = GraphBuilder::summing();
        for &(from, to, weight) in edges {
            builder.merge_edge(from, to, weight);
        }
        builder.build()
    }

    #[test]
    fn triangle_is_the_smallest_cycle() {
        let g = graph(&[(1, 2, 1), (2, 3, 1), (3, 1, 1)]);
        let one = g.vertex(&1).unwrap();
        let cycle = shortest_cycle(&g, one).unwrap();
        assert_eq!(cycle.render(&g), "[1, 2, 3, 1], distance=3");
        assert_eq!(cycle.len(), 3);
    }

    #[test]
    fn two_cycles_and_self_loops_are_ignored() {
        let g = graph(&[(1, 2, 1), (2, 1, 1), (1, 1, 1)]);
        let one = g.vertex(&1).unwrap();
        assert!(shortest_cycle(&g, one).is_none());
    }

    #[test]
    fn cheaper_longer_cycle_wins() {
        let g = graph(&[
            (0, 1, 10),
            (1, 2, 10),
            (2, 0, 10),
            (0, 3, 1),
            (3, 4, 1),
            (4, 5, 1),
            (5, 0, 1),
        ]);
        let zero = g.vertex(&0).unwrap();
        let cycle = shortest_cycle(&g, zero).unwrap();
        assert_eq!(cycle.render(&g), "[0, 3, 4, 5, 0], distance=4");
    }

    #[test]
    fn sink_has_no_cycle() {
        let g = graph(&[(0, 1, 1)]);
        let one = g.vertex(&1).unwrap();
        assert!(shortest_cycle(&g, one).is_none());
    }
}
