//! Forward reachability.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;

use crate::graph::{Graph, Vertex};

/// Every vertex reachable from `start`, `start` included.
///
/// # Panics
///
/// Panics if `start` is not a member of `graph`.
#[must_use]
pub fn follow<T>(graph: &Graph<T>, start: Vertex) -> IndexSet<Vertex> {
    follow_all(graph, [start], true)
}

/// Every vertex reachable from any of `starts` by following outgoing edges.
///
/// Breadth-first; each vertex is expanded at most once. The result is in
/// discovery order. A starting point shows up in the result when
/// `include_starting_points` is set, or when it is reachable from some
/// starting point (for example through a cycle).
///
/// # Panics
///
/// Panics if a starting point is not a member of `graph`.
#[must_use]
pub fn follow_all<T, I>(graph: &Graph<T>, starts: I, include_starting_points: bool) -> IndexSet<Vertex>
where
    I: IntoIterator<Item = Vertex>,
{
    let mut queue: VecDeque<Vertex> = VecDeque::new();
    let mut expanded: HashSet<Vertex> = HashSet::new();
    let mut reached: IndexSet<Vertex> = IndexSet::new();

    for start in starts {
        if include_starting_points {
            reached.insert(start);
        }
        if expanded.insert(start) {
            queue.push_back(start);
        }
    }

    while let Some(current) = queue.pop_front() {
        let Some(targets) = graph.edges(current) else {
            continue;
        };
        for &next in targets.keys() {
            reached.insert(next);
            if expanded.insert(next) {
                queue.push_back(next);
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphBuilder;

    fn graph() -> Graph<u32> {
        let mut builder = GraphBuilder::summing();
        builder.add(0, [1, 2]);
        builder.add(1, [3]);
        builder.add(3, [1]);
        builder.add_vertex(4);
        builder.build()
    }

    fn names(graph: &Graph<u32>, set: &IndexSet<Vertex>) -> Vec<u32> {
        set.iter().map(|v| *graph.payload(*v)).collect()
    }

    #[test]
    fn follow_includes_start_in_discovery_order() {
        let graph = graph();
        let zero = graph.vertex(&0).unwrap();
        assert_eq!(names(&graph, &follow(&graph, zero)), [0, 1, 2, 3]);
    }

    #[test]
    fn excluded_start_reappears_when_reachable() {
        let graph = graph();
        let one = graph.vertex(&1).unwrap();
        let zero = graph.vertex(&0).unwrap();
        assert_eq!(names(&graph, &follow_all(&graph, [one], false)), [3, 1]);
        assert_eq!(names(&graph, &follow_all(&graph, [zero], false)), [1, 2, 3]);
    }

    #[test]
    fn isolated_start() {
        let graph = graph();
        let four = graph.vertex(&4).unwrap();
        assert_eq!(names(&graph, &follow(&graph, four)), [4]);
        assert!(follow_all(&graph, [four], false).is_empty());
    }

    #[test]
    fn multiple_starts_are_deduplicated() {
        let graph = graph();
        let one = graph.vertex(&1).unwrap();
        let three = graph.vertex(&3).unwrap();
        let reached = follow_all(&graph, [one, three, one], true);
        assert_eq!(names(&graph, &reached), [1, 3]);
    }
}
