//! Known-topology regression tests.
//!
//! Every scenario runs on the same hand-crafted five-vertex graph with one
//! four-vertex cycle and a source hanging off it:
//!
//! ```text
//! 0 -> {1: 1, 2: 4, 3: 5}
//! 1 -> {2: 2}
//! 2 -> {3: 1}
//! 3 -> {4: 1}
//! 4 -> {1: 4}
//! ```
//!
//! Expected values are worked out by hand and hardcoded.

use indexmap::IndexSet;

use strata_graph::ops::dijkstra::{DenseIndex, DijkstraShortestPath, NO_PATH, Unconstrained};
use strata_graph::ops::{LinearizationMode, follow, follow_all, linearize, shortest_cycle};
use strata_graph::{Graph, GraphBuilder, Vertex};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn known_graph() -> Graph<u32> {
    Graph::from_adjacency([
        (0, vec![(1, 1), (2, 4), (3, 5)]),
        (1, vec![(2, 2)]),
        (2, vec![(3, 1)]),
        (3, vec![(4, 1)]),
        (4, vec![(1, 4)]),
    ])
}

fn v(graph: &Graph<u32>, payload: u32) -> Vertex {
    graph.vertex(&payload).unwrap()
}

fn payloads(graph: &Graph<u32>, set: &IndexSet<Vertex>) -> Vec<u32> {
    let mut out: Vec<u32> = set.iter().map(|x| *graph.payload(*x)).collect();
    out.sort_unstable();
    out
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn construction_keeps_insertion_order() {
    let graph = known_graph();
    let order: Vec<u32> = graph.vertices().map(|x| *graph.payload(x)).collect();
    assert_eq!(order, [0, 1, 2, 3, 4]);
    assert_eq!(graph.edge_count(), 7);
    assert_eq!(
        graph.to_string(),
        "0->1->1, 0->4->2, 0->5->3, 1->2->2, 2->1->3, 3->1->4, 4->4->1"
    );
}

#[test]
fn reverse_restricted_to_cycle_members() {
    let graph = known_graph();
    let reversed = graph.reverse(|p| *p != 0);
    // No edge ends in 0, so the predicate drops nothing here.
    assert_eq!(reversed.edge_count(), 7);
    let into_three = reversed.edges(v(&graph, 3)).unwrap();
    assert_eq!(into_three.len(), 2);
    assert_eq!(into_three[&v(&graph, 0)], 5);

    let only_into_one = graph.reverse(|p| *p == 1);
    assert_eq!(only_into_one.render(" "), "1->1->0 1->4->4");
}

#[test]
fn incoming_weight_ranks_the_cycle_entry() {
    let graph = known_graph();
    let incoming = graph.incoming_vertex_weight(|a, b| a + b);
    assert_eq!(incoming[&v(&graph, 1)], 5);
    assert_eq!(incoming[&v(&graph, 3)], 6);
    assert!(!incoming.contains_key(&v(&graph, 0)));
}

// ---------------------------------------------------------------------------
// Reachability
// ---------------------------------------------------------------------------

#[test]
fn follow_from_source_reaches_everything() {
    let graph = known_graph();
    let reached = follow(&graph, v(&graph, 0));
    assert_eq!(payloads(&graph, &reached), [0, 1, 2, 3, 4]);
}

#[test]
fn follow_from_cycle_stays_in_cycle() {
    let graph = known_graph();
    let reached = follow_all(&graph, [v(&graph, 2)], false);
    assert_eq!(payloads(&graph, &reached), [1, 2, 3, 4]);
}

// ---------------------------------------------------------------------------
// Shortest path
// ---------------------------------------------------------------------------

#[test]
fn trivial_connection_distances() {
    let graph = known_graph();
    let index = DenseIndex::new(&graph);
    let solver = DijkstraShortestPath::<Unconstrained>::default();
    let source = index.id(v(&graph, 0)).unwrap();
    let dist = solver
        .shortest_path(index.len(), |id| index.plain_edges(&graph, id), source)
        .unwrap();
    assert_eq!(dist, [0, 1, 3, 4, 5]);
}

#[test]
fn source_inside_cycle_cannot_reach_zero() {
    let graph = known_graph();
    let index = DenseIndex::new(&graph);
    let solver = DijkstraShortestPath::<Unconstrained>::default();
    let dist = solver
        .shortest_path(index.len(), |id| index.plain_edges(&graph, id), 1)
        .unwrap();
    assert_eq!(dist, [NO_PATH, 0, 2, 3, 4]);
}

// ---------------------------------------------------------------------------
// Shortest cycle
// ---------------------------------------------------------------------------

#[test]
fn shortest_cycle_through_one() {
    let graph = known_graph();
    let cycle = shortest_cycle(&graph, v(&graph, 1)).unwrap();
    let path: Vec<u32> = cycle.vertices.iter().map(|x| *graph.payload(*x)).collect();
    assert_eq!(path, [1, 2, 3, 4, 1]);
    assert_eq!(cycle.distance, 8);
}

#[test]
fn no_cycle_through_zero() {
    let graph = known_graph();
    assert!(shortest_cycle(&graph, v(&graph, 0)).is_none());
}

// ---------------------------------------------------------------------------
// Linearization
// ---------------------------------------------------------------------------

#[test]
fn one_cycle_with_zero_attached() {
    let graph = known_graph();
    let result = linearize(&graph, LinearizationMode::All);

    assert!(result.hierarchy.is_empty());
    assert_eq!(result.remaining_cycles.len(), 1);
    let group = result.remaining_cycles.iter().next().unwrap();
    assert_eq!(group.size(), 4);
    assert_eq!(payloads(&graph, group.vertices()), [1, 2, 3, 4]);
    assert_eq!(group.shortest().map(|c| c.distance), Some(8));

    assert_eq!(result.attached_to_cycles.len(), 1);
    assert_eq!(result.attached_to_cycles.vertex_count(), 1);
    assert_eq!(result.attached_to_cycles.render(&graph), "[0]");
}

#[test]
fn breaking_the_cycle_linearizes_everything() {
    let graph = known_graph();
    let mut cut = indexmap::IndexMap::new();
    cut.insert(v(&graph, 4), [v(&graph, 1)].into_iter().collect::<IndexSet<_>>());
    let acyclic = graph.with_fewer_edges(&cut);

    let result = linearize(&acyclic, LinearizationMode::All);
    assert!(result.is_acyclic());
    assert!(result.attached_to_cycles.is_empty());
    assert_eq!(result.hierarchy.render(&acyclic), "[4]; [3]; [2]; [1]; [0]");
}

#[test]
fn builder_and_adjacency_agree() {
    let mut builder = GraphBuilder::summing();
    for (from, to, weight) in [(0, 1, 1), (0, 2, 4), (0, 3, 5), (1, 2, 2), (2, 3, 1), (3, 4, 1), (4, 1, 4)] {
        builder.merge_edge(from, to, weight);
    }
    let built = builder.build();
    assert_eq!(built.content_hash(), known_graph().content_hash());
}
