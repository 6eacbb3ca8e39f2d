use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use proptest::prelude::*;

use strata_graph::ops::dijkstra::{DenseIndex, DijkstraShortestPath, NO_PATH, Unconstrained};
use strata_graph::ops::{LinearizationMode, follow, follow_all, linearize};
use strata_graph::{Graph, GraphBuilder, Vertex};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_edges() -> impl Strategy<Value = Vec<(u8, u8, i64)>> {
    prop::collection::vec((0u8..12, 0u8..12, 0i64..20), 0..40)
}

fn build(edges: &[(u8, u8, i64)]) -> Graph<u8> {
    let mut builder = GraphBuilder::summing();
    for &(from, to, weight) in edges {
        builder.merge_edge(from, to, weight);
    }
    builder.build()
}

fn edge_set(graph: &Graph<u8>) -> HashSet<(u8, u8, i64)> {
    graph
        .edges_iter()
        .map(|e| (*graph.payload(e.from), *graph.payload(e.to), e.weight))
        .collect()
}

/// Bellman-Ford reference distances, plain weights only.
fn reference_distances(graph: &Graph<u8>, index: &DenseIndex, source: usize) -> Vec<i64> {
    let mut dist = vec![NO_PATH; index.len()];
    dist[source] = 0;
    for _ in 0..index.len() {
        for edge in graph.edges_iter() {
            let (Some(from), Some(to)) = (index.id(edge.from), index.id(edge.to)) else {
                continue;
            };
            if dist[from] != NO_PATH && dist[from] + edge.weight < dist[to] {
                dist[to] = dist[from] + edge.weight;
            }
        }
    }
    dist
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn merge_edge_folds_all_weights(weights in prop::collection::vec(-50i64..50, 1..10)) {
        let mut forward = GraphBuilder::summing();
        let mut backward = GraphBuilder::summing();
        for &w in &weights {
            forward.merge_edge("a", "b", w);
        }
        for &w in weights.iter().rev() {
            backward.merge_edge("a", "b", w);
        }
        let (f, b) = (forward.build(), backward.build());
        let expected: i64 = weights.iter().sum();
        let (fa, fb) = (f.vertex("a").unwrap(), f.vertex("b").unwrap());
        prop_assert_eq!(f.weight(fa, fb), Some(expected));
        prop_assert_eq!(b.weight(b.vertex("a").unwrap(), b.vertex("b").unwrap()), Some(expected));
    }

    #[test]
    fn reverse_twice_is_identity(edges in arb_edges()) {
        let graph = build(&edges);
        let twice = graph.reverse(|_| true).reverse(|_| true);
        prop_assert_eq!(edge_set(&twice), edge_set(&graph));
        prop_assert_eq!(twice.vertex_count(), graph.vertex_count());
    }

    #[test]
    fn sub_graph_is_closed(edges in arb_edges(), keep in prop::collection::hash_set(0u8..12, 0..12)) {
        let graph = build(&edges);
        let subset: IndexSet<Vertex> = keep.iter().filter_map(|p| graph.vertex(p)).collect();
        let sub = graph.sub_graph(&subset);
        for edge in sub.edges_iter() {
            prop_assert!(subset.contains(&edge.from));
            prop_assert!(subset.contains(&edge.to));
            prop_assert_eq!(graph.weight(edge.from, edge.to), Some(edge.weight));
        }
    }

    #[test]
    fn follow_is_idempotent(edges in arb_edges(), start in 0u8..12) {
        let graph = build(&edges);
        if let Some(start) = graph.vertex(&start) {
            let once = follow(&graph, start);
            let twice = follow_all(&graph, once.iter().copied(), true);
            let once: HashSet<Vertex> = once.into_iter().collect();
            let twice: HashSet<Vertex> = twice.into_iter().collect();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn pruning_never_adds_edges(edges in arb_edges(), cut in prop::collection::vec((0u8..12, 0u8..12), 0..20)) {
        let graph = build(&edges);
        let mut remove: IndexMap<Vertex, IndexSet<Vertex>> = IndexMap::new();
        for (from, to) in cut {
            if let (Some(from), Some(to)) = (graph.vertex(&from), graph.vertex(&to)) {
                remove.entry(from).or_default().insert(to);
            }
        }
        let pruned = graph.with_fewer_edges(&remove);
        prop_assert_eq!(pruned.vertex_count(), graph.vertex_count());
        for vertex in graph.vertices() {
            let before = graph.edges(vertex).map_or(0, IndexMap::len);
            let after = pruned.edges(vertex).map(IndexMap::len);
            prop_assert!(after.unwrap_or(0) <= before);
            prop_assert_ne!(after, Some(0));
        }
    }

    #[test]
    fn linearization_is_total_and_disjoint(edges in arb_edges()) {
        let graph = build(&edges);
        let result = linearize(&graph, LinearizationMode::All);

        let mut seen: HashSet<Vertex> = HashSet::new();
        let placed = result
            .hierarchy
            .vertices()
            .chain(result.remaining_cycles.iter().flat_map(|g| g.vertices().iter().copied()))
            .chain(result.attached_to_cycles.vertices());
        for vertex in placed {
            prop_assert!(seen.insert(vertex), "{} placed twice", vertex);
        }
        prop_assert_eq!(seen.len(), graph.vertex_count());

        // Layered vertices only depend on earlier layers (or themselves).
        for (depth, layer) in result.hierarchy.layers().iter().enumerate() {
            for &vertex in layer {
                for &target in graph.edges(vertex).into_iter().flat_map(IndexMap::keys) {
                    if target != vertex {
                        let target_depth = result.hierarchy.layer_of(target);
                        prop_assert!(target_depth.is_some_and(|d| d < depth));
                    }
                }
            }
        }
    }

    #[test]
    fn trivial_connection_matches_bellman_ford(edges in arb_edges(), start in 0u8..12) {
        let graph = build(&edges);
        if let Some(start) = graph.vertex(&start) {
            let index = DenseIndex::new(&graph);
            let source = index.id(start).unwrap();
            let solver = DijkstraShortestPath::<Unconstrained>::default();
            let dist = solver
                .shortest_path(index.len(), |id| index.plain_edges(&graph, id), source)
                .unwrap();
            prop_assert_eq!(dist, reference_distances(&graph, &index, source));
        }
    }
}
