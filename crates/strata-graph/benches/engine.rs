use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use strata_graph::ops::dijkstra::{DenseIndex, DijkstraShortestPath, Unconstrained};
use strata_graph::ops::{LinearizationMode, linearize, shortest_cycle};
use strata_graph::{Graph, GraphBuilder};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Layered DAG with a back edge every `stride` vertices, so the graph has a
/// mix of acyclic layers, cycles and vertices attached to them.
fn synthetic(n: usize, stride: usize) -> Graph<usize> {
    let mut builder = GraphBuilder::summing();
    for v in 0..n {
        builder.add_vertex(v);
        for step in [1, 3, 7] {
            let to = v + step;
            if to < n {
                let weight = i64::try_from((v * 31 + step) % 17).unwrap_or(1) + 1;
                builder.merge_edge(v, to, weight);
            }
        }
        if v % stride == stride - 1 {
            builder.merge_edge(v, v + 1 - stride, 5);
        }
    }
    builder.build()
}

fn bench_linearize(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.linearize");
    for n in SIZES {
        let graph = synthetic(n, 50);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| black_box(linearize(graph, LinearizationMode::All)));
        });
    }
    group.finish();
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.shortest_path");
    for n in SIZES {
        let graph = synthetic(n, 50);
        let index = DenseIndex::new(&graph);
        let solver = DijkstraShortestPath::<Unconstrained>::default();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| {
                black_box(solver.shortest_path(index.len(), |id| index.plain_edges(graph, id), 0))
            });
        });
    }
    group.finish();
}

fn bench_shortest_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.shortest_cycle");
    for n in [100, 1_000] {
        let graph = synthetic(n, 50);
        let Some(start) = graph.vertex(&0) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| black_box(shortest_cycle(graph, start)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_linearize, bench_shortest_path, bench_shortest_cycle);
criterion_main!(benches);
