use canopy::{
    Engine, ForceOptions, ForceSimulation, Graph, LayoutConfig, LayoutKind, Node, Viewport,
};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

const VIEWPORT: Viewport = Viewport::new(1600.0, 1200.0);

/// Balanced mind map: every node has `fanout` children until `node_count` is reached.
fn build_tree(node_count: usize, fanout: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..node_count {
        g = g.with_node(Node::new(format!("n{i}")));
    }
    for i in 1..node_count {
        let parent = (i - 1) / fanout;
        g = g.with_edge(format!("n{parent}"), format!("n{i}"));
    }
    g
}

fn bench_tree_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_layouts");
    let engine = Engine::new();

    let cases = [("tree_100_f4", 100usize, 4usize), ("tree_1000_f6", 1000, 6)];
    for (name, nodes, fanout) in cases {
        let g = build_tree(nodes, fanout);
        for kind in [LayoutKind::Layered, LayoutKind::Orthogonal, LayoutKind::Radial] {
            let cfg = LayoutConfig::new(kind);
            group.bench_with_input(BenchmarkId::new(kind.as_str(), name), &g, |b, g| {
                b.iter(|| {
                    let result = engine.layout_sync(black_box(g), &cfg, VIEWPORT);
                    black_box(result.map(|r| r.positions.len()).unwrap_or(0));
                })
            });
        }
    }

    group.finish();
}

fn bench_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("force");
    group.measurement_time(Duration::from_secs(10));

    let cases = [("tree_50_f3", 50usize, 3usize), ("tree_200_f4", 200, 4)];
    for (name, nodes, fanout) in cases {
        let g = build_tree(nodes, fanout);
        group.bench_with_input(BenchmarkId::new("ForceSimulation::run", name), &g, |b, g| {
            b.iter_batched(
                || ForceSimulation::new(g, ForceOptions::default(), VIEWPORT, Default::default()),
                |mut sim| {
                    black_box(sim.run());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_layouts, bench_force);
criterion_main!(benches);
