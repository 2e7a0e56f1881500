//! Criterion benchmarks for graph instances
//!
//! Measures:
//! - Construction (normalization + shape validation)
//! - View build (first access) vs cached view copy
//! - Sync + duplication

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_instance::{AdjacencyMatrix, GraphInstance, InstanceId, Label, NodeId};
use std::hint::black_box;

/// Generate a random-ish sparse adjacency matrix
fn generate_adjacency(num_nodes: usize, edges_per_node: usize) -> AdjacencyMatrix {
    let mut edges = Vec::new();
    let mut rng_state = 12345_u64; // Simple LCG for reproducibility

    for node in 0..num_nodes {
        for _ in 0..edges_per_node {
            rng_state = rng_state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let target = (rng_state % num_nodes as u64) as u32;

            if target != node as u32 {
                edges.push((NodeId(node as u32), NodeId(target), 1.0));
            }
        }
    }

    AdjacencyMatrix::from_edge_list(num_nodes, &edges).unwrap()
}

/// Benchmark: construction with default features
fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for size in [50, 100, 250, 500].iter() {
        let adj = generate_adjacency(*size, 3);

        group.bench_with_input(BenchmarkId::new("defaults", size), &adj, |b, adj| {
            b.iter(|| {
                let instance =
                    GraphInstance::new(InstanceId(0), Label::Class(0), black_box(adj.clone()))
                        .unwrap();
                black_box(instance);
            });
        });
    }

    group.finish();
}

/// Benchmark: view build vs cached copy
fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");

    for size in [50, 100, 250, 500].iter() {
        let adj = generate_adjacency(*size, 3);
        let mut instance = GraphInstance::new(InstanceId(0), Label::Class(0), adj).unwrap();

        group.bench_with_input(BenchmarkId::new("build", size), size, |b, _| {
            b.iter(|| {
                instance.invalidate_view();
                black_box(instance.view());
            });
        });

        let _ = instance.view();
        group.bench_with_input(BenchmarkId::new("cached_copy", size), size, |b, _| {
            b.iter(|| black_box(instance.view()));
        });
    }

    group.finish();
}

/// Benchmark: sync followed by duplication
fn bench_duplicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate");

    for size in [50, 100, 250, 500].iter() {
        let adj = generate_adjacency(*size, 3);
        let mut instance = GraphInstance::new(InstanceId(0), Label::Class(0), adj).unwrap();

        group.bench_with_input(BenchmarkId::new("synced_defaults", size), size, |b, _| {
            b.iter(|| black_box(instance.clone_with_synced_defaults()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_view, bench_duplicate);
criterion_main!(benches);
