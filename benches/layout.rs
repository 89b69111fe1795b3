use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use proofmap::config::LayoutConfig;
use proofmap::dataset::parse_dataset;
use proofmap::graph::Graph;
use proofmap::layout::compute_layout;
use proofmap::render::render_svg;
use proofmap::theme::DrawStyle;
use std::hint::black_box;

/// `chapters` chapters, each with a full two-level tree of `fanout` branches.
fn synthetic_dataset(chapters: usize, fanout: usize) -> String {
    let fanout = fanout.min(10);
    let mut records = Vec::new();
    let mut id = 0usize;
    for chapter in 1..=chapters {
        for first in 0..fanout {
            id += 1;
            records.push(format!(
                "{{\"id\": \"{id}\", \"number\": \"{chapter}.{first}\", \"part\": \"1\"}}"
            ));
            for second in 0..fanout {
                id += 1;
                records.push(format!(
                    "{{\"id\": \"{id}\", \"number\": \"{chapter}.{first}{second}\", \"part\": \"2\"}}"
                ));
            }
        }
    }
    format!("[{}]", records.join(","))
}

fn sizes() -> [(&'static str, usize, usize); 3] {
    [("small", 4, 4), ("medium", 20, 8), ("large", 80, 10)]
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for (name, chapters, fanout) in sizes() {
        let input = synthetic_dataset(chapters, fanout);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let store = parse_dataset(black_box(data)).expect("parse failed");
                let graph = Graph::new(store).expect("graph failed");
                black_box(graph.len());
            });
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    for (name, chapters, fanout) in sizes() {
        let store = parse_dataset(&synthetic_dataset(chapters, fanout)).expect("parse failed");
        let graph = Graph::new(store).expect("graph failed");
        group.bench_with_input(
            BenchmarkId::new("adjacency", name),
            &graph,
            |b, data| {
                b.iter(|| black_box(data.create_adjacency_list().len()));
            },
        );
        group.bench_with_input(BenchmarkId::new("lowest", name), &graph, |b, data| {
            b.iter(|| black_box(data.generate_lowest_numbers().len()));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for (name, chapters, fanout) in sizes() {
        let store = parse_dataset(&synthetic_dataset(chapters, fanout)).expect("parse failed");
        let graph = Graph::new(store).expect("graph failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &graph, |b, data| {
            b.iter(|| {
                let layout = compute_layout(black_box(data), &config);
                black_box(layout.node_count());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = LayoutConfig::default();
    let style = DrawStyle::normal();
    for (name, chapters, fanout) in sizes() {
        let store = parse_dataset(&synthetic_dataset(chapters, fanout)).expect("parse failed");
        let graph = Graph::new(store).expect("graph failed");
        let layout = compute_layout(&graph, &config);
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &style);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_build, bench_queries, bench_layout, bench_render
);
criterion_main!(benches);
