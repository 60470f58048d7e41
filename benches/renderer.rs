use archstack::config::{Config, LayoutConfig};
use archstack::ir::{ConnectionSpec, Diagram, LayerSpec};
use archstack::layout::compute_layout;
use archstack::render::render_svg;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn tall_stack(layers: usize, components: usize) -> Diagram {
    let names: Vec<String> = (0..components).map(|i| format!("Node {i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut diagram = Diagram::new();
    for i in 0..layers {
        diagram
            .layers
            .push(LayerSpec::new(&format!("Tier {i}"), &refs, "#5D878F"));
    }
    for i in 0..layers.saturating_sub(1) {
        diagram.connections.push(ConnectionSpec::new(
            &format!("Tier {i}"),
            &format!("Tier {}", i + 1),
            "TCP",
            9.5,
        ));
    }
    diagram
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for layers in [7usize, 50, 400] {
        let diagram = tall_stack(layers, 4);
        group.bench_with_input(BenchmarkId::from_parameter(layers), &diagram, |b, d| {
            b.iter(|| compute_layout(black_box(d), &config).unwrap())
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let config = Config::default();
    let diagram = Diagram::sample();
    let layout = compute_layout(&diagram, &config.layout).unwrap();
    c.bench_function("render_svg/sample", |b| {
        b.iter(|| render_svg(black_box(&layout), &config.theme, &config.render))
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
