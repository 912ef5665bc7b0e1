use std::f32::consts::TAU;
use std::hint::black_box;

use chord_layout::{place_labels, ArcSegment, LabelBox, LabelParams};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn clustered_arcs(n: usize) -> Vec<ArcSegment> {
    // Arcs squeezed into the lower half of the circle so the relaxation
    // passes actually have work to do.
    let start = TAU * 0.25;
    let span = TAU * 0.5;
    let step = span / n as f32;
    (0..n)
        .map(|i| ArcSegment {
            start_angle: start + step * i as f32,
            end_angle: start + step * (i as f32 + 0.9),
        })
        .collect()
}

fn params() -> LabelParams {
    LabelParams {
        anchor_radius: 259.0,
        circle_radius: 225.0,
        margin: 1.5,
        step: 2.0,
        padding_x: 5.0,
        max_pass_factor: 10,
    }
}

fn bench_place_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_labels");
    for n in [10usize, 40, 80] {
        let arcs = clustered_arcs(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &arcs, |b, arcs| {
            b.iter(|| {
                place_labels(black_box(arcs), &params(), |i| LabelBox {
                    width: 60.0 + (i % 7) as f32 * 10.0,
                    height: 13.2,
                })
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_place_labels);
criterion_main!(benches);
