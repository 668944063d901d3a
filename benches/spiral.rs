// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of spiral evaluation and cache refresh.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector3;
use spiral3d::{
    AngleSweep, CurvePrimitive, Polyline, Segment1d, SpiralType, StrokeOptions, Transform3,
    TransitionSpiral,
};

fn spiral(spiral_type: SpiralType, active: Segment1d) -> TransitionSpiral {
    TransitionSpiral::from_radius_radius_bearing_bearing(
        Some(spiral_type.name()),
        Segment1d::new(0.0, 250.0),
        AngleSweep::from_start_end_degrees(15.0, 40.0),
        active,
        Transform3::rotate_z(0.3).then_translate(Vector3::new(1000.0, 2000.0, 50.0)),
    )
    .unwrap()
}

fn bench_fraction_to_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("fraction_to_point");
    for spiral_type in SpiralType::ALL {
        let curve = spiral(spiral_type, Segment1d::UNIT);
        group.bench_with_input(BenchmarkId::from_parameter(spiral_type), &curve, |b, curve| {
            b.iter(|| curve.fraction_to_point(black_box(0.6180339887)));
        });
    }
    group.finish();
}

fn bench_derivatives(c: &mut Criterion) {
    let curve = spiral(SpiralType::Clothoid, Segment1d::new(0.2, 0.9));
    c.bench_function("fraction_to_point_and_2_derivatives", |b| {
        b.iter(|| curve.fraction_to_point_and_2_derivatives(black_box(0.37)));
    });
    c.bench_function("fraction_to_frenet_frame", |b| {
        b.iter(|| curve.fraction_to_frenet_frame(black_box(0.37)));
    });
}

fn bench_refresh(c: &mut Criterion) {
    let curve = spiral(SpiralType::Bloss, Segment1d::new(0.1, 0.8));
    c.bench_function("reverse_in_place", |b| {
        let mut curve = curve.clone();
        b.iter(|| curve.reverse_in_place());
    });
    let transform = Transform3::rotate_z(0.01);
    c.bench_function("try_transform_in_place", |b| {
        let mut curve = curve.clone();
        b.iter(|| curve.try_transform_in_place(black_box(&transform)));
    });
}

fn bench_strokes(c: &mut Criterion) {
    let curve = spiral(SpiralType::Sine, Segment1d::UNIT);
    let options = StrokeOptions::default().with_chord_tol(0.001);
    c.bench_function("emit_strokes_chord_tol", |b| {
        b.iter(|| {
            let mut strokes = Polyline::new();
            curve.emit_strokes(&mut strokes, Some(black_box(&options)));
            strokes
        });
    });
}

criterion_group!(
    benches,
    bench_fraction_to_point,
    bench_derivatives,
    bench_refresh,
    bench_strokes
);
criterion_main!(benches);
