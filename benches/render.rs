#![allow(clippy::unwrap_used)]
//! Benchmarks for frame planning, gradient rasterization and background updates

#![allow(missing_docs)]

use colorclock::clock::{ClockColor, TimeSample};
use colorclock::geometry::Size;
use colorclock::render::{BackgroundCache, FrameLayout, FramePlan, RadialGradient};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SURFACES: [(u32, u32); 3] = [(152, 112), (1920, 1080), (3840, 2160)];

fn bench_frame_plan(c: &mut Criterion) {
    let sample = TimeSample::new(18, 30, 0).unwrap();
    c.bench_function("frame_plan_1080p", |b| {
        b.iter(|| FramePlan::new(black_box(sample), black_box(Size::new(1920, 1080))));
    });
}

fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("gradient_rasterize");
    let sample = TimeSample::new(12, 34, 56).unwrap();

    for (width, height) in SURFACES {
        let size = Size::new(width, height);
        let plan = FramePlan::new(sample, size);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &size,
            |b, &size| b.iter(|| plan.gradient.rasterize(black_box(size))),
        );
    }
    group.finish();
}

fn bench_cached_background(c: &mut Criterion) {
    let size = Size::new(1920, 1080);
    let plan = FramePlan::new(TimeSample::new(7, 8, 9).unwrap(), size);
    let mut cache = BackgroundCache::new();
    cache.get(&plan.gradient, size);

    c.bench_function("background_cache_hit_1080p", |b| {
        b.iter(|| cache.get(black_box(&plan.gradient), black_box(size)).bgra.len());
    });
}

fn bench_blend_map(c: &mut Criterion) {
    let size = Size::new(3840, 2160);
    let layout = FrameLayout::compute(size);
    let gradient = RadialGradient::for_surface(&layout, ClockColor::new(120, 64, 200));
    c.bench_function("blend_map_4k", |b| {
        b.iter(|| gradient.blend_map(black_box(size)).levels().len());
    });
}

/// The once-a-second cost on the UI thread: a new color on a known size
fn bench_color_change(c: &mut Criterion) {
    let size = Size::new(3840, 2160);
    let layout = FrameLayout::compute(size);
    let gradients = [
        RadialGradient::for_surface(&layout, ClockColor::new(120, 64, 200)),
        RadialGradient::for_surface(&layout, ClockColor::new(121, 64, 204)),
    ];
    let mut cache = BackgroundCache::new();
    cache.get(&gradients[0], size);

    let mut next = 1;
    c.bench_function("background_color_change_4k", |b| {
        b.iter(|| {
            let len = cache.get(black_box(&gradients[next]), size).bgra.len();
            next ^= 1;
            len
        });
    });
}

criterion_group!(
    benches,
    bench_frame_plan,
    bench_rasterize,
    bench_cached_background,
    bench_blend_map,
    bench_color_change
);
criterion_main!(benches);
