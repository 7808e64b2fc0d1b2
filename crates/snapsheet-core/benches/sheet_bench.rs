//! Benchmark: per-sample and per-frame controller cost.
//!
//! Run with: `cargo bench -p snapsheet-core --bench sheet_bench`
//!
//! A gesture move and a spring frame both run on the UI thread at display
//! rate, so each must stay far below a frame budget.

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use snapsheet_core::{
    SheetConfig, SheetController, SheetVisuals, SnapPolicy, SnapTargets, Viewport, compute_targets,
};

const FRAME: Duration = Duration::from_millis(16);

fn three_point() -> SheetController {
    SheetController::with_targets(
        SheetConfig::three_point(),
        SnapTargets::from_offsets(&[100.0, 400.0, 700.0]),
    )
    .unwrap()
}

// ===========================================================================
// Gesture path
// ===========================================================================

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag");

    group.bench_function("move_sample", |b| {
        let mut sheet = three_point();
        sheet.on_drag_start();
        let mut translation = 0.0;
        b.iter(|| {
            translation = if translation < -800.0 { 0.0 } else { translation - 3.0 };
            black_box(sheet.on_drag_move(black_box(translation)))
        });
    });

    group.bench_function("resolve_release", |b| {
        let targets = SnapTargets::from_offsets(&[100.0, 400.0, 700.0]);
        let policy = SnapPolicy::default();
        b.iter(|| black_box(policy.resolve(black_box(410.0), black_box(0.05), 2, &targets)));
    });

    group.finish();
}

// ===========================================================================
// Frame path
// ===========================================================================

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    group.bench_function("full_settle", |b| {
        b.iter(|| {
            let mut sheet = three_point();
            sheet.on_drag_start();
            sheet.on_drag_move(-500.0);
            sheet.on_drag_end(-500.0, -0.8);
            let mut frames = 0u32;
            while !sheet.is_at_rest() {
                black_box(sheet.tick(FRAME));
                frames += 1;
            }
            frames
        });
    });

    group.bench_function("visuals", |b| {
        let mut p = 0.0;
        b.iter(|| {
            p = if p >= 1.0 { 0.0 } else { p + 0.01 };
            black_box(SheetVisuals::at(black_box(p)))
        });
    });

    group.bench_function("compute_targets", |b| {
        let viewport = Viewport::new(390.0, 844.0);
        let layout = SheetConfig::three_point().layout;
        b.iter(|| black_box(compute_targets(black_box(&viewport), &layout)));
    });

    group.finish();
}

criterion_group!(benches, bench_drag, bench_frame);
criterion_main!(benches);
