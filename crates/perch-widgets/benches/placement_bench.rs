//! Benchmarks for tooltip placement
//!
//! Run with: cargo bench -p perch-widgets

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use perch_core::debounce::Debouncer;
use perch_core::geometry::{BoxMetrics, Point, Rect, Size};
use perch_core::host::PositionKind;
use perch_harness::{MemoryDom, NodeId, NodeSpec};
use perch_widgets::position::place;
use perch_widgets::{
    Align, EdgeContext, PlacementSpec, Side, TooltipOptions, TooltipSurface, compute_placement,
    correct_edges,
};

// ============================================================================
// Pure geometry
// ============================================================================

fn bench_compute_and_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/geometry");
    let host = BoxMetrics::new(100.0, 50.0, 80.0, 20.0);
    let tooltip = Size::new(120.0, 30.0);
    let container = Size::new(160.0, 400.0);

    for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
        let placement = PlacementSpec::new(side, Align::Start);
        let cx = EdgeContext::new(side, tooltip, 100.0, container);
        group.bench_with_input(BenchmarkId::new("side", side.as_str()), &(), |b, _| {
            b.iter(|| {
                let raw = compute_placement(black_box(host), black_box(tooltip), placement);
                black_box(correct_edges(raw, &cx))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Measurement through a host
// ============================================================================

/// Host nested `depth` levels under static wrappers inside a positioned root.
fn nested_dom(depth: usize) -> (MemoryDom, NodeId, NodeId) {
    let mut dom = MemoryDom::new(1280.0, 800.0);
    let mut parent =
        dom.insert(NodeSpec::new(Rect::new(0.0, 0.0, 1280.0, 800.0)).position(PositionKind::Relative));
    for level in 0..depth {
        let inset = level as f64 * 4.0;
        parent = dom.insert(
            NodeSpec::new(Rect::new(inset, inset, 1000.0 - inset, 600.0 - inset)).parent(parent),
        );
    }
    let host = dom.insert(NodeSpec::new(Rect::new(300.0, 200.0, 80.0, 20.0)).parent(parent));
    let tip = dom.insert(
        NodeSpec::new(Rect::from_origin_size(Point::OFFSCREEN, Size::new(120.0, 30.0)))
            .position(PositionKind::Absolute),
    );
    (dom, host, tip)
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/place");

    for depth in [0, 4, 16] {
        let (dom, host, tip) = nested_dom(depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &(), |b, _| {
            b.iter(|| {
                black_box(place(
                    &dom,
                    black_box(&host),
                    &tip,
                    PlacementSpec::centered(Side::Bottom),
                    5.0,
                ))
            })
        });
    }

    group.finish();
}

fn bench_surface_show_hide(c: &mut Criterion) {
    let (dom, host, tip) = nested_dom(4);
    let mut surface = TooltipSurface::new(tip, TooltipOptions::default());
    surface.bind_host(host);

    c.bench_function("surface/show_hide", |b| {
        b.iter(|| {
            surface.show(&dom);
            black_box(surface.hide());
        })
    });
}

// ============================================================================
// Debounce
// ============================================================================

fn bench_debounce_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("debounce/burst");

    for burst in [10u64, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("calls", burst), &burst, |b, &burst| {
            b.iter(|| {
                let mut debouncer = Debouncer::new(Duration::from_millis(300));
                for i in 0..burst {
                    debouncer.call(i % 2 == 0, Duration::from_millis(i));
                }
                black_box(debouncer.poll(Duration::from_millis(burst + 300)))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_and_correct,
    bench_place,
    bench_surface_show_hide,
    bench_debounce_burst,
);

criterion_main!(benches);
