#![forbid(unsafe_code)]

//! Property tests for the positioning engine.
//!
//! - Raw placement puts the facing tooltip edge on the host edge.
//! - Edge correction keeps `left >= 0` whenever the tooltip fits.
//! - A right overflow ends exactly `edge_margin` inside the container.
//! - The top side never ends above its raw position.

use perch_core::geometry::{BoxMetrics, Size};
use perch_widgets::{Align, EdgeContext, PlacementSpec, Side, compute_placement, correct_edges};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right)
    ]
}

fn align() -> impl Strategy<Value = Align> {
    prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End)]
}

fn host_box() -> impl Strategy<Value = BoxMetrics> {
    (0.0..2000.0f64, 0.0..2000.0f64, 0.0..400.0f64, 0.0..200.0f64)
        .prop_map(|(top, left, width, height)| BoxMetrics::new(top, left, width, height))
}

fn tooltip_size() -> impl Strategy<Value = Size> {
    (1.0..300.0f64, 1.0..150.0f64).prop_map(|(w, h)| Size::new(w, h))
}

proptest! {
    #[test]
    fn facing_edge_touches_host(
        host in host_box(),
        tooltip in tooltip_size(),
        side in side(),
        align in align(),
    ) {
        let raw = compute_placement(host, tooltip, PlacementSpec::new(side, align));
        match side {
            Side::Top => prop_assert!((raw.top + tooltip.height - host.top).abs() < EPS),
            Side::Bottom => prop_assert!((raw.top - host.bottom()).abs() < EPS),
            Side::Left => prop_assert!((raw.left + tooltip.width - host.left).abs() < EPS),
            Side::Right => prop_assert!((raw.left - host.right()).abs() < EPS),
        }
    }

    #[test]
    fn fitting_tooltip_never_starts_left_of_container(
        host in host_box(),
        tooltip in tooltip_size(),
        side in side(),
        align in align(),
        extra in 5.0..2000.0f64,
    ) {
        let container = Size::new(tooltip.width + extra, 4000.0);
        let raw = compute_placement(host, tooltip, PlacementSpec::new(side, align));
        let cx = EdgeContext::new(side, tooltip, host.top, container);
        let corrected = correct_edges(raw, &cx);
        prop_assert!(corrected.left >= -EPS, "left {} for {:?}", corrected.left, raw);
    }

    #[test]
    fn right_overflow_lands_at_margin(
        left in 0.0..2000.0f64,
        tooltip in tooltip_size(),
        width in 300.0..1500.0f64,
        margin in 0.0..20.0f64,
    ) {
        let container = Size::new(width, 4000.0);
        let mut cx = EdgeContext::new(Side::Bottom, tooltip, 0.0, container);
        cx.edge_margin = margin;
        let corrected = correct_edges(perch_widgets::Position::new(0.0, left), &cx);
        if left + tooltip.width > width {
            prop_assert!((corrected.left + tooltip.width - (width - margin)).abs() < 1e-6);
        } else {
            prop_assert!((corrected.left - left).abs() < EPS);
        }
    }

    #[test]
    fn top_correction_only_moves_down(
        host in host_box(),
        tooltip in tooltip_size(),
        offset_top in 0.0..2000.0f64,
    ) {
        let raw = compute_placement(host, tooltip, Side::Top.into());
        let cx = EdgeContext::new(Side::Top, tooltip, offset_top, Size::new(4000.0, 4000.0));
        let corrected = correct_edges(raw, &cx);
        prop_assert!(corrected.top >= raw.top - EPS);
        if raw.top + tooltip.height <= offset_top {
            prop_assert!((corrected.top - raw.top).abs() < EPS);
        }
    }
}
