#![forbid(unsafe_code)]

//! Tooltip positioning engine.
//!
//! Placement happens in three steps:
//!
//! 1. [`compute_placement`]: pure geometry. The tooltip box is laid against
//!    the chosen host edge and aligned along it.
//! 2. [`correct_edges`]: post-processing inside the offset parent's content
//!    box. Keeps the tooltip off the host (top side), inside the container
//!    vertically (left/right sides), and inside it horizontally (all sides).
//! 3. [`caret_for`]: the arrow sits at the host's declared inline
//!    coordinates, pushed to the host's trailing edge on the right side.
//!
//! [`place`] runs all three against a [`LayoutHost`].
//!
//! # Invariants
//!
//! 1. Before correction, the tooltip edge facing the host touches the host
//!    edge for every side and alignment.
//! 2. After correction, `left >= 0` unless the tooltip is wider than the
//!    container minus the edge margin.
//! 3. A tooltip that overflows the right edge ends `edge_margin` pixels
//!    inside it.

use perch_core::geometry::{BoxMetrics, Size};
use perch_core::host::{DeclaredOffset, LayoutHost};
use perch_core::measure;

use crate::placement::{Align, PlacementSpec, Side};

/// Default gap kept between a right-clamped tooltip and the container edge.
pub const EDGE_MARGIN: f64 = 5.0;

/// Top/left coordinates of the tooltip box relative to its positioning root.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

impl Position {
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Caret (arrow) coordinates. `None` leaves the axis to the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Caret {
    pub top: Option<f64>,
    pub left: Option<f64>,
}

fn horizontal(host: &BoxMetrics, tooltip: Size, align: Align) -> f64 {
    match align {
        Align::Start => host.left,
        Align::Center => host.center_x() - tooltip.width / 2.0,
        Align::End => host.right(),
    }
}

fn vertical(host: &BoxMetrics, tooltip: Size, align: Align) -> f64 {
    match align {
        Align::Start => host.top,
        Align::Center => host.center_y() - tooltip.height / 2.0,
        Align::End => host.bottom(),
    }
}

/// Lay the tooltip against the host edge named by `placement`.
#[must_use]
pub fn compute_placement(host: BoxMetrics, tooltip: Size, placement: PlacementSpec) -> Position {
    let PlacementSpec { side, align } = placement;
    match side {
        Side::Right => Position::new(vertical(&host, tooltip, align), host.right()),
        Side::Left => Position::new(vertical(&host, tooltip, align), host.left - tooltip.width),
        Side::Bottom => Position::new(host.bottom(), horizontal(&host, tooltip, align)),
        Side::Top => Position::new(host.top - tooltip.height, horizontal(&host, tooltip, align)),
    }
}

/// Inputs to [`correct_edges`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeContext {
    pub side: Side,
    /// Rendered tooltip size (border box).
    pub tooltip: Size,
    /// Tooltip padding-box height, used for the top-side overlap test.
    pub tooltip_client_height: f64,
    /// Host `offsetTop`.
    pub host_offset_top: f64,
    /// Content box of the host's offset parent.
    pub container: Size,
    pub edge_margin: f64,
}

impl EdgeContext {
    /// Context with the tooltip's client height equal to its border height
    /// and the default edge margin.
    #[must_use]
    pub fn new(side: Side, tooltip: Size, host_offset_top: f64, container: Size) -> Self {
        Self {
            side,
            tooltip,
            tooltip_client_height: tooltip.height,
            host_offset_top,
            container,
            edge_margin: EDGE_MARGIN,
        }
    }
}

/// Keep a raw placement clear of the host and inside the container.
#[must_use]
pub fn correct_edges(raw: Position, cx: &EdgeContext) -> Position {
    let mut top = raw.top;
    match cx.side {
        Side::Top => {
            let overlap = raw.top + cx.tooltip_client_height - cx.host_offset_top;
            if overlap > 0.0 {
                top += overlap;
            }
        }
        Side::Left | Side::Right => {
            let overflow = top + cx.tooltip.height - cx.container.height;
            if overflow > 0.0 {
                top -= overflow;
            }
        }
        Side::Bottom => {}
    }

    let mut left = raw.left.max(0.0);
    let overflow = left + cx.tooltip.width - cx.container.width;
    if overflow > 0.0 {
        left -= overflow + cx.edge_margin;
    }
    Position::new(top, left)
}

/// Caret position for `side`, given the host's declared offset and width.
#[must_use]
pub fn caret_for(side: Side, declared: DeclaredOffset, host_width: f64) -> Caret {
    let left = match side {
        Side::Right => declared.left.map(|left| left + host_width),
        _ => declared.left,
    };
    Caret {
        top: declared.top,
        left,
    }
}

/// Full placement result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Before edge correction.
    pub raw: Position,
    /// After edge correction. This is what gets rendered.
    pub position: Position,
    pub caret: Caret,
}

/// Measure `host_node` and `tooltip_node` and place the tooltip.
pub fn place<H: LayoutHost>(
    host: &H,
    host_node: &H::Node,
    tooltip_node: &H::Node,
    placement: PlacementSpec,
    edge_margin: f64,
) -> Placement {
    let _span = perch_core::debug_span!("perch.place", placement = %placement).entered();

    let host_box = measure::position(host, host_node);
    let tooltip = host.offset_size(tooltip_node);
    let raw = compute_placement(host_box, tooltip, placement);

    let cx = EdgeContext {
        side: placement.side,
        tooltip,
        tooltip_client_height: host.client_size(tooltip_node).height,
        host_offset_top: host.offset_top(host_node),
        container: measure::container_size(host, host_node),
        edge_margin,
    };
    let position = correct_edges(raw, &cx);
    let caret = caret_for(
        placement.side,
        host.declared_offset(host_node),
        host.offset_size(host_node).width,
    );

    perch_core::trace!(
        raw_top = raw.top,
        raw_left = raw.left,
        top = position.top,
        left = position.left,
        "placed tooltip"
    );
    Placement {
        raw,
        position,
        caret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: BoxMetrics = BoxMetrics::new(100.0, 50.0, 80.0, 20.0);

    fn wide_container() -> Size {
        Size::new(1000.0, 1000.0)
    }

    #[test]
    fn bottom_center_scenario() {
        let raw = compute_placement(HOST, Size::new(40.0, 10.0), "bottom-center".parse().unwrap());
        assert_eq!(raw, Position::new(120.0, 70.0));
        let cx = EdgeContext::new(Side::Bottom, Size::new(40.0, 10.0), 100.0, wide_container());
        assert_eq!(correct_edges(raw, &cx), Position::new(120.0, 70.0));
    }

    #[test]
    fn bottom_start_right_overflow_scenario() {
        let tooltip = Size::new(60.0, 10.0);
        let raw = compute_placement(HOST, tooltip, "bottom-start".parse().unwrap());
        assert_eq!(raw.left, 50.0);
        let cx = EdgeContext::new(Side::Bottom, tooltip, 100.0, Size::new(100.0, 500.0));
        assert_eq!(correct_edges(raw, &cx).left, 35.0);
    }

    #[test]
    fn each_side_touches_host_edge() {
        let t = Size::new(30.0, 12.0);
        for align in [Align::Start, Align::Center, Align::End] {
            let top = compute_placement(HOST, t, PlacementSpec::new(Side::Top, align));
            assert_eq!(top.top + t.height, HOST.top);
            let bottom = compute_placement(HOST, t, PlacementSpec::new(Side::Bottom, align));
            assert_eq!(bottom.top, HOST.bottom());
            let left = compute_placement(HOST, t, PlacementSpec::new(Side::Left, align));
            assert_eq!(left.left + t.width, HOST.left);
            let right = compute_placement(HOST, t, PlacementSpec::new(Side::Right, align));
            assert_eq!(right.left, HOST.right());
        }
    }

    #[test]
    fn alignment_along_vertical_sides() {
        let t = Size::new(30.0, 12.0);
        let at = |align| compute_placement(HOST, t, PlacementSpec::new(Side::Right, align)).top;
        assert_eq!(at(Align::Start), 100.0);
        assert_eq!(at(Align::Center), 104.0);
        assert_eq!(at(Align::End), 120.0);
    }

    #[test]
    fn negative_left_clamps_to_zero() {
        let t = Size::new(40.0, 10.0);
        let raw = compute_placement(BoxMetrics::new(0.0, 0.0, 10.0, 10.0), t, Side::Left.into());
        assert_eq!(raw.left, -40.0);
        let cx = EdgeContext::new(Side::Left, t, 0.0, wide_container());
        assert_eq!(correct_edges(raw, &cx).left, 0.0);
    }

    #[test]
    fn top_side_shifts_down_by_overlap() {
        let t = Size::new(40.0, 10.0);
        let raw = compute_placement(HOST, t, Side::Top.into());
        assert_eq!(raw.top, 90.0);

        // Offset top agrees with measured top: no overlap.
        let cx = EdgeContext::new(Side::Top, t, 100.0, wide_container());
        assert_eq!(correct_edges(raw, &cx).top, 90.0);

        // Host sits 6px higher in its offset parent than measured.
        let cx = EdgeContext::new(Side::Top, t, 94.0, wide_container());
        assert_eq!(correct_edges(raw, &cx).top, 96.0);
    }

    #[test]
    fn side_placements_stay_inside_container_height() {
        let t = Size::new(40.0, 50.0);
        let raw = compute_placement(HOST, t, PlacementSpec::new(Side::Right, Align::End));
        assert_eq!(raw.top, 120.0);
        let cx = EdgeContext::new(Side::Right, t, 100.0, Size::new(1000.0, 150.0));
        assert_eq!(correct_edges(raw, &cx).top, 100.0);
    }

    #[test]
    fn bottom_side_never_shifts_vertically() {
        let t = Size::new(40.0, 500.0);
        let raw = compute_placement(HOST, t, Side::Bottom.into());
        let cx = EdgeContext::new(Side::Bottom, t, 100.0, Size::new(1000.0, 10.0));
        assert_eq!(correct_edges(raw, &cx).top, raw.top);
    }

    #[test]
    fn custom_edge_margin() {
        let t = Size::new(60.0, 10.0);
        let raw = Position::new(0.0, 50.0);
        let mut cx = EdgeContext::new(Side::Bottom, t, 0.0, Size::new(100.0, 100.0));
        cx.edge_margin = 0.0;
        assert_eq!(correct_edges(raw, &cx).left, 40.0);
    }

    #[test]
    fn caret_follows_declared_offset() {
        let declared = DeclaredOffset::new(Some(4.0), Some(10.0));
        assert_eq!(
            caret_for(Side::Bottom, declared, 80.0),
            Caret {
                top: Some(4.0),
                left: Some(10.0)
            }
        );
        assert_eq!(caret_for(Side::Right, declared, 80.0).left, Some(90.0));
        assert_eq!(caret_for(Side::Right, DeclaredOffset::default(), 80.0).left, None);
    }

    #[test]
    fn degenerate_host_collapses() {
        let raw = compute_placement(BoxMetrics::default(), Size::ZERO, Side::Top.into());
        assert_eq!(raw, Position::new(0.0, 0.0));
    }
}
