#![forbid(unsafe_code)]

//! Element measurement against a [`LayoutHost`].
//!
//! [`position`] yields the [`BoxMetrics`] the placement engine consumes: an
//! element's border box relative to its positioning root, which is the nearest
//! offset parent that is not statically positioned (or the document).
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | No positioned ancestor | Document is the root; page coordinates are used |
//! | Zero-size bounding box | Offset size fills the missing dimension |
//! | Detached element | All-zero metrics flow through unchanged |

use crate::geometry::{BoxMetrics, Point, Size};
use crate::host::LayoutHost;

/// Border box in document (page) coordinates.
pub fn offset<H: LayoutHost>(host: &H, node: &H::Node) -> BoxMetrics {
    let rect = host.bounding_rect(node);
    let size = rect.size().or_else(host.offset_size(node));
    let scroll = host.page_scroll();
    BoxMetrics::new(rect.y + scroll.y, rect.x + scroll.x, size.width, size.height)
}

/// Nearest non-statically-positioned offset parent, or `None` for the
/// document.
pub fn positioning_root<H: LayoutHost>(host: &H, node: &H::Node) -> Option<H::Node> {
    let mut candidate = host.offset_parent(node);
    while let Some(parent) = candidate {
        if !host.position_kind(&parent).is_static() {
            return Some(parent);
        }
        candidate = host.offset_parent(&parent);
    }
    None
}

/// Border box relative to the positioning root's padding edge, accounting for
/// the root's borders and scroll position.
pub fn position<H: LayoutHost>(host: &H, node: &H::Node) -> BoxMetrics {
    let element = offset(host, node);
    let origin = match positioning_root(host, node) {
        Some(root) => {
            let root_box = offset(host, &root);
            let border = host.client_origin(&root);
            let scroll = host.scroll_offset(&root);
            Point::new(
                root_box.left + border.x - scroll.x,
                root_box.top + border.y - scroll.y,
            )
        }
        None => Point::ZERO,
    };
    BoxMetrics::new(
        element.top - origin.y,
        element.left - origin.x,
        element.width,
        element.height,
    )
}

/// Content box of the element's offset parent, falling back to the viewport.
///
/// This is the area tooltip edge correction keeps the surface inside.
pub fn container_size<H: LayoutHost>(host: &H, node: &H::Node) -> Size {
    host.offset_parent(node)
        .map_or_else(|| host.viewport_size(), |parent| host.client_size(&parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::host::{DeclaredOffset, PositionKind};

    /// Minimal fixed tree: 0 = positioned container, 1 = static wrapper,
    /// 2 = host element inside the wrapper.
    struct Fixture {
        rects: [Rect; 3],
        kinds: [PositionKind; 3],
        parents: [Option<usize>; 3],
        scroll: Point,
        border: Point,
        container_scroll: Point,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                rects: [
                    Rect::new(10.0, 20.0, 300.0, 200.0),
                    Rect::new(30.0, 40.0, 100.0, 100.0),
                    Rect::new(50.0, 70.0, 80.0, 0.0),
                ],
                kinds: [
                    PositionKind::Relative,
                    PositionKind::Static,
                    PositionKind::Static,
                ],
                parents: [None, Some(0), Some(1)],
                scroll: Point::ZERO,
                border: Point::ZERO,
                container_scroll: Point::ZERO,
            }
        }
    }

    impl LayoutHost for Fixture {
        type Node = usize;

        fn bounding_rect(&self, node: &usize) -> Rect {
            self.rects[*node]
        }
        fn offset_size(&self, node: &usize) -> Size {
            if *node == 2 {
                Size::new(80.0, 16.0)
            } else {
                self.rects[*node].size()
            }
        }
        fn client_size(&self, node: &usize) -> Size {
            self.rects[*node].size()
        }
        fn client_origin(&self, node: &usize) -> Point {
            if *node == 0 { self.border } else { Point::ZERO }
        }
        fn scroll_offset(&self, node: &usize) -> Point {
            if *node == 0 {
                self.container_scroll
            } else {
                Point::ZERO
            }
        }
        fn offset_parent(&self, node: &usize) -> Option<usize> {
            self.parents[*node]
        }
        fn offset_top(&self, _node: &usize) -> f64 {
            0.0
        }
        fn position_kind(&self, node: &usize) -> PositionKind {
            self.kinds[*node]
        }
        fn declared_offset(&self, _node: &usize) -> DeclaredOffset {
            DeclaredOffset::default()
        }
        fn page_scroll(&self) -> Point {
            self.scroll
        }
        fn viewport_size(&self) -> Size {
            Size::new(1024.0, 768.0)
        }
    }

    #[test]
    fn offset_adds_page_scroll_and_fills_zero_height() {
        let mut fx = Fixture::new();
        fx.scroll = Point::new(5.0, 100.0);
        let b = offset(&fx, &2);
        assert_eq!(b, BoxMetrics::new(170.0, 55.0, 80.0, 16.0));
    }

    #[test]
    fn positioning_root_skips_static_ancestors() {
        let fx = Fixture::new();
        assert_eq!(positioning_root(&fx, &2), Some(0));
        assert_eq!(positioning_root(&fx, &0), None);
    }

    #[test]
    fn positioning_root_is_document_when_all_static() {
        let mut fx = Fixture::new();
        fx.kinds[0] = PositionKind::Static;
        assert_eq!(positioning_root(&fx, &2), None);
        let b = position(&fx, &2);
        assert_eq!((b.top, b.left), (70.0, 50.0));
    }

    #[test]
    fn position_is_relative_to_root_padding_edge() {
        let mut fx = Fixture::new();
        fx.border = Point::new(2.0, 3.0);
        fx.container_scroll = Point::new(0.0, 15.0);
        let b = position(&fx, &2);
        // 70 - (20 + 3 - 15) = 62 ; 50 - (10 + 2 - 0) = 38
        assert_eq!(b, BoxMetrics::new(62.0, 38.0, 80.0, 16.0));
    }

    #[test]
    fn container_falls_back_to_viewport() {
        let fx = Fixture::new();
        assert_eq!(container_size(&fx, &2), Size::new(100.0, 100.0));
        assert_eq!(container_size(&fx, &0), Size::new(1024.0, 768.0));
    }
}
