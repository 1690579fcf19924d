#![forbid(unsafe_code)]

//! The narrow interface between tooltip logic and the hosting UI layer.
//!
//! Tooltip code never touches a document directly. Instead it asks a
//! [`LayoutHost`] for geometry, a [`ListenerRegistry`] for event wiring, and a
//! [`SurfaceMounter`] to materialize a surface from a text payload. A browser
//! adapter implements these over the DOM; tests implement them over an
//! in-memory tree.
//!
//! All geometry queries are infallible. A detached or unrendered element
//! reports zero sizes and the formulas downstream collapse naturally.

use crate::geometry::{Point, Rect, Size};

/// Computed `position` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PositionKind {
    /// Normal flow. Does not establish a positioning origin.
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionKind {
    /// Parse a computed-style `position` value. Unknown or empty values are
    /// treated as `static`.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "relative" => Self::Relative,
            "absolute" => Self::Absolute,
            "fixed" => Self::Fixed,
            "sticky" => Self::Sticky,
            _ => Self::Static,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_static(self) -> bool {
        matches!(self, Self::Static)
    }
}

/// Inline (declared) `top`/`left` style of an element, in pixels.
///
/// `None` means the element declares no inline value on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeclaredOffset {
    pub top: Option<f64>,
    pub left: Option<f64>,
}

impl DeclaredOffset {
    #[must_use]
    pub const fn new(top: Option<f64>, left: Option<f64>) -> Self {
        Self { top, left }
    }

    /// Parse CSS lengths such as `"12px"` or `"-3.5px"`.
    ///
    /// Empty strings and values that do not start with a number (`auto`,
    /// `calc(...)`) yield `None`. Like `parseInt`, trailing units are
    /// ignored.
    #[must_use]
    pub fn from_css(top: &str, left: &str) -> Self {
        Self {
            top: parse_css_px(top),
            left: parse_css_px(left),
        }
    }
}

/// Read the leading number of a CSS length.
#[must_use]
pub fn parse_css_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse().ok()
}

/// Geometry and style queries against the host document.
///
/// `Node` is the host's element handle. `None` in an offset-parent position
/// stands for the document itself.
pub trait LayoutHost {
    /// Element handle.
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// Border box in viewport coordinates (`getBoundingClientRect`).
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Layout size including borders (`offsetWidth`/`offsetHeight`).
    fn offset_size(&self, node: &Self::Node) -> Size;

    /// Padding box size (`clientWidth`/`clientHeight`).
    fn client_size(&self, node: &Self::Node) -> Size;

    /// Top/left border widths (`clientLeft`/`clientTop`).
    fn client_origin(&self, node: &Self::Node) -> Point;

    /// Scroll position of the element's content (`scrollLeft`/`scrollTop`).
    fn scroll_offset(&self, node: &Self::Node) -> Point;

    /// Layout offset parent (`offsetParent`). `None` for the document.
    fn offset_parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Distance from the offset parent's padding edge (`offsetTop`).
    fn offset_top(&self, node: &Self::Node) -> f64;

    /// Computed `position` style.
    fn position_kind(&self, node: &Self::Node) -> PositionKind;

    /// Declared inline `top`/`left`.
    fn declared_offset(&self, node: &Self::Node) -> DeclaredOffset;

    /// Document scroll position (`pageXOffset`/`pageYOffset`).
    fn page_scroll(&self) -> Point;

    /// Size of the document's client area.
    fn viewport_size(&self) -> Size;
}

/// Native listener kinds a tooltip component attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerEnter,
    PointerLeave,
    /// Attached to the window rather than an element.
    WindowResize,
}

/// Opaque token returned by [`ListenerRegistry::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Explicit acquire/release of native event listeners.
///
/// Every handle returned by `add_listener` must be passed back to
/// `remove_listener` exactly once, at the latest when the owning component is
/// destroyed.
pub trait ListenerRegistry<N> {
    /// Attach a listener. `target` is ignored for window-level kinds.
    fn add_listener(&mut self, target: Option<&N>, kind: ListenerKind) -> ListenerHandle;

    /// Detach a listener previously attached.
    fn remove_listener(&mut self, handle: ListenerHandle);
}

/// Materializes tooltip surfaces from plain text payloads.
pub trait SurfaceMounter<N> {
    /// Why a surface could not be created.
    type MountError: std::fmt::Display;

    /// Mount a new surface containing `text` and return its tooltip box.
    fn mount_surface(&mut self, text: &str) -> Result<N, Self::MountError>;

    /// Remove a surface previously mounted by this mounter.
    fn unmount_surface(&mut self, node: &N);
}

/// Everything a tooltip component needs from its environment.
///
/// Blanket-implemented for any type providing all three host traits.
pub trait Host:
    LayoutHost
    + ListenerRegistry<<Self as LayoutHost>::Node>
    + SurfaceMounter<<Self as LayoutHost>::Node>
{
}

impl<T> Host for T where
    T: LayoutHost
        + ListenerRegistry<<T as LayoutHost>::Node>
        + SurfaceMounter<<T as LayoutHost>::Node>
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_kind_parsing() {
        assert_eq!(PositionKind::from_css("relative"), PositionKind::Relative);
        assert_eq!(PositionKind::from_css(" absolute "), PositionKind::Absolute);
        assert_eq!(PositionKind::from_css(""), PositionKind::Static);
        assert_eq!(PositionKind::from_css("inherit"), PositionKind::Static);
        assert!(PositionKind::Static.is_static());
        assert!(!PositionKind::Sticky.is_static());
    }

    #[test]
    fn css_px_parsing() {
        assert_eq!(parse_css_px("12px"), Some(12.0));
        assert_eq!(parse_css_px("-3.5px"), Some(-3.5));
        assert_eq!(parse_css_px("40"), Some(40.0));
        assert_eq!(parse_css_px(""), None);
        assert_eq!(parse_css_px("auto"), None);
        assert_eq!(parse_css_px("-"), None);
    }

    #[test]
    fn declared_offset_from_css() {
        let d = DeclaredOffset::from_css("10px", "");
        assert_eq!(d, DeclaredOffset::new(Some(10.0), None));
    }
}
