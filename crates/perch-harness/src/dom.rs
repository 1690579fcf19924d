#![forbid(unsafe_code)]

//! In-memory document.
//!
//! Nodes are laid out in document coordinates as if nothing were scrolled.
//! Queries derive the values a browser would report:
//!
//! - `bounding_rect` subtracts the page scroll and the scroll of every
//!   offset ancestor.
//! - `offset_top` is the distance to the offset parent's padding edge and
//!   ignores scrolling.
//! - `client_size` defaults to the layout size minus the borders on both
//!   sides.
//!
//! The offset parent of a node is its `parent` as given at insertion; the
//! test decides what the browser's `offsetParent` would be.

use std::convert::Infallible;

use perch_core::geometry::{Point, Rect, Size};
use perch_core::host::{
    DeclaredOffset, LayoutHost, ListenerHandle, ListenerKind, ListenerRegistry, PositionKind,
    SurfaceMounter,
};

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Description of a node to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    layout: Rect,
    parent: Option<NodeId>,
    position: PositionKind,
    border: Point,
    scroll: Point,
    offset_size: Option<Size>,
    client_size: Option<Size>,
    declared: DeclaredOffset,
}

impl NodeSpec {
    /// A static node occupying `layout` (document coordinates).
    #[must_use]
    pub fn new(layout: Rect) -> Self {
        Self {
            layout,
            parent: None,
            position: PositionKind::Static,
            border: Point::ZERO,
            scroll: Point::ZERO,
            offset_size: None,
            client_size: None,
            declared: DeclaredOffset::default(),
        }
    }

    /// Offset parent.
    #[must_use]
    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn position(mut self, position: PositionKind) -> Self {
        self.position = position;
        self
    }

    /// Uniform border width on every side.
    #[must_use]
    pub fn border(mut self, width: f64) -> Self {
        self.border = Point::new(width, width);
        self
    }

    #[must_use]
    pub fn scroll(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }

    /// Override `offsetWidth`/`offsetHeight`.
    #[must_use]
    pub fn offset_size(mut self, size: Size) -> Self {
        self.offset_size = Some(size);
        self
    }

    /// Override `clientWidth`/`clientHeight`.
    #[must_use]
    pub fn client_size(mut self, size: Size) -> Self {
        self.client_size = Some(size);
        self
    }

    /// Inline `top`/`left` style.
    #[must_use]
    pub fn declared(mut self, top: Option<f64>, left: Option<f64>) -> Self {
        self.declared = DeclaredOffset::new(top, left);
        self
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    spec: NodeSpec,
    text: Option<String>,
    mounted: bool,
}

/// How mounted text surfaces are sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 18.0,
            padding: 4.0,
        }
    }
}

impl TextMetrics {
    /// Rendered size of a single-line `text`.
    #[must_use]
    pub fn measure(&self, text: &str) -> Size {
        let chars = text.chars().count() as f64;
        Size::new(
            chars * self.char_width + 2.0 * self.padding,
            self.line_height + 2.0 * self.padding,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Listener {
    handle: ListenerHandle,
    target: Option<NodeId>,
    kind: ListenerKind,
}

/// In-memory document implementing all host traits.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<NodeData>,
    viewport: Size,
    page_scroll: Point,
    listeners: Vec<Listener>,
    next_listener: u64,
    /// Total listeners ever removed.
    removed_listeners: u64,
    text_metrics: TextMetrics,
    mount_parent: Option<NodeId>,
}

impl MemoryDom {
    /// Empty document with the given viewport size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: Vec::new(),
            viewport: Size::new(width, height),
            page_scroll: Point::ZERO,
            listeners: Vec::new(),
            next_listener: 0,
            removed_listeners: 0,
            text_metrics: TextMetrics::default(),
            mount_parent: None,
        }
    }

    /// Insert a node and return its handle.
    pub fn insert(&mut self, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            spec,
            text: None,
            mounted: true,
        });
        id
    }

    fn node(&self, id: NodeId) -> &NodeSpec {
        &self.nodes[id.0].spec
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeSpec {
        &mut self.nodes[id.0].spec
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Move or resize a node.
    pub fn set_layout(&mut self, id: NodeId, layout: Rect) {
        self.node_mut(id).layout = layout;
    }

    /// Resize a node's rendered box (layout, offset, and client size).
    pub fn resize(&mut self, id: NodeId, size: Size) {
        let node = self.node_mut(id);
        node.layout.width = size.width;
        node.layout.height = size.height;
        node.offset_size = None;
        node.client_size = None;
    }

    pub fn set_scroll(&mut self, id: NodeId, scroll: Point) {
        self.node_mut(id).scroll = scroll;
    }

    pub fn set_position(&mut self, id: NodeId, position: PositionKind) {
        self.node_mut(id).position = position;
    }

    pub fn set_declared(&mut self, id: NodeId, top: Option<f64>, left: Option<f64>) {
        self.node_mut(id).declared = DeclaredOffset::new(top, left);
    }

    pub fn set_page_scroll(&mut self, scroll: Point) {
        self.page_scroll = scroll;
    }

    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Sizing rule for mounted text surfaces.
    pub fn set_text_metrics(&mut self, metrics: TextMetrics) {
        self.text_metrics = metrics;
    }

    /// Offset parent for surfaces mounted from text.
    pub fn set_mount_parent(&mut self, parent: Option<NodeId>) {
        self.mount_parent = parent;
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn offset_parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Text of a mounted surface.
    #[must_use]
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    /// Whether the node is still attached.
    #[must_use]
    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.nodes[id.0].mounted
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Attached listener kinds on `target` (`None` for window listeners).
    #[must_use]
    pub fn listeners_on(&self, target: Option<NodeId>) -> Vec<ListenerKind> {
        self.listeners
            .iter()
            .filter(|l| l.target == target)
            .map(|l| l.kind)
            .collect()
    }

    /// Total listeners removed over the document's life.
    #[must_use]
    pub fn removed_listeners(&self) -> u64 {
        self.removed_listeners
    }

    /// Sum of scroll offsets of every offset ancestor of `id`.
    fn ancestor_scroll(&self, id: NodeId) -> Point {
        let mut total = Point::ZERO;
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            total = total + self.node(parent).scroll;
            cursor = self.node(parent).parent;
        }
        total
    }
}

impl LayoutHost for MemoryDom {
    type Node = NodeId;

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let shift = self.page_scroll + self.ancestor_scroll(*node);
        self.node(*node)
            .layout
            .translate(Point::new(-shift.x, -shift.y))
    }

    fn offset_size(&self, node: &NodeId) -> Size {
        let spec = self.node(*node);
        spec.offset_size.unwrap_or(spec.layout.size())
    }

    fn client_size(&self, node: &NodeId) -> Size {
        let spec = self.node(*node);
        spec.client_size.unwrap_or_else(|| {
            let outer = self.offset_size(node);
            Size::new(
                (outer.width - 2.0 * spec.border.x).max(0.0),
                (outer.height - 2.0 * spec.border.y).max(0.0),
            )
        })
    }

    fn client_origin(&self, node: &NodeId) -> Point {
        self.node(*node).border
    }

    fn scroll_offset(&self, node: &NodeId) -> Point {
        self.node(*node).scroll
    }

    fn offset_parent(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).parent
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        let spec = self.node(*node);
        match spec.parent {
            Some(parent) => {
                let parent = self.node(parent);
                spec.layout.y - parent.layout.y - parent.border.y
            }
            None => spec.layout.y,
        }
    }

    fn position_kind(&self, node: &NodeId) -> PositionKind {
        self.node(*node).position
    }

    fn declared_offset(&self, node: &NodeId) -> DeclaredOffset {
        self.node(*node).declared
    }

    fn page_scroll(&self) -> Point {
        self.page_scroll
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

impl ListenerRegistry<NodeId> for MemoryDom {
    fn add_listener(&mut self, target: Option<&NodeId>, kind: ListenerKind) -> ListenerHandle {
        self.next_listener += 1;
        let handle = ListenerHandle(self.next_listener);
        let target = match kind {
            ListenerKind::WindowResize => None,
            _ => target.copied(),
        };
        self.listeners.push(Listener {
            handle,
            target,
            kind,
        });
        handle
    }

    fn remove_listener(&mut self, handle: ListenerHandle) {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.handle != handle);
        self.removed_listeners += (before - self.listeners.len()) as u64;
    }
}

impl SurfaceMounter<NodeId> for MemoryDom {
    type MountError = Infallible;

    fn mount_surface(&mut self, text: &str) -> Result<NodeId, Infallible> {
        let size = self.text_metrics.measure(text);
        let mut spec = NodeSpec::new(Rect::from_origin_size(Point::OFFSCREEN, size))
            .position(PositionKind::Absolute);
        spec.parent = self.mount_parent;
        let id = self.insert(spec);
        self.nodes[id.0].text = Some(text.to_owned());
        Ok(id)
    }

    fn unmount_surface(&mut self, node: &NodeId) {
        self.nodes[node.0].mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_core::measure;
    use pretty_assertions::assert_eq;

    fn panel_with_button() -> (MemoryDom, NodeId, NodeId) {
        let mut dom = MemoryDom::new(800.0, 600.0);
        let panel = dom.insert(
            NodeSpec::new(Rect::new(10.0, 20.0, 400.0, 300.0))
                .position(PositionKind::Relative)
                .border(2.0),
        );
        let button = dom.insert(NodeSpec::new(Rect::new(60.0, 122.0, 80.0, 20.0)).parent(panel));
        (dom, panel, button)
    }

    #[test]
    fn bounding_rect_tracks_scrolling() {
        let (mut dom, panel, button) = panel_with_button();
        dom.set_page_scroll(Point::new(0.0, 50.0));
        dom.set_scroll(panel, Point::new(0.0, 30.0));
        assert_eq!(dom.bounding_rect(&button), Rect::new(60.0, 42.0, 80.0, 20.0));
        assert_eq!(dom.bounding_rect(&panel), Rect::new(10.0, -30.0, 400.0, 300.0));
    }

    #[test]
    fn offset_top_ignores_scroll_and_matches_measured_top() {
        let (mut dom, panel, button) = panel_with_button();
        dom.set_scroll(panel, Point::new(0.0, 30.0));
        assert_eq!(dom.offset_top(&button), 100.0);
        assert_eq!(measure::position(&dom, &button).top, 100.0);
        assert_eq!(measure::position(&dom, &button).left, 48.0);
    }

    #[test]
    fn client_size_subtracts_borders() {
        let (dom, panel, _) = panel_with_button();
        assert_eq!(dom.client_size(&panel), Size::new(396.0, 296.0));
        assert_eq!(dom.client_origin(&panel), Point::new(2.0, 2.0));
    }

    #[test]
    fn listeners_are_tracked_per_target() {
        let (mut dom, _, button) = panel_with_button();
        let enter = dom.add_listener(Some(&button), ListenerKind::PointerEnter);
        let resize = dom.add_listener(Some(&button), ListenerKind::WindowResize);
        assert_eq!(dom.listeners_on(Some(button)), vec![ListenerKind::PointerEnter]);
        assert_eq!(dom.listeners_on(None), vec![ListenerKind::WindowResize]);
        dom.remove_listener(enter);
        dom.remove_listener(resize);
        dom.remove_listener(resize);
        assert_eq!(dom.live_listeners(), 0);
        assert_eq!(dom.removed_listeners(), 2);
    }

    #[test]
    fn mounted_surfaces_are_sized_from_text() {
        let mut dom = MemoryDom::new(800.0, 600.0);
        let Ok(node) = dom.mount_surface("Save");
        assert_eq!(dom.offset_size(&node), Size::new(36.0, 26.0));
        assert_eq!(dom.text_of(node), Some("Save"));
        assert!(dom.is_mounted(node));
        dom.unmount_surface(&node);
        assert!(!dom.is_mounted(node));
    }
}
