#![forbid(unsafe_code)]

//! Anchor controller: the host-side half of a tooltip.
//!
//! The controller sits on the host element, owns the desired-visibility flag,
//! and drives its [`TooltipSurface`]. Visibility requests pass through a
//! trailing-edge [`Debouncer`], so fast input (a pointer skimming across the
//! host) resolves to the final request only.
//!
//! # Usage
//!
//! ```ignore
//! let mut anchor = AnchorController::new(host_el, TooltipContent::Text("Save".into()),
//!     AnchorOptions::default());
//! anchor.on_create(&mut dom);
//! anchor.on_mounted(&mut dom, now);
//!
//! anchor.set_visible(true, now);
//! // each frame:
//! anchor.tick(&dom, now);
//! anchor.on_frame(&dom);
//! if anchor.take_dirty() { /* re-render from anchor.surface().style() */ }
//! ```

use std::time::Duration;

use perch_core::debounce::Debouncer;
use perch_core::event::HostEvent;
use perch_core::host::{Host, LayoutHost, ListenerKind};

use crate::lifecycle::{Lifecycle, ListenerSet};
use crate::options::AnchorOptions;
use crate::placement::PlacementSpec;
use crate::surface::{SurfaceInputs, TooltipSurface};

/// What the tooltip shows.
#[derive(Debug)]
pub enum TooltipContent<N> {
    /// Plain text. A surface is mounted for it on create.
    Text(String),
    /// A surface built by the caller, reused as is.
    Surface(TooltipSurface<N>),
}

/// A visibility request as bound by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityRequest {
    pub value: bool,
    /// The request comes from a click outside the tooltip. Clears hover so
    /// the hide cannot be refused.
    pub click_outside: bool,
}

impl VisibilityRequest {
    #[must_use]
    pub const fn shown() -> Self {
        Self {
            value: true,
            click_outside: false,
        }
    }

    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            value: false,
            click_outside: false,
        }
    }

    #[must_use]
    pub const fn click_outside() -> Self {
        Self {
            value: false,
            click_outside: true,
        }
    }
}

/// Inputs an anchor receives from its adapter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorInputs {
    pub visibility: VisibilityRequest,
    /// New placement, if it changed.
    pub placement: Option<PlacementSpec>,
    /// New disabled flag, if it changed.
    pub disabled: Option<bool>,
}

/// Downstream calls made by the anchor (diagnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorStats {
    /// Resolved visibility requests.
    pub resolved: u64,
    /// Show requests forwarded to the surface.
    pub shows: u64,
    /// Hide requests forwarded to the surface.
    pub hides: u64,
    /// Reposition-only requests forwarded to the surface.
    pub repositions: u64,
}

/// Host-side tooltip controller.
#[derive(Debug)]
pub struct AnchorController<N> {
    host_node: N,
    options: AnchorOptions,
    surface: Option<TooltipSurface<N>>,
    /// Text waiting to be mounted on create.
    pending_text: Option<String>,
    /// Whether the surface was mounted by this anchor.
    owns_surface: bool,
    /// Why mounting the text surface failed, if it did.
    mount_error: Option<String>,
    /// Whether this controller believes the tooltip is shown.
    visible: bool,
    visibility: Debouncer<bool>,
    listeners: ListenerSet,
    stats: AnchorStats,
}

impl<N: Clone + PartialEq + std::fmt::Debug> AnchorController<N> {
    /// Create a controller for `host_node`.
    #[must_use]
    pub fn new(host_node: N, content: TooltipContent<N>, options: AnchorOptions) -> Self {
        let (surface, pending_text) = match content {
            TooltipContent::Text(text) => (None, Some(text)),
            TooltipContent::Surface(surface) => (Some(surface), None),
        };
        Self {
            host_node,
            visibility: Debouncer::new(options.debounce),
            options,
            surface,
            pending_text,
            owns_surface: false,
            mount_error: None,
            visible: false,
            listeners: ListenerSet::new(),
            stats: AnchorStats::default(),
        }
    }

    #[must_use]
    pub fn host_node(&self) -> &N {
        &self.host_node
    }

    #[must_use]
    pub fn options(&self) -> &AnchorOptions {
        &self.options
    }

    #[must_use]
    pub fn surface(&self) -> Option<&TooltipSurface<N>> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut TooltipSurface<N>> {
        self.surface.as_mut()
    }

    /// Why the text surface could not be mounted. The anchor stays inert.
    #[must_use]
    pub fn mount_error(&self) -> Option<&str> {
        self.mount_error.as_deref()
    }

    /// Whether this controller believes the tooltip is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn stats(&self) -> AnchorStats {
        self.stats
    }

    /// Whether a visibility request is waiting out the debounce window.
    #[must_use]
    pub fn request_pending(&self) -> bool {
        self.visibility.is_pending()
    }

    /// Earliest time `tick` has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let surface = self.surface.as_ref().and_then(TooltipSurface::next_deadline);
        match (self.visibility.deadline(), surface) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Toggle the disabled flag. A disabled anchor may reposition a visible
    /// tooltip but never shows a hidden one.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
        if disabled
            && let Some(surface) = self.surface.as_mut()
            && !surface.is_visible()
        {
            surface.set_intent(false);
        }
    }

    pub fn set_placement(&mut self, placement: PlacementSpec) {
        self.options.placement = placement;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_placement(placement);
        }
    }

    /// Request the tooltip be shown or hidden. Debounced.
    pub fn set_visible(&mut self, visible: bool, now: Duration) {
        self.push_intent(visible);
        self.visibility.call(visible, now);
    }

    /// Forward the latest request to the surface. A show request on a hidden
    /// surface counts only while enabled.
    fn push_intent(&mut self, visible: bool) {
        let disabled = self.options.disabled;
        if let Some(surface) = self.surface.as_mut() {
            let intent = visible && (surface.is_visible() || !disabled);
            surface.set_intent(intent);
        }
    }

    /// Resolve due visibility requests and advance the surface's timers.
    pub fn tick<H: LayoutHost<Node = N>>(&mut self, dom: &H, now: Duration) {
        if let Some(visible) = self.visibility.poll(now) {
            self.resolve(visible, dom);
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.tick(now);
        }
    }

    /// Run the surface's deferred recomputation, if any.
    pub fn on_frame<H: LayoutHost<Node = N>>(&mut self, dom: &H) {
        if let Some(surface) = self.surface.as_mut() {
            surface.on_frame(dom);
        }
    }

    /// Whether the surface needs re-rendering, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        self.surface.as_mut().is_some_and(TooltipSurface::take_dirty)
    }

    /// Window resized: keep a visible tooltip anchored without hiding it.
    pub fn handle_resize<H: LayoutHost<Node = N>>(&mut self, dom: &H) {
        if !self.visible {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            perch_core::trace!("window resized: repositioning");
            surface.reposition(dom);
            self.stats.repositions += 1;
        }
    }

    /// Route a host event. Pointer events belong to the surface.
    pub fn handle_event<H: LayoutHost<Node = N>>(
        &mut self,
        event: &HostEvent,
        dom: &H,
        now: Duration,
    ) {
        match event {
            HostEvent::WindowResize(_) => {
                if self.listeners.is_active(ListenerKind::WindowResize) {
                    self.handle_resize(dom);
                }
            }
            HostEvent::Pointer(_) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.handle_event(event, now);
                }
            }
        }
    }

    fn resolve<H: LayoutHost<Node = N>>(&mut self, visible: bool, dom: &H) {
        let Some(surface) = self.surface.as_mut() else {
            perch_core::trace!("visibility request ignored: no surface");
            return;
        };
        self.stats.resolved += 1;
        surface.set_intent(visible && (surface.is_visible() || !self.options.disabled));

        if !visible {
            self.stats.hides += 1;
            if surface.hide() {
                self.visible = false;
            }
            return;
        }

        if self.options.disabled || self.visible {
            surface.set_placement(self.options.placement);
            surface.set_prevent_auto_hide(true);
            if self.options.disabled {
                self.stats.repositions += 1;
                surface.reposition(dom);
            } else {
                self.stats.shows += 1;
                surface.show(dom);
            }
            return;
        }

        self.visible = true;
        self.stats.shows += 1;
        surface.bind_host(self.host_node.clone());
        surface.set_placement(self.options.placement);
        surface.set_animation(self.options.animation);
        surface.show(dom);
        perch_core::debug!(placement = %self.options.placement, "anchor shown");
    }
}

impl<H: Host> Lifecycle<H> for AnchorController<H::Node> {
    type Inputs = AnchorInputs;

    fn on_create(&mut self, cx: &mut H) {
        if let Some(text) = self.pending_text.take() {
            match cx.mount_surface(&text) {
                Ok(node) => {
                    self.surface = Some(TooltipSurface::new(
                        node,
                        self.options.mounted_surface_options(),
                    ));
                    self.owns_surface = true;
                }
                Err(err) => {
                    perch_core::warn!("tooltip surface mount failed");
                    self.mount_error = Some(err.to_string());
                }
            }
        }
        if let Some(surface) = self.surface.as_mut() {
            Lifecycle::<H>::on_create(surface, cx);
        }
    }

    fn on_inputs_changed(&mut self, inputs: AnchorInputs, now: Duration) {
        if let Some(disabled) = inputs.disabled {
            self.set_disabled(disabled);
        }
        if let Some(surface) = self.surface.as_mut() {
            if inputs.visibility.click_outside {
                surface.release_pointer();
            }
            if let Some(placement) = inputs.placement {
                Lifecycle::<H>::on_inputs_changed(
                    surface,
                    SurfaceInputs {
                        placement: Some(placement),
                        change_size: false,
                    },
                    now,
                );
            }
        }
        if let Some(placement) = inputs.placement {
            self.options.placement = placement;
        }
        self.set_visible(inputs.visibility.value, now);
    }

    fn on_mounted(&mut self, cx: &mut H, now: Duration) {
        if self.listeners.is_empty() {
            self.listeners
                .acquire::<H::Node, H>(cx, None, ListenerKind::WindowResize);
        }
        if let Some(surface) = self.surface.as_mut() {
            Lifecycle::<H>::on_mounted(surface, cx, now);
        }
    }

    fn on_destroy(&mut self, cx: &mut H) {
        self.listeners.release_all::<H::Node, H>(cx);
        self.visibility.cancel();
        if let Some(surface) = self.surface.as_mut() {
            Lifecycle::<H>::on_destroy(surface, cx);
        }
        if self.owns_surface
            && let Some(surface) = self.surface.take()
        {
            cx.unmount_surface(surface.node());
            self.owns_surface = false;
        }
        self.visible = false;
    }
}
