#![forbid(unsafe_code)]

//! Tooltip surface: placement state and the show/hide state machine.
//!
//! A surface parks itself off-screen until shown. Showing measures the bound
//! host element and the surface's own box and computes fresh coordinates;
//! hiding parks it again, unless the pointer is over it.
//!
//! # State Machine
//!
//! ```text
//!                 resolve(show)                   hover leave
//!   Hidden ───▶ Showing ───────────▶ Visible ───────────────▶ Hiding
//!     ▲  intent    │ intent           │    ▲                   │ │
//!     │  set       │ cleared          │    │ show / on_frame:  │ │ hover enter
//!     ├────────────┘                  │    │ recompute only    │ │ (cancel)
//!     │                               └────┘◀──────────────────┘ │
//!     └──────────────── hide (not hovered) ◀─────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. While hidden, `top`/`left` and the caret hold [`OFFSCREEN`].
//! 2. `show` on a visible surface recomputes coordinates without counting a
//!    new enter transition or touching the fade flag.
//! 3. `hide` never succeeds while the pointer is over the surface.
//! 4. A deferred frame only recomputes a visible surface, and is skipped when
//!    the latest visibility intent is hidden. It never shows a hidden surface.
//! 5. Every coordinate mutation marks the surface dirty.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | No host bound | `show` is a silent no-op |
//! | Hide while hovered | Refused, counted in [`SurfaceStats::refused_hides`] |
//! | Leave with secondary button held | Ignored (context menu) |
//! | Leave after a size change | No auto-hide scheduled |

use std::time::Duration;

use perch_core::debounce::Debouncer;
use perch_core::event::{HostEvent, PointerEvent, PointerEventKind};
use perch_core::geometry::OFFSCREEN;
use perch_core::host::{Host, LayoutHost, ListenerKind};

use crate::lifecycle::{Lifecycle, ListenerSet};
use crate::options::TooltipOptions;
use crate::placement::PlacementSpec;
use crate::position::{self, Placement};

/// Observable tooltip state.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    /// Whether the surface is shown.
    pub visible: bool,
    /// Whether the pointer is over the surface.
    pub mouse_over: bool,
    /// Whether a hover-leave hide is waiting for its timeout.
    pub pending_hide: bool,
    /// Whether the content reported a size change since the last hide.
    pub size_changed: bool,
    pub top: f64,
    pub left: f64,
    pub caret_top: Option<f64>,
    pub caret_left: Option<f64>,
    /// Fade flag consumed by the rendering layer's transition.
    pub fade: bool,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            visible: false,
            mouse_over: false,
            pending_hide: false,
            size_changed: false,
            top: OFFSCREEN,
            left: OFFSCREEN,
            caret_top: Some(OFFSCREEN),
            caret_left: Some(OFFSCREEN),
            fade: false,
        }
    }
}

impl TooltipState {
    fn park(&mut self) {
        self.top = OFFSCREEN;
        self.left = OFFSCREEN;
        self.caret_top = Some(OFFSCREEN);
        self.caret_left = Some(OFFSCREEN);
    }

    fn apply(&mut self, placement: &Placement) {
        self.top = placement.position.top;
        self.left = placement.position.left;
        self.caret_top = placement.caret.top;
        self.caret_left = placement.caret.left;
    }

    /// Whether the surface sits at the off-screen sentinel.
    #[must_use]
    pub fn is_parked(&self) -> bool {
        self.top == OFFSCREEN && self.left == OFFSCREEN
    }
}

/// Coarse phase derived from [`TooltipState`] and pending work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfacePhase {
    /// Parked off-screen.
    #[default]
    Hidden,
    /// Hidden, with a show request waiting on the anchor's debounce.
    Showing,
    /// On screen.
    Visible,
    /// On screen, with a hover-leave hide pending.
    Hiding,
}

/// Diagnostic counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceStats {
    /// Hidden -> visible transitions.
    pub enter_transitions: u64,
    /// Recomputations while already visible.
    pub repositions: u64,
    /// Visible -> hidden transitions.
    pub hides: u64,
    /// Hides refused because the pointer was over the surface.
    pub refused_hides: u64,
    /// Deferred frames skipped because the latest intent was hidden.
    pub skipped_frames: u64,
}

/// Style values for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub top: String,
    pub left: String,
    pub caret_top: String,
    pub caret_left: String,
    /// Space-separated class list: `tooltip <side>[ in][ fade]`.
    pub class: String,
}

fn px(v: f64) -> String {
    format!("{v}px")
}

fn px_opt(v: Option<f64>) -> String {
    v.map(px).unwrap_or_default()
}

/// Inputs a surface receives from its adapter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceInputs {
    /// New placement, if it changed.
    pub placement: Option<PlacementSpec>,
    /// The content reports it changed size.
    pub change_size: bool,
}

/// The positioned tooltip box.
///
/// `N` is the host's element handle. The surface owns its own box (`node`)
/// and, once bound, a handle to the host element it anchors to.
#[derive(Debug)]
pub struct TooltipSurface<N> {
    node: N,
    host: Option<N>,
    options: TooltipOptions,
    state: TooltipState,
    hide_timer: Debouncer<()>,
    /// Consumes the next debounced hide instead of hiding.
    prevent_auto_hide: bool,
    /// Latest visibility intent from the anchor.
    intent: bool,
    frame_pending: bool,
    listeners: ListenerSet,
    dirty: bool,
    stats: SurfaceStats,
}

impl<N: Clone + PartialEq + std::fmt::Debug> TooltipSurface<N> {
    /// Create a hidden surface for the tooltip box `node`.
    #[must_use]
    pub fn new(node: N, options: TooltipOptions) -> Self {
        Self {
            node,
            host: None,
            hide_timer: Debouncer::new(options.hide_timeout),
            options,
            state: TooltipState::default(),
            prevent_auto_hide: false,
            intent: false,
            frame_pending: false,
            listeners: ListenerSet::new(),
            dirty: false,
            stats: SurfaceStats::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The tooltip box element.
    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// The host element this surface anchors to, if bound.
    #[must_use]
    pub fn host(&self) -> Option<&N> {
        self.host.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    #[must_use]
    pub fn options(&self) -> &TooltipOptions {
        &self.options
    }

    #[must_use]
    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    #[must_use]
    pub fn placement(&self) -> PlacementSpec {
        self.options.placement
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    #[must_use]
    pub fn mouse_over(&self) -> bool {
        self.state.mouse_over
    }

    /// Whether pointer handlers are live.
    #[must_use]
    pub fn hover_tracking(&self) -> bool {
        self.options.keep_on_mouse_hover && self.listeners.is_active(ListenerKind::PointerLeave)
    }

    #[must_use]
    pub fn phase(&self) -> SurfacePhase {
        match (self.state.visible, self.state.pending_hide) {
            (true, true) => SurfacePhase::Hiding,
            (true, false) => SurfacePhase::Visible,
            (false, _) if self.intent => SurfacePhase::Showing,
            (false, _) => SurfacePhase::Hidden,
        }
    }

    /// Whether coordinates changed since the last call, clearing the flag.
    ///
    /// Adapters call this after driving the surface and re-render on `true`.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Style values for the current state.
    #[must_use]
    pub fn style(&self) -> SurfaceStyle {
        let mut class = format!("tooltip {}", self.options.placement.side.as_str());
        if self.state.visible {
            class.push_str(" in");
        }
        if self.state.fade {
            class.push_str(" fade");
        }
        SurfaceStyle {
            top: px(self.state.top),
            left: px(self.state.left),
            caret_top: px_opt(self.state.caret_top),
            caret_left: px_opt(self.state.caret_left),
            class,
        }
    }

    // -----------------------------------------------------------------------
    // Inputs from the anchor
    // -----------------------------------------------------------------------

    /// Bind the host element to anchor to.
    pub fn bind_host(&mut self, host: N) {
        self.host = Some(host);
    }

    pub fn set_placement(&mut self, placement: PlacementSpec) {
        self.options.placement = placement;
    }

    pub fn set_animation(&mut self, animation: bool) {
        self.options.animation = animation;
    }

    /// Record the latest visibility intent. Deferred frames are skipped while
    /// it is hidden.
    pub fn set_intent(&mut self, visible: bool) {
        self.intent = visible;
    }

    /// Make the next debounced hover-leave hide a no-op.
    pub fn set_prevent_auto_hide(&mut self, prevent: bool) {
        self.prevent_auto_hide = prevent;
    }

    /// Forget that the pointer is over the surface (e.g. a click landed
    /// outside it), so the next hide is not refused.
    pub fn release_pointer(&mut self) {
        self.state.mouse_over = false;
    }

    /// Note a content size change. Suppresses hover-leave auto-hide until the
    /// next successful hide.
    pub fn note_size_change(&mut self) {
        if !self.state.size_changed {
            perch_core::debug!("tooltip content size changed");
            self.state.size_changed = true;
        }
    }

    // -----------------------------------------------------------------------
    // Show / hide
    // -----------------------------------------------------------------------

    /// Compute placement and show the surface.
    ///
    /// Without a bound host this does nothing. On a visible surface it only
    /// recomputes coordinates.
    pub fn show<H: LayoutHost<Node = N>>(&mut self, dom: &H) {
        let Some(host) = self.host.as_ref() else {
            perch_core::trace!("show ignored: no host bound");
            return;
        };
        let placement = position::place(
            dom,
            host,
            &self.node,
            self.options.placement,
            self.options.edge_margin,
        );
        self.state.apply(&placement);
        self.dirty = true;

        if self.state.visible {
            self.stats.repositions += 1;
            return;
        }
        self.state.visible = true;
        if self.options.animation {
            self.state.fade = true;
        }
        self.stats.enter_transitions += 1;
        perch_core::debug!(
            top = self.state.top,
            left = self.state.left,
            placement = %self.options.placement,
            "tooltip shown"
        );
    }

    /// Recompute placement if visible; otherwise do nothing.
    pub fn reposition<H: LayoutHost<Node = N>>(&mut self, dom: &H) {
        if self.state.visible {
            self.show(dom);
        }
    }

    /// Park the surface off-screen.
    ///
    /// Returns `false` when refused because the pointer is over the surface.
    pub fn hide(&mut self) -> bool {
        if self.state.mouse_over {
            self.stats.refused_hides += 1;
            perch_core::trace!("hide refused: pointer over tooltip");
            return false;
        }
        self.hide_timer.cancel();
        self.intent = false;
        self.state.pending_hide = false;
        self.state.size_changed = false;
        self.state.park();
        if self.options.animation {
            self.state.fade = false;
        }
        self.dirty = true;
        if self.state.visible {
            self.state.visible = false;
            self.stats.hides += 1;
            perch_core::debug!("tooltip hidden");
        }
        true
    }

    // -----------------------------------------------------------------------
    // Pointer handling
    // -----------------------------------------------------------------------

    /// Pointer entered the surface.
    pub fn pointer_enter(&mut self) {
        if !self.hover_tracking() {
            return;
        }
        self.prevent_auto_hide = false;
        self.state.mouse_over = true;
        if self.hide_timer.cancel().is_some() {
            perch_core::trace!("pending hide cancelled by hover");
        }
        self.state.pending_hide = false;
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self, event: &PointerEvent, now: Duration) {
        if !self.hover_tracking() || event.is_context_menu() {
            return;
        }
        self.state.mouse_over = false;
        if self.state.size_changed {
            return;
        }
        self.hide_timer.call((), now);
        self.state.pending_hide = true;
    }

    /// Route a host event to the matching handler.
    pub fn handle_event(&mut self, event: &HostEvent, now: Duration) {
        if let HostEvent::Pointer(pointer) = event {
            match pointer.kind {
                PointerEventKind::Enter => self.pointer_enter(),
                PointerEventKind::Leave => self.pointer_leave(pointer, now),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Time and frames
    // -----------------------------------------------------------------------

    /// Advance timers. Fires a due hover-leave hide.
    pub fn tick(&mut self, now: Duration) {
        if self.hide_timer.poll(now).is_none() {
            return;
        }
        self.state.pending_hide = false;
        if std::mem::take(&mut self.prevent_auto_hide) {
            perch_core::trace!("auto-hide consumed by a repeated show request");
            return;
        }
        self.hide();
    }

    /// When the pending hover-leave hide is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.hide_timer.deadline()
    }

    /// Defer a placement recomputation to the next frame.
    pub fn request_frame(&mut self) {
        self.frame_pending = true;
    }

    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Run a deferred recomputation after the adapter has painted.
    ///
    /// Repositions a visible surface only. Showing is left to the anchor's
    /// debounced request, and a hide submitted while the frame was pending
    /// skips it.
    pub fn on_frame<H: LayoutHost<Node = N>>(&mut self, dom: &H) {
        if !std::mem::take(&mut self.frame_pending) {
            return;
        }
        if self.intent {
            self.reposition(dom);
        } else {
            self.stats.skipped_frames += 1;
            perch_core::trace!("deferred frame skipped: intent is hidden");
        }
    }
}

impl<H: Host> Lifecycle<H> for TooltipSurface<H::Node> {
    type Inputs = SurfaceInputs;

    fn on_create(&mut self, _cx: &mut H) {
        self.hide_timer = Debouncer::new(self.options.hide_timeout);
        self.state = TooltipState::default();
    }

    fn on_inputs_changed(&mut self, inputs: SurfaceInputs, _now: Duration) {
        if let Some(placement) = inputs.placement {
            self.set_placement(placement);
        }
        if inputs.change_size {
            self.note_size_change();
        }
        self.request_frame();
    }

    fn on_mounted(&mut self, cx: &mut H, _now: Duration) {
        self.show(&*cx);
        if self.options.keep_on_mouse_hover && self.listeners.is_empty() {
            self.listeners
                .acquire(cx, Some(&self.node), ListenerKind::PointerEnter);
            self.listeners
                .acquire(cx, Some(&self.node), ListenerKind::PointerLeave);
        }
    }

    fn on_destroy(&mut self, cx: &mut H) {
        self.listeners.release_all::<H::Node, H>(cx);
        self.hide_timer.cancel();
        self.state.pending_hide = false;
        self.frame_pending = false;
    }
}
