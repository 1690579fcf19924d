#![forbid(unsafe_code)]

use perch_core::event::HostEvent;
use perch_widgets::{
    AnchorController, AnchorInputs, Lifecycle, PlacementSpec, SurfaceInputs, TooltipContent,
    TooltipSurface, VisibilityRequest,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::convert::{host_ms, host_time, parse_options};
use crate::dom::WebDom;
use crate::error::WebHostError;
use crate::queue::EventQueue;

/// A tooltip anchored to one host element.
///
/// The page owns the clock: every time-dependent call takes a
/// `performance.now()` timestamp, and `tick` must be called once per
/// animation frame while the tooltip is alive.
#[wasm_bindgen]
pub struct WebTooltip {
    dom: WebDom,
    anchor: AnchorController<HtmlElement>,
    destroyed: bool,
}

#[wasm_bindgen]
impl WebTooltip {
    /// Attach a tooltip to `host`.
    ///
    /// `content` is either a string (a surface is mounted on `document.body`)
    /// or an existing element used as the surface. `options` is optional
    /// JSON; see `AnchorOptions` for the fields.
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: HtmlElement,
        content: JsValue,
        options: Option<String>,
    ) -> Result<WebTooltip, JsValue> {
        let options = parse_options(options.as_deref())?;
        let content = if let Some(text) = content.as_string() {
            TooltipContent::Text(text)
        } else if let Ok(el) = content.dyn_into::<HtmlElement>() {
            TooltipContent::Surface(TooltipSurface::new(el, options.mounted_surface_options()))
        } else {
            return Err(WebHostError::InvalidContent.into());
        };

        let mut dom = WebDom::new(EventQueue::new())?;
        let mut anchor = AnchorController::new(host, content, options);
        anchor.on_create(&mut dom);
        if let Some(message) = anchor.mount_error() {
            return Err(WebHostError::mount_failed(dom.take_mount_error(), message).into());
        }
        let now = host_time(dom.now_ms());
        anchor.on_mounted(&mut dom, now);

        let mut tooltip = Self {
            dom,
            anchor,
            destroyed: false,
        };
        tooltip.render();
        Ok(tooltip)
    }

    /// Request the tooltip be shown or hidden. Debounced.
    #[wasm_bindgen(js_name = setVisible)]
    pub fn set_visible(&mut self, visible: bool, now: f64) {
        let request = if visible {
            VisibilityRequest::shown()
        } else {
            VisibilityRequest::hidden()
        };
        self.inputs(
            AnchorInputs {
                visibility: request,
                ..AnchorInputs::default()
            },
            now,
        );
    }

    /// Hide in response to a click outside the tooltip, even if hovered.
    #[wasm_bindgen(js_name = clickOutside)]
    pub fn click_outside(&mut self, now: f64) {
        self.inputs(
            AnchorInputs {
                visibility: VisibilityRequest::click_outside(),
                ..AnchorInputs::default()
            },
            now,
        );
    }

    /// Change placement, e.g. `"top-start"`. Applied on the next frame.
    #[wasm_bindgen(js_name = setPlacement)]
    pub fn set_placement(&mut self, placement: &str, now: f64) -> Result<(), JsValue> {
        let placement: PlacementSpec = placement.parse().map_err(WebHostError::from)?;
        let visible = self.anchor.is_visible();
        self.inputs(
            AnchorInputs {
                visibility: VisibilityRequest {
                    value: visible,
                    click_outside: false,
                },
                placement: Some(placement),
                disabled: None,
            },
            now,
        );
        Ok(())
    }

    #[wasm_bindgen(js_name = setDisabled)]
    pub fn set_disabled(&mut self, disabled: bool) {
        self.anchor.set_disabled(disabled);
    }

    /// Report that the tooltip content changed size.
    #[wasm_bindgen(js_name = contentResized)]
    pub fn content_resized(&mut self, now: f64) {
        if let Some(surface) = self.anchor.surface_mut() {
            Lifecycle::<WebDom>::on_inputs_changed(
                surface,
                SurfaceInputs {
                    placement: None,
                    change_size: true,
                },
                host_time(now),
            );
        }
    }

    /// Drain native events, run due timers and deferred frames, and restyle.
    ///
    /// Returns whether timers are still pending.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.destroyed {
            return false;
        }
        let now = host_time(now);
        for event in self.dom.queue().drain() {
            self.dispatch(&event, now);
        }
        self.anchor.tick(&self.dom, now);
        self.anchor.on_frame(&self.dom);
        self.render();
        self.anchor.next_deadline().is_some()
    }

    /// When `tick` next has timer work, in `performance.now()` milliseconds.
    #[wasm_bindgen(js_name = nextDeadline)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.anchor.next_deadline().map(host_ms)
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.anchor.surface().is_some_and(TooltipSurface::is_visible)
    }

    /// Release listeners and unmount a text surface. Idempotent.
    pub fn destroy(&mut self) {
        if std::mem::replace(&mut self.destroyed, true) {
            return;
        }
        self.anchor.on_destroy(&mut self.dom);
    }
}

impl WebTooltip {
    fn inputs(&mut self, inputs: AnchorInputs, now: f64) {
        if self.destroyed {
            return;
        }
        Lifecycle::<WebDom>::on_inputs_changed(&mut self.anchor, inputs, host_time(now));
    }

    fn dispatch(&mut self, event: &HostEvent, now: std::time::Duration) {
        self.anchor.handle_event(event, &self.dom, now);
    }

    /// Write the surface's coordinates and classes into its inline style.
    fn render(&mut self) {
        if !self.anchor.take_dirty() {
            return;
        }
        let Some(surface) = self.anchor.surface() else {
            return;
        };
        let style = surface.style();
        let node = surface.node();
        node.set_class_name(&style.class);
        let css = node.style();
        let mut result = css
            .set_property("top", &style.top)
            .and_then(|()| css.set_property("left", &style.left));
        for (name, value) in [
            ("--perch-caret-top", &style.caret_top),
            ("--perch-caret-left", &style.caret_left),
        ] {
            result = result.and_then(|()| {
                if value.is_empty() {
                    css.remove_property(name).map(drop)
                } else {
                    css.set_property(name, value)
                }
            });
        }
        if result.is_err() {
            perch_core::warn!("failed to apply tooltip style");
        }
    }
}
