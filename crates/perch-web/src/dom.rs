#![forbid(unsafe_code)]

//! Host traits over the browser DOM.

use std::collections::HashMap;

use perch_core::event::{HostEvent, PointerEventKind};
use perch_core::geometry::{Point, Rect, Size};
use perch_core::host::{
    DeclaredOffset, LayoutHost, ListenerHandle, ListenerKind, ListenerRegistry, PositionKind,
    SurfaceMounter,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, EventTarget, HtmlElement, MouseEvent, Window};

use crate::convert;
use crate::error::WebHostError;
use crate::queue::EventQueue;

struct Registered {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// The page, seen through Perch's host traits.
///
/// Listeners push into the shared [`EventQueue`]; nothing runs tooltip logic
/// from inside a native callback.
pub struct WebDom {
    window: Window,
    document: Document,
    queue: EventQueue,
    listeners: HashMap<u64, Registered>,
    next_listener: u64,
    mount_error: Option<WebHostError>,
}

impl std::fmt::Debug for WebDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDom")
            .field("listeners", &self.listeners.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

fn viewport(window: &Window) -> Size {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size::new(dim(window.inner_width()), dim(window.inner_height()))
}

impl WebDom {
    /// Bind to the global window.
    pub fn new(queue: EventQueue) -> Result<Self, WebHostError> {
        let window = web_sys::window().ok_or(WebHostError::NoWindow)?;
        let document = window.document().ok_or(WebHostError::NoDocument)?;
        Ok(Self {
            window,
            document,
            queue,
            listeners: HashMap::new(),
            next_listener: 0,
            mount_error: None,
        })
    }

    #[must_use]
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// `performance.now()`, or zero without a performance object.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }

    /// The error from the last failed `mount_surface`, if any.
    pub fn take_mount_error(&mut self) -> Option<WebHostError> {
        self.mount_error.take()
    }

    fn create_surface(&self, text: &str) -> Result<HtmlElement, WebHostError> {
        let body = self.document.body().ok_or(WebHostError::NoBody)?;
        let el = self
            .document
            .create_element("div")
            .map_err(|e| WebHostError::js(&e))?
            .dyn_into::<HtmlElement>()
            .map_err(|e| WebHostError::js(&e))?;
        el.set_class_name("tooltip");
        el.set_text_content(Some(text));
        let style = el.style();
        for (name, value) in [
            ("position", "absolute"),
            ("top", "-10000px"),
            ("left", "-10000px"),
        ] {
            style
                .set_property(name, value)
                .map_err(|e| WebHostError::js(&e))?;
        }
        body.append_child(&el).map_err(|e| WebHostError::js(&e))?;
        Ok(el)
    }

    fn pointer_callback(&self, kind: PointerEventKind) -> Closure<dyn FnMut(Event)> {
        let queue = self.queue.clone();
        Closure::new(move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                queue.push(HostEvent::Pointer(convert::pointer_event(
                    kind,
                    f64::from(mouse.client_x()),
                    f64::from(mouse.client_y()),
                    mouse.buttons(),
                )));
            }
        })
    }

    fn resize_callback(&self) -> Closure<dyn FnMut(Event)> {
        let queue = self.queue.clone();
        let window = self.window.clone();
        Closure::new(move |_event: Event| {
            queue.push(HostEvent::WindowResize(viewport(&window)));
        })
    }
}

impl LayoutHost for WebDom {
    type Node = HtmlElement;

    fn bounding_rect(&self, node: &HtmlElement) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn offset_size(&self, node: &HtmlElement) -> Size {
        Size::new(f64::from(node.offset_width()), f64::from(node.offset_height()))
    }

    fn client_size(&self, node: &HtmlElement) -> Size {
        Size::new(f64::from(node.client_width()), f64::from(node.client_height()))
    }

    fn client_origin(&self, node: &HtmlElement) -> Point {
        Point::new(f64::from(node.client_left()), f64::from(node.client_top()))
    }

    fn scroll_offset(&self, node: &HtmlElement) -> Point {
        Point::new(f64::from(node.scroll_left()), f64::from(node.scroll_top()))
    }

    fn offset_parent(&self, node: &HtmlElement) -> Option<HtmlElement> {
        node.offset_parent()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
    }

    fn offset_top(&self, node: &HtmlElement) -> f64 {
        f64::from(node.offset_top())
    }

    fn position_kind(&self, node: &HtmlElement) -> PositionKind {
        self.window
            .get_computed_style(node)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("position").ok())
            .map_or(PositionKind::Static, |value| PositionKind::from_css(&value))
    }

    fn declared_offset(&self, node: &HtmlElement) -> DeclaredOffset {
        let style = node.style();
        let top = style.get_property_value("top").unwrap_or_default();
        let left = style.get_property_value("left").unwrap_or_default();
        DeclaredOffset::from_css(&top, &left)
    }

    fn page_scroll(&self) -> Point {
        Point::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn viewport_size(&self) -> Size {
        viewport(&self.window)
    }
}

impl ListenerRegistry<HtmlElement> for WebDom {
    fn add_listener(&mut self, target: Option<&HtmlElement>, kind: ListenerKind) -> ListenerHandle {
        self.next_listener += 1;
        let handle = ListenerHandle(self.next_listener);

        let (target, event, callback): (EventTarget, &'static str, _) = match (kind, target) {
            (ListenerKind::WindowResize, _) => {
                (self.window.clone().into(), "resize", self.resize_callback())
            }
            (ListenerKind::PointerEnter, Some(el)) => (
                el.clone().into(),
                "mouseenter",
                self.pointer_callback(PointerEventKind::Enter),
            ),
            (ListenerKind::PointerLeave, Some(el)) => (
                el.clone().into(),
                "mouseleave",
                self.pointer_callback(PointerEventKind::Leave),
            ),
            (_, None) => {
                perch_core::warn!("pointer listener requested without a target");
                return handle;
            }
        };

        if target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .is_err()
        {
            perch_core::warn!(event, "addEventListener failed");
            return handle;
        }
        self.listeners.insert(
            handle.0,
            Registered {
                target,
                event,
                callback,
            },
        );
        handle
    }

    fn remove_listener(&mut self, handle: ListenerHandle) {
        let Some(registered) = self.listeners.remove(&handle.0) else {
            return;
        };
        if registered
            .target
            .remove_event_listener_with_callback(
                registered.event,
                registered.callback.as_ref().unchecked_ref(),
            )
            .is_err()
        {
            perch_core::warn!(event = registered.event, "removeEventListener failed");
        }
    }
}

impl SurfaceMounter<HtmlElement> for WebDom {
    type MountError = WebHostError;

    fn mount_surface(&mut self, text: &str) -> Result<HtmlElement, WebHostError> {
        self.create_surface(text).inspect_err(|err| {
            self.mount_error = Some(err.clone());
        })
    }

    fn unmount_surface(&mut self, node: &HtmlElement) {
        node.remove();
    }
}

impl Drop for WebDom {
    fn drop(&mut self) {
        let handles: Vec<u64> = self.listeners.keys().copied().collect();
        for handle in handles {
            self.remove_listener(ListenerHandle(handle));
        }
    }
}
