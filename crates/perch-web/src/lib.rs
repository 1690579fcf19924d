#![forbid(unsafe_code)]

//! Browser adapter for Perch tooltips.
//!
//! The adapter implements the Perch host traits over the DOM and exports a
//! small `wasm-bindgen` surface. Native handlers never call into tooltip
//! logic directly: they push [`HostEvent`](perch_core::event::HostEvent)s onto
//! an [`EventQueue`], and the page's animation-frame loop drains the queue
//! through `WebTooltip.tick(performance.now())`. Time therefore only advances
//! when the host says so.
//!
//! ```js
//! const tip = new WebTooltip(button, "Save changes", '{"placement":"top"}');
//! button.addEventListener("mouseenter", () => tip.setVisible(true, performance.now()));
//! button.addEventListener("mouseleave", () => tip.setVisible(false, performance.now()));
//! (function frame(now) { tip.tick(now); requestAnimationFrame(frame); })(performance.now());
//! ```

pub mod convert;
pub mod error;
pub mod queue;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::WebHostError;
pub use queue::EventQueue;

#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
#[cfg(target_arch = "wasm32")]
pub use wasm::WebTooltip;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct WebTooltip;

#[cfg(not(target_arch = "wasm32"))]
impl WebTooltip {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
