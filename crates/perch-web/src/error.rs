#![forbid(unsafe_code)]

//! Adapter errors.

use std::fmt;

/// Errors raised while wiring a tooltip into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebHostError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// `window.document` is missing.
    NoDocument,
    /// `document.body` is missing; text surfaces have nowhere to mount.
    NoBody,
    /// Content is neither a string nor an element.
    InvalidContent,
    /// Options JSON failed to parse.
    InvalidOptions(String),
    /// A placement token failed to parse.
    InvalidPlacement(String),
    /// A DOM call threw.
    Js(String),
}

impl fmt::Display for WebHostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::NoBody => write!(f, "document has no body"),
            Self::InvalidContent => write!(f, "tooltip content must be a string or an element"),
            Self::InvalidOptions(msg) => write!(f, "invalid tooltip options: {msg}"),
            Self::InvalidPlacement(msg) => write!(f, "invalid placement: {msg}"),
            Self::Js(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for WebHostError {}

impl WebHostError {
    /// Error for a failed text mount: the typed error the DOM recorded, or
    /// the anchor's message when nothing was recorded.
    #[must_use]
    pub fn mount_failed(recorded: Option<Self>, message: &str) -> Self {
        recorded.unwrap_or_else(|| Self::Js(message.to_owned()))
    }
}

impl From<serde_json::Error> for WebHostError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}

impl From<perch_widgets::PlacementParseError> for WebHostError {
    fn from(err: perch_widgets::PlacementParseError) -> Self {
        Self::InvalidPlacement(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl WebHostError {
    /// Wrap a thrown JS value.
    pub(crate) fn js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WebHostError> for wasm_bindgen::JsValue {
    fn from(err: WebHostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
