#![forbid(unsafe_code)]

//! Core: geometry, pointer events, debouncing, and the host traits the
//! tooltip engine talks to.

pub mod debounce;
pub mod event;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod measure;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
