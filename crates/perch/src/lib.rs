#![forbid(unsafe_code)]

//! Perch public facade crate.
//!
//! Re-exports the tooltip engine and host traits, and offers a prelude for
//! adapter authors.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use perch_core::debounce::Debouncer;
pub use perch_core::event::{Buttons, HostEvent, PointerEvent, PointerEventKind};
pub use perch_core::geometry::{BoxMetrics, OFFSCREEN, Point, Rect, Size};
pub use perch_core::host::{
    DeclaredOffset, Host, LayoutHost, ListenerHandle, ListenerKind, ListenerRegistry,
    PositionKind, SurfaceMounter,
};

// --- Widget re-exports -----------------------------------------------------

pub use perch_widgets::{
    Align, AnchorController, AnchorInputs, AnchorOptions, Lifecycle, PlacementParseError,
    PlacementSpec, Side, SurfaceInputs, SurfacePhase, SurfaceStyle, TooltipContent,
    TooltipOptions, TooltipState, TooltipSurface, VisibilityRequest,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Perch adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A placement token failed to parse.
    Placement(PlacementParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Placement(err) => Some(err),
        }
    }
}

impl From<PlacementParseError> for Error {
    fn from(err: PlacementParseError) -> Self {
        Self::Placement(err)
    }
}

/// Standard result type for Perch APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a placement token such as `"top-start"`.
pub fn placement(token: &str) -> Result<PlacementSpec> {
    Ok(token.parse()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnchorController, AnchorOptions, Error, Host, HostEvent, Lifecycle, PlacementSpec,
        Result, Side, TooltipContent, TooltipOptions, TooltipSurface, VisibilityRequest,
    };

    pub use crate::{core, widgets};
}

pub use perch_core as core;
pub use perch_widgets as widgets;
