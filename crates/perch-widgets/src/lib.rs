#![forbid(unsafe_code)]

//! Tooltip widgets for Perch.
//!
//! - [`placement`]: placement tokens (`bottom`, `top-start`, ...).
//! - [`position`]: the positioning engine and edge correction.
//! - [`surface`]: the tooltip surface and its show/hide state machine.
//! - [`anchor`]: the host-side controller that debounces visibility.
//! - [`lifecycle`]: hooks an adapter layer drives both components through.

pub mod anchor;
pub mod lifecycle;
pub mod options;
pub mod placement;
pub mod position;
pub mod surface;

pub use anchor::{AnchorController, AnchorInputs, AnchorStats, TooltipContent, VisibilityRequest};
pub use lifecycle::{Lifecycle, ListenerSet};
pub use options::{AnchorOptions, TooltipOptions};
pub use placement::{Align, PlacementParseError, PlacementSpec, Side};
pub use position::{Caret, EdgeContext, Placement, Position, compute_placement, correct_edges};
pub use surface::{SurfaceInputs, SurfacePhase, SurfaceStats, SurfaceStyle, TooltipState, TooltipSurface};
