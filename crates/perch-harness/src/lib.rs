#![forbid(unsafe_code)]

//! Deterministic test doubles for Perch components.
//!
//! - [`MemoryDom`]: an in-memory document implementing every host trait
//!   (`LayoutHost`, `ListenerRegistry`, `SurfaceMounter`).
//! - [`ManualClock`]: a monotonic clock the test advances explicitly.
//!
//! # Quick Start
//!
//! ```
//! use perch_core::geometry::Rect;
//! use perch_core::host::PositionKind;
//! use perch_harness::{MemoryDom, NodeSpec};
//!
//! let mut dom = MemoryDom::new(800.0, 600.0);
//! let panel = dom.insert(
//!     NodeSpec::new(Rect::new(0.0, 0.0, 400.0, 300.0)).position(PositionKind::Relative),
//! );
//! let button = dom.insert(NodeSpec::new(Rect::new(50.0, 100.0, 80.0, 20.0)).parent(panel));
//! assert_eq!(dom.offset_parent_of(button), Some(panel));
//! ```

pub mod clock;
pub mod dom;

pub use clock::ManualClock;
pub use dom::{MemoryDom, NodeId, NodeSpec, TextMetrics};
