#![forbid(unsafe_code)]

//! Host events delivered to tooltip components.
//!
//! Adapters translate native events (DOM `mouseenter`/`mouseleave`, window
//! `resize`) into these types before handing them to a component. Coordinates
//! are CSS pixels in viewport space.

use bitflags::bitflags;

use crate::geometry::{Point, Size};

/// A canonical host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer crossed into or out of an element.
    Pointer(PointerEvent),

    /// The window (viewport) changed size.
    WindowResize(Size),
}

bitflags! {
    /// Pointer buttons held while an event fired.
    ///
    /// Bit values match the DOM `MouseEvent.buttons` mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// No buttons held.
        const NONE      = 0b0000;
        /// Primary (usually left) button.
        const PRIMARY   = 0b0001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0010;
        /// Auxiliary (usually wheel) button.
        const AUXILIARY = 0b0100;
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::NONE
    }
}

/// The kind of pointer crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer entered the element.
    Enter,

    /// Pointer left the element.
    Leave,
}

/// A pointer crossing event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,

    /// Pointer position when the event fired.
    pub position: Point,

    /// Buttons held during the event.
    pub buttons: Buttons,
}

impl PointerEvent {
    /// Create a new pointer event with no buttons held.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            buttons: Buttons::NONE,
        }
    }

    /// Shorthand for an enter event at `(x, y)`.
    #[must_use]
    pub const fn enter(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Enter, x, y)
    }

    /// Shorthand for a leave event at `(x, y)`.
    #[must_use]
    pub const fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Leave, x, y)
    }

    /// Attach a held-button mask.
    #[must_use]
    pub const fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Whether the secondary button was held.
    ///
    /// Context-menu interactions fire a leave with the secondary button held;
    /// tooltips must not treat that as the pointer moving away.
    #[must_use]
    pub fn is_context_menu(&self) -> bool {
        self.buttons.contains(Buttons::SECONDARY)
    }
}
