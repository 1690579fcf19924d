#![forbid(unsafe_code)]

//! Conversions from browser values into Perch types.

use std::time::Duration;

use perch_core::event::{Buttons, PointerEvent, PointerEventKind};
use perch_widgets::AnchorOptions;

use crate::error::WebHostError;

/// `performance.now()` milliseconds as a monotonic timestamp.
///
/// Negative and non-finite values map to zero; values too large for a
/// `Duration` saturate.
#[must_use]
pub fn host_time(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Inverse of [`host_time`].
#[must_use]
pub fn host_ms(time: Duration) -> f64 {
    time.as_secs_f64() * 1000.0
}

/// `MouseEvent.buttons` mask. Bits beyond auxiliary are dropped.
#[must_use]
pub fn buttons(mask: u16) -> Buttons {
    Buttons::from_bits_truncate((mask & 0xff) as u8)
}

/// Build a pointer crossing from `MouseEvent` fields.
#[must_use]
pub fn pointer_event(kind: PointerEventKind, client_x: f64, client_y: f64, mask: u16) -> PointerEvent {
    PointerEvent::new(kind, client_x, client_y).with_buttons(buttons(mask))
}

/// Parse the constructor's options JSON. Missing or blank input yields the
/// defaults.
pub fn parse_options(json: Option<&str>) -> Result<AnchorOptions, WebHostError> {
    match json.map(str::trim) {
        None | Some("") => Ok(AnchorOptions::default()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}
