#![forbid(unsafe_code)]

//! Tooltip configuration.
//!
//! Every option has a default, so `TooltipOptions::default()` and
//! `AnchorOptions::default()` describe a working tooltip. With the `serde`
//! feature both structs deserialize from partial JSON, durations given in
//! milliseconds:
//!
//! ```json
//! { "placement": "top-start", "disabled": false, "debounce_ms": 200,
//!   "surface": { "hide_timeout_ms": 250, "keep_on_mouse_hover": true } }
//! ```

use std::time::Duration;

use crate::placement::PlacementSpec;
use crate::position::EDGE_MARGIN;

/// Default hover-leave hide delay.
pub const DEFAULT_HIDE_TIMEOUT: Duration = Duration::from_millis(150);

/// Default anchor visibility debounce window.
pub const DEFAULT_VISIBILITY_DEBOUNCE: Duration = Duration::from_millis(300);

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Options owned by a tooltip surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TooltipOptions {
    /// Side and alignment relative to the host.
    #[cfg_attr(feature = "serde", serde(with = "placement_token"))]
    pub placement: PlacementSpec,

    /// Toggle the fade flag on show/hide.
    pub animation: bool,

    /// Quiet period after the pointer leaves the surface before it hides.
    #[cfg_attr(feature = "serde", serde(rename = "hide_timeout_ms", with = "millis"))]
    pub hide_timeout: Duration,

    /// Keep the surface open while the pointer is over it.
    pub keep_on_mouse_hover: bool,

    /// Gap left between a right-clamped surface and the container edge.
    pub edge_margin: f64,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            placement: PlacementSpec::default(),
            animation: true,
            hide_timeout: DEFAULT_HIDE_TIMEOUT,
            keep_on_mouse_hover: true,
            edge_margin: EDGE_MARGIN,
        }
    }
}

impl TooltipOptions {
    #[must_use]
    pub fn with_placement(mut self, placement: PlacementSpec) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_hide_timeout(mut self, timeout: Duration) -> Self {
        self.hide_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_keep_on_mouse_hover(mut self, keep: bool) -> Self {
        self.keep_on_mouse_hover = keep;
        self
    }

    /// Negative margins are clamped to zero.
    #[must_use]
    pub fn with_edge_margin(mut self, margin: f64) -> Self {
        self.edge_margin = margin.max(0.0);
        self
    }
}

/// Options owned by an anchor controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnchorOptions {
    /// Placement pushed to the surface on every show.
    #[cfg_attr(feature = "serde", serde(with = "placement_token"))]
    pub placement: PlacementSpec,

    /// Animation flag pushed to the surface when it is first shown.
    pub animation: bool,

    /// Suppress display. A visible tooltip still repositions.
    pub disabled: bool,

    /// Window within which visibility requests collapse to the last one.
    #[cfg_attr(feature = "serde", serde(rename = "debounce_ms", with = "millis"))]
    pub debounce: Duration,

    /// Options for surfaces the anchor mounts from text payloads.
    pub surface: TooltipOptions,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            placement: PlacementSpec::default(),
            animation: true,
            disabled: false,
            debounce: DEFAULT_VISIBILITY_DEBOUNCE,
            surface: TooltipOptions::default(),
        }
    }
}

impl AnchorOptions {
    #[must_use]
    pub fn with_placement(mut self, placement: PlacementSpec) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_surface(mut self, surface: TooltipOptions) -> Self {
        self.surface = surface;
        self
    }

    /// Surface options for a mounted text payload: the anchor's placement
    /// and animation override the surface defaults.
    #[must_use]
    pub fn mounted_surface_options(&self) -> TooltipOptions {
        self.surface
            .clone()
            .with_placement(self.placement)
            .with_animation(self.animation)
    }
}

#[cfg(feature = "serde")]
mod placement_token {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::placement::PlacementSpec;

    pub fn serialize<S: Serializer>(value: &PlacementSpec, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PlacementSpec, D::Error> {
        let token = String::deserialize(d)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Align, Side};

    #[test]
    fn defaults_match_documented_table() {
        let t = TooltipOptions::default();
        assert_eq!(t.placement, PlacementSpec::centered(Side::Bottom));
        assert!(t.animation);
        assert_eq!(t.hide_timeout, Duration::from_millis(150));
        assert!(t.keep_on_mouse_hover);
        assert_eq!(t.edge_margin, 5.0);

        let a = AnchorOptions::default();
        assert!(!a.disabled);
        assert_eq!(a.debounce, Duration::from_millis(300));
    }

    #[test]
    fn builders_chain() {
        let a = AnchorOptions::default()
            .with_placement(PlacementSpec::new(Side::Left, Align::End))
            .with_animation(false)
            .with_disabled(true)
            .with_debounce(Duration::ZERO);
        assert_eq!(a.placement.side, Side::Left);
        assert!(!a.animation);
        assert!(a.disabled);
        assert_eq!(a.debounce, Duration::ZERO);
    }

    #[test]
    fn mounted_surface_inherits_anchor_placement() {
        let a = AnchorOptions::default()
            .with_placement(Side::Top.into())
            .with_animation(false)
            .with_surface(TooltipOptions::default().with_hide_timeout(Duration::from_millis(20)));
        let s = a.mounted_surface_options();
        assert_eq!(s.placement, Side::Top.into());
        assert!(!s.animation);
        assert_eq!(s.hide_timeout, Duration::from_millis(20));
    }

    #[test]
    fn negative_edge_margin_clamps() {
        assert_eq!(TooltipOptions::default().with_edge_margin(-3.0).edge_margin, 0.0);
    }
}
