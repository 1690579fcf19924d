#![forbid(unsafe_code)]
#![cfg(feature = "serde")]

//! Options (de)serialization.
//!
//!   cargo test -p perch-widgets --features serde --test options_serde

use std::time::Duration;

use perch_widgets::{Align, AnchorOptions, PlacementSpec, Side, TooltipOptions};

#[test]
fn empty_object_yields_defaults() {
    let options: AnchorOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, AnchorOptions::default());
}

#[test]
fn partial_object_overrides_fields() {
    let options: AnchorOptions = serde_json::from_str(
        r#"{
            "placement": "top-start",
            "debounce_ms": 120,
            "surface": { "hide_timeout_ms": 250, "keep_on_mouse_hover": false }
        }"#,
    )
    .unwrap();

    assert_eq!(options.placement, PlacementSpec::new(Side::Top, Align::Start));
    assert_eq!(options.debounce, Duration::from_millis(120));
    assert!(options.animation);
    assert_eq!(options.surface.hide_timeout, Duration::from_millis(250));
    assert!(!options.surface.keep_on_mouse_hover);
    assert_eq!(options.surface.edge_margin, 5.0);
}

#[test]
fn placement_serializes_as_canonical_token() {
    let options = TooltipOptions::default().with_placement(PlacementSpec::centered(Side::Left));
    let json = serde_json::to_value(&options).unwrap();
    assert_eq!(json["placement"], "left");
    assert_eq!(json["hide_timeout_ms"], 150);
}

#[test]
fn unknown_placement_is_rejected() {
    let err = serde_json::from_str::<TooltipOptions>(r#"{ "placement": "diagonal" }"#)
        .unwrap_err()
        .to_string();
    assert!(err.contains("diagonal"), "{err}");
}
