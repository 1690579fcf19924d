#![forbid(unsafe_code)]

//! Placement tokens.
//!
//! A placement names the side of the host the tooltip sits on and, optionally,
//! how it aligns along that side: `bottom`, `top-start`, `right-end`, ...
//!
//! Besides `start`/`center`/`end`, each side accepts the natural words for its
//! cross axis: `top-left`/`top-right` (and `bottom-*`) align horizontally,
//! `left-top`/`left-bottom` (and `right-*`) align vertically.

use std::fmt;
use std::str::FromStr;

/// Side of the host the tooltip is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    Top,
    /// Default.
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Token (and CSS class) for this side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether the tooltip is beside the host rather than above or below it.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Alignment along the placement side.
///
/// For `top`/`bottom` this is horizontal (start = left edge); for
/// `left`/`right` it is vertical (start = top edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// Parsed placement token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlacementSpec {
    pub side: Side,
    pub align: Align,
}

impl PlacementSpec {
    /// Create a placement.
    #[must_use]
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// Centered placement on `side`.
    #[must_use]
    pub const fn centered(side: Side) -> Self {
        Self::new(side, Align::Center)
    }

    /// Return a copy with a different alignment.
    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

impl From<Side> for PlacementSpec {
    fn from(side: Side) -> Self {
        Self::centered(side)
    }
}

impl fmt::Display for PlacementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.align {
            Align::Center => f.write_str(self.side.as_str()),
            align => write!(f, "{}-{}", self.side.as_str(), align.as_str()),
        }
    }
}

/// Error parsing a placement token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementParseError {
    /// The token was empty.
    Empty,
    /// The side segment is not `top`, `bottom`, `left`, or `right`.
    UnknownSide(String),
    /// The alignment segment is not valid for the side.
    UnknownAlign { side: Side, align: String },
    /// More than two `-`-separated segments.
    TrailingSegments(String),
}

impl fmt::Display for PlacementParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty placement"),
            Self::UnknownSide(side) => write!(f, "unknown placement side {side:?}"),
            Self::UnknownAlign { side, align } => {
                write!(f, "alignment {align:?} is not valid for side {}", side.as_str())
            }
            Self::TrailingSegments(token) => write!(f, "too many segments in placement {token:?}"),
        }
    }
}

impl std::error::Error for PlacementParseError {}

fn parse_align(side: Side, token: &str) -> Option<Align> {
    match (side.is_horizontal(), token) {
        (_, "start") => Some(Align::Start),
        (_, "center") => Some(Align::Center),
        (_, "end") => Some(Align::End),
        (false, "left") | (true, "top") => Some(Align::Start),
        (false, "right") | (true, "bottom") => Some(Align::End),
        _ => None,
    }
}

impl FromStr for PlacementSpec {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PlacementParseError::Empty);
        }
        let mut parts = s.split('-');
        let side = match parts.next().unwrap_or_default() {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            other => return Err(PlacementParseError::UnknownSide(other.to_owned())),
        };
        let align = match parts.next() {
            None => Align::Center,
            Some(token) => {
                parse_align(side, token).ok_or_else(|| PlacementParseError::UnknownAlign {
                    side,
                    align: token.to_owned(),
                })?
            }
        };
        if parts.next().is_some() {
            return Err(PlacementParseError::TrailingSegments(s.to_owned()));
        }
        Ok(Self { side, align })
    }
}

impl TryFrom<String> for PlacementSpec {
    type Error = PlacementParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlacementSpec> for String {
    fn from(value: PlacementSpec) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> PlacementSpec {
        s.parse().unwrap_or_else(|e| panic!("{s:?} should parse: {e}"))
    }

    #[test]
    fn bare_side_defaults_to_center() {
        assert_eq!(parse("top"), PlacementSpec::new(Side::Top, Align::Center));
        assert_eq!(parse("right"), PlacementSpec::centered(Side::Right));
    }

    #[test]
    fn default_is_bottom_center() {
        assert_eq!(PlacementSpec::default(), parse("bottom"));
    }

    #[test]
    fn generic_aligns_work_on_every_side() {
        for side in ["top", "bottom", "left", "right"] {
            assert_eq!(parse(&format!("{side}-start")).align, Align::Start);
            assert_eq!(parse(&format!("{side}-center")).align, Align::Center);
            assert_eq!(parse(&format!("{side}-end")).align, Align::End);
        }
    }

    #[test]
    fn cross_axis_words_follow_the_side() {
        assert_eq!(parse("top-left").align, Align::Start);
        assert_eq!(parse("bottom-right").align, Align::End);
        assert_eq!(parse("left-top").align, Align::Start);
        assert_eq!(parse("right-bottom").align, Align::End);
    }

    #[test]
    fn same_axis_words_are_rejected() {
        assert_eq!(
            "top-bottom".parse::<PlacementSpec>(),
            Err(PlacementParseError::UnknownAlign {
                side: Side::Top,
                align: "bottom".into()
            })
        );
        assert!("left-right".parse::<PlacementSpec>().is_err());
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!("".parse::<PlacementSpec>(), Err(PlacementParseError::Empty));
        assert_eq!(
            "above".parse::<PlacementSpec>(),
            Err(PlacementParseError::UnknownSide("above".into()))
        );
        assert!(matches!(
            "top-start-x".parse::<PlacementSpec>(),
            Err(PlacementParseError::TrailingSegments(_))
        ));
        assert!("Top".parse::<PlacementSpec>().is_err());
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(parse("bottom").to_string(), "bottom");
        assert_eq!(parse("top-left").to_string(), "top-start");
        assert_eq!(parse("right-bottom").to_string(), "right-end");
        assert_eq!(parse("left-center").to_string(), "left");
        assert_eq!(String::from(parse("left-start")), "left-start");
    }

    #[test]
    fn error_messages() {
        let err = "top-bottom".parse::<PlacementSpec>().unwrap_err();
        assert_eq!(err.to_string(), "alignment \"bottom\" is not valid for side top");
    }
}
