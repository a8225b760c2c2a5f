// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of a floating panel relative to its reference.
//!
//! A [`Placement`] is a primary [`Side`] plus an [`Alignment`] along that
//! side. The string forms match the usual floating-element vocabulary
//! (`"top"`, `"right-start"`, `"bottom-end"`, …) and round-trip through
//! [`FromStr`] and [`Display`](fmt::Display).
//!
//! ```
//! use understory_tooltip::placement::{Alignment, Placement, Side};
//!
//! let p: Placement = "left-end".parse().unwrap();
//! assert_eq!(p.side(), Side::Left);
//! assert_eq!(p.alignment(), Alignment::End);
//! assert_eq!(p.side().opposite(), Side::Right);
//! assert_eq!(p.to_string(), "left-end");
//! ```

use core::fmt;
use core::str::FromStr;

/// One of the four edges of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
}

impl Side {
    /// All sides, clockwise from the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side across from this one (`top`↔`bottom`, `left`↔`right`).
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns `true` for `top` and `bottom`.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The CSS-style name of this side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alignment of the panel along its primary side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Aligned to the start edge of the reference.
    Start,
    /// Centered on the reference.
    #[default]
    Center,
    /// Aligned to the end edge of the reference.
    End,
}

/// Requested or resolved placement of a floating panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Above, centered.
    #[default]
    Top,
    /// Above, start-aligned.
    TopStart,
    /// Above, end-aligned.
    TopEnd,
    /// Right, centered.
    Right,
    /// Right, start-aligned.
    RightStart,
    /// Right, end-aligned.
    RightEnd,
    /// Below, centered.
    Bottom,
    /// Below, start-aligned.
    BottomStart,
    /// Below, end-aligned.
    BottomEnd,
    /// Left, centered.
    Left,
    /// Left, start-aligned.
    LeftStart,
    /// Left, end-aligned.
    LeftEnd,
}

impl Placement {
    /// Every placement, in side-major order.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
    ];

    /// Build a placement from its parts.
    #[must_use]
    pub const fn new(side: Side, alignment: Alignment) -> Self {
        match (side, alignment) {
            (Side::Top, Alignment::Center) => Self::Top,
            (Side::Top, Alignment::Start) => Self::TopStart,
            (Side::Top, Alignment::End) => Self::TopEnd,
            (Side::Right, Alignment::Center) => Self::Right,
            (Side::Right, Alignment::Start) => Self::RightStart,
            (Side::Right, Alignment::End) => Self::RightEnd,
            (Side::Bottom, Alignment::Center) => Self::Bottom,
            (Side::Bottom, Alignment::Start) => Self::BottomStart,
            (Side::Bottom, Alignment::End) => Self::BottomEnd,
            (Side::Left, Alignment::Center) => Self::Left,
            (Side::Left, Alignment::Start) => Self::LeftStart,
            (Side::Left, Alignment::End) => Self::LeftEnd,
        }
    }

    /// The primary side: the part of the name before any `-`.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
        }
    }

    /// The alignment along the primary side.
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Top | Self::Right | Self::Bottom | Self::Left => Alignment::Center,
            Self::TopStart | Self::RightStart | Self::BottomStart | Self::LeftStart => {
                Alignment::Start
            }
            Self::TopEnd | Self::RightEnd | Self::BottomEnd | Self::LeftEnd => Alignment::End,
        }
    }

    /// The same alignment on the opposite side, as a flip would produce.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.side().opposite(), self.alignment())
    }

    /// The canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown placement string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePlacementError {
    _private: (),
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            "expected one of top, right, bottom, left, optionally suffixed with -start or -end",
        )
    }
}

impl core::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(ParsePlacementError { _private: () })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn every_placement_round_trips_through_its_name() {
        for p in Placement::ALL {
            assert_eq!(p.to_string().parse::<Placement>(), Ok(p));
        }
    }

    #[test]
    fn side_is_the_prefix_before_dash() {
        for p in Placement::ALL {
            let prefix = p.as_str().split('-').next().unwrap();
            assert_eq!(p.side().as_str(), prefix);
        }
    }

    #[test]
    fn new_inverts_side_and_alignment() {
        for p in Placement::ALL {
            assert_eq!(Placement::new(p.side(), p.alignment()), p);
        }
    }

    #[test]
    fn opposite_is_an_involution() {
        for s in Side::ALL {
            assert_ne!(s.opposite(), s);
            assert_eq!(s.opposite().opposite(), s);
            assert_eq!(s.is_vertical(), s.opposite().is_vertical());
        }
    }

    #[test]
    fn flipped_keeps_alignment() {
        assert_eq!(Placement::TopStart.flipped(), Placement::BottomStart);
        assert_eq!(Placement::Left.flipped(), Placement::Right);
        assert_eq!(Placement::RightEnd.flipped(), Placement::LeftEnd);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("middle".parse::<Placement>().is_err());
        assert!("Top".parse::<Placement>().is_err());
        assert!("top-center".parse::<Placement>().is_err());
        assert!("".parse::<Placement>().is_err());
    }

    #[test]
    fn default_is_top() {
        assert_eq!(Placement::default(), Placement::Top);
    }
}
