// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow geometry: where to put the little pointer glyph on a floating panel.
//!
//! The arrow is a square of side `size`, rotated 45°, that straddles the
//! panel edge facing the reference. Its position along that edge comes from
//! the floating resolver's arrow computation ([`ArrowAnchor`]); its inset
//! across the edge is fixed at `-size / 2` on the *static* side, which is the
//! side opposite the resolved placement.
//!
//! ```
//! use understory_tooltip::arrow::{ArrowAnchor, arrow_style};
//! use understory_tooltip::placement::Placement;
//!
//! // Panel above the trigger: the arrow hangs off its bottom edge.
//! let style = arrow_style(Placement::Top, Some(ArrowAnchor::x(42.0)), 10.0);
//! assert_eq!(style.left, Some(42.0));
//! assert_eq!(style.top, None);
//! assert_eq!(style.bottom, Some(-5.0));
//! assert_eq!(style.right, None);
//! ```

use alloc::format;
use alloc::string::String;
use core::f64::consts::SQRT_2;

use crate::placement::{Placement, Side};

/// Arrow size used when a caller enables the arrow without choosing a size.
pub const DEFAULT_ARROW_SIZE: f64 = 8.0;

/// Arrow coordinates along the panel edge, as computed by the floating resolver.
///
/// Either axis may be missing: a resolver only reports the axis that runs
/// along the edge the arrow sits on.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArrowAnchor {
    /// Offset from the panel's left edge.
    pub x: Option<f64>,
    /// Offset from the panel's top edge.
    pub y: Option<f64>,
}

impl ArrowAnchor {
    /// Anchor with only a horizontal coordinate (top/bottom placements).
    #[must_use]
    pub const fn x(x: f64) -> Self {
        Self {
            x: Some(x),
            y: None,
        }
    }

    /// Anchor with only a vertical coordinate (left/right placements).
    #[must_use]
    pub const fn y(y: f64) -> Self {
        Self {
            x: None,
            y: Some(y),
        }
    }
}

/// Absolute-position insets for the arrow element, in pixels.
///
/// `None` means "leave unset".
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArrowStyle {
    /// `left` inset.
    pub left: Option<f64>,
    /// `top` inset.
    pub top: Option<f64>,
    /// `right` inset.
    pub right: Option<f64>,
    /// `bottom` inset.
    pub bottom: Option<f64>,
}

impl ArrowStyle {
    /// The inset for one side.
    #[must_use]
    pub const fn inset(&self, side: Side) -> Option<f64> {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    fn set_inset(&mut self, side: Side, value: Option<f64>) {
        match side {
            Side::Top => self.top = value,
            Side::Right => self.right = value,
            Side::Bottom => self.bottom = value,
            Side::Left => self.left = value,
        }
    }

    /// Render as CSS declarations in `left, top, right, bottom` order.
    ///
    /// Unset sides render as an empty string, which clears any previous value
    /// when applied to an inline style.
    #[must_use]
    pub fn css(&self) -> [(&'static str, String); 4] {
        [
            ("left", css_px(self.left)),
            ("top", css_px(self.top)),
            ("right", css_px(self.right)),
            ("bottom", css_px(self.bottom)),
        ]
    }
}

/// Format an optional pixel length, using the empty string for `None`.
pub fn css_px(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}px"),
        None => String::new(),
    }
}

/// Compute the arrow insets for a resolved placement.
///
/// - `left`/`top` come from `anchor` when present.
/// - The side opposite `placement`'s primary side is set to `-size / 2`.
/// - The primary side is always left unset.
#[must_use]
pub fn arrow_style(placement: Placement, anchor: Option<ArrowAnchor>, size: f64) -> ArrowStyle {
    let anchor = anchor.unwrap_or_default();
    let mut style = ArrowStyle {
        left: anchor.x,
        top: anchor.y,
        right: None,
        bottom: None,
    };
    let static_side = placement.side().opposite();
    style.set_inset(static_side, Some(half_inset(size)));
    style
}

/// `-size / 2`, with a zero size producing positive zero.
fn half_inset(size: f64) -> f64 {
    let inset = -size / 2.0;
    if inset == 0.0 { 0.0 } else { inset }
}

/// Main-axis distance between reference and panel once the arrow is accounted for.
///
/// With an arrow of `size`, the panel moves away by the arrow's half
/// diagonal (`size·√2/2`) so the rotated square does not overlap the
/// reference.
#[must_use]
pub fn arrow_offset(offset: f64, arrow_size: Option<f64>) -> f64 {
    match arrow_size {
        Some(size) => offset + size * SQRT_2 / 2.0,
        None => offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_placement_insets_bottom() {
        for size in [0.0, 1.0, 8.0, 13.5, 40.0] {
            let s = arrow_style(Placement::Top, None, size);
            assert_eq!(s.bottom, Some(half_inset(size)));
            assert_eq!(s.top, None);
        }
    }

    #[test]
    fn static_side_is_opposite_for_every_placement() {
        for p in Placement::ALL {
            let s = arrow_style(p, None, 12.0);
            assert_eq!(s.inset(p.side().opposite()), Some(-6.0));
            assert_eq!(s.inset(p.side()), None);
        }
    }

    #[test]
    fn anchor_axes_are_copied() {
        let s = arrow_style(
            Placement::RightStart,
            Some(ArrowAnchor {
                x: Some(3.0),
                y: Some(17.0),
            }),
            8.0,
        );
        assert_eq!(s.top, Some(17.0));
        // `left` is the static side for a right placement and wins over the anchor.
        assert_eq!(s.left, Some(-4.0));
        assert_eq!(s.right, None);
    }

    #[test]
    fn missing_anchor_leaves_axes_unset() {
        let s = arrow_style(Placement::Bottom, Some(ArrowAnchor::default()), 8.0);
        assert_eq!(s.left, None);
        assert_eq!(s.top, Some(-4.0));
        assert_eq!(s.right, None);
        assert_eq!(s.bottom, None);
    }

    #[test]
    fn zero_size_inset_is_positive_zero() {
        let s = arrow_style(Placement::Left, None, 0.0);
        let inset = s.right.unwrap();
        assert_eq!(inset, 0.0);
        assert!(inset.is_sign_positive());
        assert_eq!(css_px(s.right), "0px");
    }

    #[test]
    fn css_renders_px_and_empty_strings() {
        let s = arrow_style(Placement::Top, Some(ArrowAnchor::x(42.5)), 10.0);
        let css = s.css();
        assert_eq!(css[0], ("left", String::from("42.5px")));
        assert_eq!(css[1], ("top", String::new()));
        assert_eq!(css[2], ("right", String::new()));
        assert_eq!(css[3], ("bottom", String::from("-5px")));
    }

    #[test]
    fn offset_grows_by_half_diagonal() {
        assert_eq!(arrow_offset(4.0, None), 4.0);
        let with_arrow = arrow_offset(4.0, Some(10.0));
        // sqrt(2 * 10^2) / 2
        let expected = 4.0 + 7.071_067_811_865_475;
        assert!(with_arrow - expected < 1e-9 && expected - with_arrow < 1e-9);
        assert_eq!(arrow_offset(4.0, Some(0.0)), 4.0);
    }
}
