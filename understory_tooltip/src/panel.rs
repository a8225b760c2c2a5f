// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel description: what a host renders for an open tooltip.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::arrow::{ArrowStyle, css_px};
use crate::floating::{FloatingStyles, Strategy};
use crate::placement::Placement;
use crate::trigger::{Handler, NodeRef};

/// Tooltip body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Content<C> {
    /// Nothing; the panel is never shown.
    #[default]
    Empty,
    /// Plain text. Empty text counts as no content.
    Text(String),
    /// An arbitrary host subtree.
    Node(C),
}

impl<C> Content<C> {
    /// Returns `true` when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Node(_) => false,
        }
    }
}

impl<C> From<&str> for Content<C> {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl<C> From<String> for Content<C> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Inline style of the floating wrapper.
///
/// Before the first resolution the wrapper sits at the container origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelStyle {
    /// `z-index`, when one is set.
    pub z_index: Option<i32>,
    /// `position`.
    pub strategy: Strategy,
    /// `left`/`top`.
    pub origin: Point,
}

impl PanelStyle {
    /// Fallback style with an optional z-index.
    #[must_use]
    pub fn new(z_index: Option<i32>) -> Self {
        Self {
            z_index,
            strategy: Strategy::Absolute,
            origin: Point::ZERO,
        }
    }

    /// Overlay resolved floating styles.
    #[must_use]
    pub fn with_floating(self, styles: FloatingStyles) -> Self {
        Self {
            strategy: styles.strategy,
            origin: styles.origin,
            ..self
        }
    }

    /// Render as CSS declarations.
    pub fn css(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(4);
        if let Some(z) = self.z_index {
            out.push(("z-index", format!("{z}")));
        }
        out.push(("position", String::from(self.strategy.as_str())));
        out.push(("top", css_px(Some(self.origin.y))));
        out.push(("left", css_px(Some(self.origin.x))));
        out
    }
}

/// The arrow element inside the panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowProps {
    /// `class` attribute.
    pub class_name: String,
    /// Width and height in pixels.
    pub size: f64,
    /// Position insets.
    pub style: ArrowStyle,
}

/// Hover handlers on the panel (interactive mode only).
pub struct PanelHandlers {
    /// Pointer entered the panel.
    pub pointer_enter: Handler,
    /// Pointer left the panel.
    pub pointer_leave: Handler,
}

impl fmt::Debug for PanelHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PanelHandlers")
    }
}

/// Everything needed to render an open tooltip panel.
///
/// The outer wrapper carries `id`, `role` and the positioning style; the
/// inner element carries `content_class`, the attributes and the content.
#[derive(Debug)]
pub struct PanelProps<'a, N, C> {
    /// Element id, matching the trigger's `described_by`.
    pub id: &'a str,
    /// ARIA role: always `"tooltip"`.
    pub role: &'static str,
    /// Wrapper class.
    pub class_name: &'static str,
    /// Inner element class.
    pub content_class: String,
    /// Wrapper style.
    pub style: PanelStyle,
    /// Resolved placement, or the requested one before resolution.
    pub placement: Placement,
    /// The body.
    pub content: &'a Content<C>,
    /// Extra attributes for the inner element.
    pub attributes: &'a [(String, String)],
    /// Reference slot for the wrapper node; the positioning anchor's floating node.
    pub node_ref: NodeRef<N>,
    /// Hover handlers, absent when interactive mode is off.
    pub handlers: Option<PanelHandlers>,
    /// The arrow, when enabled.
    pub arrow: Option<ArrowProps>,
}

/// Wrapper class of every tooltip panel.
pub const PANEL_CLASS: &str = "headless-popper";
/// Base class of the inner element.
pub const CONTENT_CLASS: &str = "headless-tooltip";
/// Base class of the arrow element.
pub const ARROW_CLASS: &str = "headless-tooltip-arrow";
/// ARIA role of the panel.
pub const ROLE: &str = "tooltip";

/// `"{base} {extra}"`, as a CSS class list.
pub(crate) fn class_list(base: &str, extra: &str) -> String {
    format!("{base} {extra}")
}
