// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Standalone floating content against an explicit reference.
//!
//! [`Popper`] is the positioning half of a tooltip without any open-state
//! logic: the caller decides when to show it and renders whatever it likes
//! from the [`PopperFrame`].
//!
//! ```
//! use understory_tooltip::placement::Placement;
//! use understory_tooltip::popper::{Popper, PopperConfig};
//!
//! let popper: Popper<u32> = Popper::new(PopperConfig::new().arrow(true));
//! assert_eq!(popper.options().placement, Placement::Bottom);
//! // Before either node is attached the frame is the unresolved fallback.
//! let frame = popper.frame();
//! assert_eq!(frame.placement, Placement::Bottom);
//! assert_eq!(frame.arrow.unwrap().top, Some(-4.0));
//! ```

use crate::arrow::{ArrowStyle, DEFAULT_ARROW_SIZE, arrow_offset, arrow_style};
use crate::floating::{Anchor, FloatingOptions, FloatingResolver, Strategy};
use crate::panel::PanelStyle;
use crate::placement::Placement;
use crate::portal::{Portal, PortalTarget};

/// Options for a [`Popper`].
#[derive(Clone, Debug, PartialEq)]
pub struct PopperConfig<N> {
    /// Requested placement.
    pub placement: Placement,
    /// Gap between reference and floating content, before the arrow allowance.
    pub offset: f64,
    /// `z-index` of the floating wrapper, if any.
    pub z_index: Option<i32>,
    /// Compute an arrow.
    pub arrow: bool,
    /// Arrow side length.
    pub arrow_size: f64,
    /// Where the content mounts.
    pub portal_container: PortalTarget<N>,
}

impl<N> Default for PopperConfig<N> {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            offset: 4.0,
            z_index: None,
            arrow: false,
            arrow_size: DEFAULT_ARROW_SIZE,
            portal_container: PortalTarget::Root,
        }
    }
}

impl<N> PopperConfig<N> {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested placement.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the gap.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the `z-index`.
    #[must_use]
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Enable or disable the arrow.
    #[must_use]
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Set the arrow side length.
    #[must_use]
    pub fn arrow_size(mut self, size: f64) -> Self {
        self.arrow_size = size;
        self
    }

    /// Mount into `container` instead of the root.
    #[must_use]
    pub fn portal_container(mut self, container: N) -> Self {
        self.portal_container = PortalTarget::Container(container);
        self
    }
}

/// Everything a render callback needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopperFrame {
    /// Resolved placement, or the requested one before resolution.
    pub placement: Placement,
    /// Style for the floating wrapper.
    pub floating: PanelStyle,
    /// Arrow insets, when the arrow is enabled.
    pub arrow: Option<ArrowStyle>,
}

/// Floating content anchored to a reference node.
#[derive(Debug)]
pub struct Popper<N> {
    config: PopperConfig<N>,
    anchor: Anchor<N>,
}

impl<N: Clone> Popper<N> {
    /// Create a popper with no nodes attached.
    pub fn new(config: PopperConfig<N>) -> Self {
        let options = FloatingOptions {
            placement: config.placement,
            strategy: Strategy::Absolute,
            offset: arrow_offset(config.offset, config.arrow.then_some(config.arrow_size)),
            arrow: config.arrow,
        };
        Self {
            config,
            anchor: Anchor::new(options),
        }
    }

    /// Options handed to the resolver.
    pub fn options(&self) -> &FloatingOptions {
        self.anchor.options()
    }

    /// Set or clear the reference node.
    pub fn set_reference(&mut self, node: Option<N>) {
        self.anchor.set_reference(node);
    }

    /// Set or clear the floating node.
    pub fn set_floating(&mut self, node: Option<N>) {
        self.anchor.set_floating(node);
    }

    /// Re-resolve against the attached nodes and return the new frame.
    pub fn update<R>(&mut self, resolver: &mut R) -> PopperFrame
    where
        R: FloatingResolver<N> + ?Sized,
    {
        self.anchor.sync(resolver);
        self.frame()
    }

    /// The frame for the last resolution, or the fallback frame.
    pub fn frame(&self) -> PopperFrame {
        let layout = self.anchor.layout();
        let placement = layout.map_or(self.config.placement, |l| l.placement);
        let mut floating = PanelStyle::new(self.config.z_index);
        if let Some(l) = layout {
            floating = floating.with_floating(l.styles);
        }
        let arrow = self
            .config
            .arrow
            .then(|| arrow_style(placement, layout.and_then(|l| l.arrow), self.config.arrow_size));
        PopperFrame {
            placement,
            floating,
            arrow,
        }
    }

    /// Close the resolver subscription.
    pub fn release<R>(&mut self, resolver: &mut R)
    where
        R: FloatingResolver<N> + ?Sized,
    {
        self.anchor.release(resolver);
    }

    /// Pair `content` with this popper's container.
    pub fn portal<T>(&self, content: T) -> Portal<N, T> {
        Portal::new(self.config.portal_container.clone(), content)
    }
}
