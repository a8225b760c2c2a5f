// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip configuration.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::arrow::{DEFAULT_ARROW_SIZE, arrow_offset};
use crate::controller::{ControlledOpen, Delays};
use crate::floating::{FloatingOptions, Strategy};
use crate::placement::Placement;
use crate::portal::PortalTarget;

/// Panel `z-index` used when none, or zero, is configured.
pub const DEFAULT_Z_INDEX: i32 = 50;

/// Callback receiving every requested open-state change.
pub type OpenChangeCallback = Box<dyn FnMut(bool)>;

/// Options for a [`Tooltip`](crate::Tooltip).
///
/// ```
/// use understory_tooltip::TooltipConfig;
/// use understory_tooltip::placement::Placement;
///
/// let config = TooltipConfig::<u32>::new()
///     .placement(Placement::RightStart)
///     .delays(0, 150)
///     .arrow(true);
/// assert_eq!(config.offset, 4.0);
/// assert_eq!(config.open_delay, 0);
/// assert!(config.floating_options().offset > 4.0);
/// ```
pub struct TooltipConfig<N> {
    /// Requested placement.
    pub placement: Placement,
    /// Gap between trigger and panel, in pixels, before the arrow allowance.
    pub offset: f64,
    /// Panel `z-index`. Zero means [`DEFAULT_Z_INDEX`].
    pub z_index: i32,
    /// Owner-held open flag; `None` for uncontrolled.
    pub open: Option<ControlledOpen>,
    /// Hover-open delay in milliseconds.
    pub open_delay: u64,
    /// Pointer-leave close delay in milliseconds.
    pub close_delay: u64,
    /// Ignore pointer movement over the panel.
    pub disable_interactive: bool,
    /// Open-change notifications.
    pub on_open_change: Option<OpenChangeCallback>,
    /// Where the panel mounts.
    pub portal_container: PortalTarget<N>,
    /// Render an arrow.
    pub arrow: bool,
    /// Arrow side length in pixels.
    pub arrow_size: f64,
    /// Extra class for the panel body.
    pub class_name: String,
    /// Extra class for the arrow.
    pub arrow_class_name: String,
    /// Extra attributes for the panel body.
    pub attributes: Vec<(String, String)>,
}

impl<N> Default for TooltipConfig<N> {
    fn default() -> Self {
        Self {
            placement: Placement::Top,
            offset: 4.0,
            z_index: DEFAULT_Z_INDEX,
            open: None,
            open_delay: 300,
            close_delay: 200,
            disable_interactive: false,
            on_open_change: None,
            portal_container: PortalTarget::Root,
            arrow: false,
            arrow_size: DEFAULT_ARROW_SIZE,
            class_name: String::new(),
            arrow_class_name: String::new(),
            attributes: Vec::new(),
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for TooltipConfig<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipConfig")
            .field("placement", &self.placement)
            .field("offset", &self.offset)
            .field("z_index", &self.z_index)
            .field("open", &self.open)
            .field("open_delay", &self.open_delay)
            .field("close_delay", &self.close_delay)
            .field("disable_interactive", &self.disable_interactive)
            .field("on_open_change", &self.on_open_change.is_some())
            .field("portal_container", &self.portal_container)
            .field("arrow", &self.arrow)
            .field("arrow_size", &self.arrow_size)
            .field("class_name", &self.class_name)
            .field("arrow_class_name", &self.arrow_class_name)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl<N> TooltipConfig<N> {
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

    /// Set the trigger/panel gap.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the panel `z-index`. Zero selects [`DEFAULT_Z_INDEX`].
    #[must_use]
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Use controlled mode with `open` as the source of truth.
    #[must_use]
    pub fn controlled(mut self, open: ControlledOpen) -> Self {
        self.open = Some(open);
        self
    }

    /// Set both hover delays.
    #[must_use]
    pub fn delays(mut self, open: u64, close: u64) -> Self {
        self.open_delay = open;
        self.close_delay = close;
        self
    }

    /// Ignore pointer movement over the panel.
    #[must_use]
    pub fn disable_interactive(mut self, disable: bool) -> Self {
        self.disable_interactive = disable;
        self
    }

    /// Receive open-change notifications.
    #[must_use]
    pub fn on_open_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(callback));
        self
    }

    /// Mount the panel into `container` instead of the root.
    #[must_use]
    pub fn portal_container(mut self, container: N) -> Self {
        self.portal_container = PortalTarget::Container(container);
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

    /// Extra class for the panel body.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Extra class for the arrow.
    #[must_use]
    pub fn arrow_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.arrow_class_name = class_name.into();
        self
    }

    /// Add a panel attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Hover delays as a [`Delays`].
    pub fn hover_delays(&self) -> Delays {
        Delays {
            open: self.open_delay,
            close: self.close_delay,
        }
    }

    /// Options for the floating resolver.
    pub fn floating_options(&self) -> FloatingOptions {
        FloatingOptions {
            placement: self.placement,
            strategy: Strategy::Absolute,
            offset: arrow_offset(self.offset, self.arrow.then_some(self.arrow_size)),
            arrow: self.arrow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = TooltipConfig::<u32>::default();
        assert_eq!(c.placement, Placement::Top);
        assert_eq!(c.offset, 4.0);
        assert_eq!(c.z_index, 50);
        assert!(c.open.is_none());
        assert_eq!(c.hover_delays(), Delays { open: 300, close: 200 });
        assert!(!c.disable_interactive);
        assert_eq!(c.portal_container, PortalTarget::Root);
        assert!(!c.arrow);
        assert_eq!(c.arrow_size, 8.0);
        assert!(c.class_name.is_empty());
    }

    #[test]
    fn floating_offset_includes_arrow_only_when_enabled() {
        let plain = TooltipConfig::<u32>::new().arrow_size(10.0);
        assert_eq!(plain.floating_options().offset, 4.0);
        assert!(!plain.floating_options().arrow);

        let with_arrow = plain.arrow(true);
        let opts = with_arrow.floating_options();
        assert!(opts.arrow);
        assert_eq!(opts.offset, arrow_offset(4.0, Some(10.0)));
        assert_eq!(opts.placement, Placement::Top);
    }
}
