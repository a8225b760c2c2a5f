// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tooltip --heading-base-level=0

//! Understory Tooltip: a headless tooltip/popover primitive.
//!
//! A tooltip attaches a floating panel to a trigger. This crate owns the
//! parts that are the same in every host:
//!
//! - [`controller`]: when the panel is open. Hover uses open/close delays,
//!   focus and blur act immediately, Escape dismisses, and hovering the panel
//!   itself keeps it open. Controlled mode leaves the flag with the owner.
//! - [`trigger`]: turning whatever the caller renders into one focusable
//!   element that is described by the panel and forwards its events.
//! - [`arrow`]: where the arrow glyph goes for a resolved placement.
//! - [`escape`]: exactly one keydown listener per open tooltip.
//! - [`panel`] and [`portal`]: what to mount, and where.
//!
//! Collision-aware positioning is delegated to a host
//! [`floating::FloatingResolver`]; [`popper`] exposes that positioning on its
//! own for content that needs no open-state logic.
//!
//! Time is a `u64` millisecond clock supplied by the host. Delays schedule
//! deadlines on an [`understory_timing::TimerQueue`]; the host calls
//! [`Tooltip::advance`] once [`Tooltip::next_deadline`] has passed.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_tooltip::{Content, Tooltip, TooltipConfig};
//! use understory_tooltip::escape::KeydownHub;
//! use understory_tooltip::trigger::{Element, TriggerEvent};
//! use ui_events::keyboard::{Key, NamedKey};
//!
//! let keyboard = KeydownHub::new();
//! let tooltip: Tooltip<u32, ()> = Tooltip::new(
//!     TooltipConfig::new().delays(500, 400),
//!     Content::from("Delete this item"),
//!     &keyboard,
//! );
//!
//! let mut button = tooltip.trigger(Element::new("button"));
//! button.attach(1);
//!
//! button.dispatch(TriggerEvent::PointerEnter, 0);
//! tooltip.advance(499);
//! assert!(!tooltip.is_open());
//! tooltip.advance(500);
//! assert!(tooltip.is_open());
//!
//! keyboard.dispatch_key(&Key::Named(NamedKey::Escape), 600);
//! assert!(!tooltip.is_open());
//! assert!(keyboard.is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: `no_std` float math for `kurbo`.
//! - `tracing`: `debug` events for open-state changes, timers and listener
//!   registration.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod arrow;
pub mod config;
pub mod controller;
pub mod escape;
pub mod floating;
pub mod panel;
pub mod placement;
pub mod popper;
pub mod portal;
pub mod trigger;

mod id;
mod tooltip;

pub use config::TooltipConfig;
pub use id::TooltipId;
pub use panel::Content;
pub use tooltip::Tooltip;
