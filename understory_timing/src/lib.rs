// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI interactions are full of small delays: hover intent, tooltip show/hide,
//! long-press recognition, debounced search. This crate gives them a common
//! bookkeeping layer without tying it to any event loop.
//!
//! The core type is [`TimerQueue`], which stores pending timers by absolute
//! deadline and hands out [`TimerId`] handles that can cancel them. The queue
//! never reads a clock: every operation that depends on time takes `now` from
//! the caller. A runtime typically:
//!
//! 1) Schedules timers with [`TimerQueue::schedule_after`] while handling input.
//! 2) Asks [`TimerQueue::next_deadline`] when deciding how long to sleep.
//! 3) On wake-up, drains due timers with [`TimerQueue::pop_due`] or
//!    [`TimerQueue::drain_due`] and acts on their payloads.
//!
//! Tests drive the same API with a virtual clock, so "advance time by 299ms,
//! then by 1ms" is just two calls with different `now` values.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Debug, PartialEq)]
//! enum Intent {
//!     Show,
//!     Hide,
//! }
//!
//! let mut timers = TimerQueue::new();
//! let show = timers.schedule_after(0, 300, Intent::Show);
//!
//! // Pointer left before the delay elapsed: cancel and schedule the opposite.
//! timers.cancel(show);
//! timers.schedule_after(120, 200, Intent::Hide);
//!
//! assert!(timers.pop_due(319).is_none());
//! assert_eq!(timers.pop_due(320).map(|f| f.payload), Some(Intent::Hide));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{Fired, TimerId, TimerQueue};
