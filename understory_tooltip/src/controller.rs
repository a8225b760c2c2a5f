// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open-state controller: delays, cancellation and controlled mode.
//!
//! [`OpenStateController`] turns [`Interaction`]s into open/close decisions.
//! It owns its pending timers and reports every change of the effective open
//! state as `Some(new_state)`; the caller forwards that to its
//! open-change callback.
//!
//! Time is an opaque `u64` millisecond clock supplied by the host. Delayed
//! requests schedule a deadline; the host calls
//! [`OpenStateController::advance`] when [`OpenStateController::next_deadline`]
//! has passed.
//!
//! ```
//! use understory_tooltip::controller::{Delays, Interaction, OpenMode, OpenStateController};
//!
//! let mut c = OpenStateController::new(OpenMode::default(), Delays { open: 500, close: 100 });
//!
//! assert_eq!(c.handle(Interaction::TriggerPointerEnter, 0), None);
//! assert_eq!(c.next_deadline(), Some(500));
//! assert_eq!(c.advance(499), None);
//! assert_eq!(c.advance(500), Some(true));
//! assert!(c.is_open());
//!
//! // Focus and blur act immediately.
//! assert_eq!(c.handle(Interaction::TriggerBlur, 600), Some(false));
//! assert_eq!(c.handle(Interaction::TriggerFocus, 700), Some(true));
//! ```
//!
//! ## Controlled mode
//!
//! With [`OpenMode::Controlled`] the effective state is whatever the owner
//! keeps in its [`ControlledOpen`] cell. The controller never writes it; it
//! only reports the change it would like to see.

use alloc::rc::Rc;
use core::cell::Cell;

use understory_timing::{TimerId, TimerQueue};

/// Owner-held open flag for controlled mode.
///
/// Clones share the same cell.
#[derive(Clone, Debug, Default)]
pub struct ControlledOpen(Rc<Cell<bool>>);

impl ControlledOpen {
    /// Create a flag with an initial value.
    pub fn new(open: bool) -> Self {
        Self(Rc::new(Cell::new(open)))
    }

    /// Current value.
    pub fn get(&self) -> bool {
        self.0.get()
    }

    /// Overwrite the value.
    pub fn set(&self, open: bool) {
        self.0.set(open);
    }
}

/// Who owns the open state.
#[derive(Clone, Debug)]
pub enum OpenMode {
    /// The controller keeps its own flag.
    Uncontrolled {
        /// Initial value.
        open: bool,
    },
    /// The owner keeps the flag; the controller only reads it.
    Controlled(ControlledOpen),
}

impl Default for OpenMode {
    fn default() -> Self {
        Self::Uncontrolled { open: false }
    }
}

impl From<Option<ControlledOpen>> for OpenMode {
    fn from(open: Option<ControlledOpen>) -> Self {
        open.map_or_else(Self::default, Self::Controlled)
    }
}

/// Hover delays in milliseconds. Zero means immediate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Delays {
    /// Delay before a hover opens.
    pub open: u64,
    /// Delay before a pointer leave closes.
    pub close: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            open: 300,
            close: 200,
        }
    }
}

/// Input events the controller understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Pointer entered the trigger.
    TriggerPointerEnter,
    /// Pointer left the trigger.
    TriggerPointerLeave,
    /// Trigger gained focus.
    TriggerFocus,
    /// Trigger lost focus.
    TriggerBlur,
    /// Escape was pressed.
    Escape,
    /// Pointer entered the panel.
    PanelPointerEnter,
    /// Pointer left the panel.
    PanelPointerLeave,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimerKind {
    Open,
    Close,
}

/// Open/close state machine with delayed transitions.
#[derive(Debug)]
pub struct OpenStateController {
    mode: OpenMode,
    interactive: bool,
    delays: Delays,
    timers: TimerQueue<TimerKind>,
    open_timer: Option<TimerId>,
    close_timer: Option<TimerId>,
    torn_down: bool,
}

impl OpenStateController {
    /// Create an interactive controller.
    pub fn new(mode: OpenMode, delays: Delays) -> Self {
        Self {
            mode,
            interactive: true,
            delays,
            timers: TimerQueue::new(),
            open_timer: None,
            close_timer: None,
            torn_down: false,
        }
    }

    /// Enable or disable panel hover handling.
    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Effective open state.
    pub fn is_open(&self) -> bool {
        match &self.mode {
            OpenMode::Uncontrolled { open } => *open,
            OpenMode::Controlled(handle) => handle.get(),
        }
    }

    /// Returns `true` in controlled mode.
    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, OpenMode::Controlled(_))
    }

    /// Whether panel hover keeps the panel open.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Configured delays.
    pub fn delays(&self) -> Delays {
        self.delays
    }

    /// Change the delays. Timers already pending keep their deadlines.
    pub fn set_delays(&mut self, delays: Delays) {
        self.delays = delays;
    }

    /// Deadline of the pending delayed open, if any.
    pub fn pending_open(&self) -> Option<u64> {
        self.open_timer.and_then(|id| self.timers.deadline(id))
    }

    /// Deadline of the pending delayed close, if any.
    pub fn pending_close(&self) -> Option<u64> {
        self.close_timer.and_then(|id| self.timers.deadline(id))
    }

    /// Earliest pending deadline; the host should call [`Self::advance`] then.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Returns `true` after [`Self::teardown`].
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Ask for the panel to open, after the open delay if `use_delay`.
    ///
    /// Always cancels a pending close first.
    pub fn request_open(&mut self, use_delay: bool, now: u64) -> Option<bool> {
        if self.torn_down {
            return None;
        }
        self.cancel(TimerKind::Close);
        if self.is_open() {
            return None;
        }
        if use_delay && self.delays.open > 0 {
            if self.open_timer.is_none() {
                let id = self.timers.schedule_after(now, self.delays.open, TimerKind::Open);
                #[cfg(feature = "tracing")]
                tracing::debug!(timer = id.get(), deadline = now.saturating_add(self.delays.open), "open scheduled");
                self.open_timer = Some(id);
            }
            return None;
        }
        self.cancel(TimerKind::Open);
        self.apply(true)
    }

    /// Ask for the panel to close, after the close delay if `use_delay`.
    ///
    /// Always cancels a pending open first.
    pub fn request_close(&mut self, use_delay: bool, now: u64) -> Option<bool> {
        if self.torn_down {
            return None;
        }
        self.cancel(TimerKind::Open);
        if !self.is_open() {
            return None;
        }
        if use_delay && self.delays.close > 0 {
            if self.close_timer.is_none() {
                let id = self.timers.schedule_after(now, self.delays.close, TimerKind::Close);
                #[cfg(feature = "tracing")]
                tracing::debug!(timer = id.get(), deadline = now.saturating_add(self.delays.close), "close scheduled");
                self.close_timer = Some(id);
            }
            return None;
        }
        self.cancel(TimerKind::Close);
        self.apply(false)
    }

    /// Apply the fixed intent for `interaction`.
    pub fn handle(&mut self, interaction: Interaction, now: u64) -> Option<bool> {
        match interaction {
            Interaction::TriggerPointerEnter => self.request_open(true, now),
            Interaction::TriggerPointerLeave => self.request_close(true, now),
            Interaction::TriggerFocus => self.request_open(false, now),
            Interaction::TriggerBlur => self.request_close(false, now),
            Interaction::Escape if self.is_open() => self.request_close(false, now),
            Interaction::Escape => None,
            Interaction::PanelPointerEnter if self.interactive => self.request_open(false, now),
            Interaction::PanelPointerLeave if self.interactive => self.request_close(true, now),
            Interaction::PanelPointerEnter | Interaction::PanelPointerLeave => None,
        }
    }

    /// Fire every timer due at `now`.
    ///
    /// At most one timer is pending at any time, so at most one change is
    /// reported.
    pub fn advance(&mut self, now: u64) -> Option<bool> {
        if self.torn_down {
            return None;
        }
        let mut change = None;
        while let Some(fired) = self.timers.pop_due(now) {
            let slot = match fired.payload {
                TimerKind::Open => &mut self.open_timer,
                TimerKind::Close => &mut self.close_timer,
            };
            if *slot != Some(fired.id) {
                continue;
            }
            *slot = None;
            let open = fired.payload == TimerKind::Open;
            #[cfg(feature = "tracing")]
            tracing::debug!(timer = fired.id.get(), open, "timer fired");
            if let Some(c) = self.apply(open) {
                change = Some(c);
            }
        }
        change
    }

    /// Cancel both timers and stop reacting to requests.
    pub fn teardown(&mut self) {
        self.open_timer = None;
        self.close_timer = None;
        self.timers.clear();
        self.torn_down = true;
    }

    fn cancel(&mut self, kind: TimerKind) {
        let slot = match kind {
            TimerKind::Open => &mut self.open_timer,
            TimerKind::Close => &mut self.close_timer,
        };
        if let Some(id) = slot.take() {
            self.timers.cancel(id);
            #[cfg(feature = "tracing")]
            tracing::debug!(timer = id.get(), ?kind, "timer cancelled");
        }
    }

    fn apply(&mut self, open: bool) -> Option<bool> {
        if self.is_open() == open {
            return None;
        }
        if let OpenMode::Uncontrolled { open: state } = &mut self.mode {
            *state = open;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(open, controlled = self.is_controlled(), "open state change");
        Some(open)
    }
}
