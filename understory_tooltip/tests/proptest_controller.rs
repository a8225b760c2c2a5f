// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the open-state controller and arrow geometry.

use proptest::prelude::*;
use understory_tooltip::arrow::arrow_style;
use understory_tooltip::controller::{
    ControlledOpen, Delays, Interaction, OpenMode, OpenStateController,
};
use understory_tooltip::placement::Placement;

fn interaction_strategy() -> impl Strategy<Value = Interaction> {
    prop_oneof![
        Just(Interaction::TriggerPointerEnter),
        Just(Interaction::TriggerPointerLeave),
        Just(Interaction::TriggerFocus),
        Just(Interaction::TriggerBlur),
        Just(Interaction::Escape),
        Just(Interaction::PanelPointerEnter),
        Just(Interaction::PanelPointerLeave),
    ]
}

/// A step is an interaction followed by letting `gap` ms pass.
fn steps_strategy() -> impl Strategy<Value = Vec<(Interaction, u64)>> {
    prop::collection::vec((interaction_strategy(), 0_u64..600), 0..64)
}

fn controller(open: u64, close: u64) -> OpenStateController {
    OpenStateController::new(OpenMode::default(), Delays { open, close })
}

proptest! {
    #[test]
    fn open_fires_exactly_at_delay(delay in 1_u64..10_000, start in 0_u64..1_000_000) {
        let mut c = controller(delay, 200);
        prop_assert_eq!(c.request_open(true, start), None);
        prop_assert_eq!(c.advance(start + delay - 1), None);
        prop_assert!(!c.is_open());
        prop_assert_eq!(c.advance(start + delay), Some(true));
        prop_assert!(c.is_open());
    }

    #[test]
    fn close_before_open_fires_cancels(delay in 1_u64..10_000, before in 0_u64..10_000, later in 0_u64..100_000) {
        let before = before % delay;
        let mut c = controller(delay, 200);
        c.request_open(true, 0);
        prop_assert_eq!(c.request_close(true, before), None);
        prop_assert_eq!(c.advance(delay + later), None);
        prop_assert!(!c.is_open());
        prop_assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn changes_alternate_and_match_state(
        open in 0_u64..500,
        close in 0_u64..500,
        interactive in any::<bool>(),
        steps in steps_strategy(),
    ) {
        let mut c = controller(open, close).with_interactive(interactive);
        let mut now = 0_u64;
        let mut last = false;
        for (interaction, gap) in steps {
            if let Some(change) = c.handle(interaction, now) {
                prop_assert_ne!(change, last);
                last = change;
            }
            prop_assert_eq!(c.is_open(), last);
            prop_assert!(c.pending_open().is_none() || c.pending_close().is_none());

            now += gap;
            if let Some(change) = c.advance(now) {
                prop_assert_ne!(change, last);
                last = change;
            }
            prop_assert_eq!(c.is_open(), last);
        }
    }

    #[test]
    fn controlled_flag_is_never_written(initial in any::<bool>(), steps in steps_strategy()) {
        let flag = ControlledOpen::new(initial);
        let mut c = OpenStateController::new(OpenMode::Controlled(flag.clone()), Delays::default());
        let mut now = 0_u64;
        for (interaction, gap) in steps {
            if let Some(change) = c.handle(interaction, now) {
                prop_assert_ne!(change, initial);
            }
            now += gap;
            c.advance(now);
            prop_assert_eq!(flag.get(), initial);
        }
    }

    #[test]
    fn closing_closed_is_silent(close in 0_u64..1_000, use_delay in any::<bool>(), now in 0_u64..1_000_000) {
        let mut c = controller(300, close);
        prop_assert_eq!(c.request_close(use_delay, now), None);
        prop_assert_eq!(c.advance(now + close + 1), None);
    }

    #[test]
    fn escape_closes_immediately(close in 0_u64..100_000, now in 0_u64..1_000_000) {
        let mut c = controller(300, close);
        c.request_open(false, now);
        prop_assert_eq!(c.handle(Interaction::Escape, now), Some(false));
        prop_assert!(!c.is_open());
    }

    #[test]
    fn teardown_silences_pending_timers(steps in steps_strategy(), after in 0_u64..100_000) {
        let mut c = controller(300, 200);
        let mut now = 0_u64;
        for (interaction, gap) in steps {
            c.handle(interaction, now);
            now += gap;
        }
        c.teardown();
        prop_assert_eq!(c.advance(now + after), None);
        prop_assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn top_arrow_hangs_off_bottom(size in 0.0_f64..1_000.0) {
        let style = arrow_style(Placement::Top, None, size);
        prop_assert_eq!(style.bottom, Some(if size == 0.0 { 0.0 } else { -size / 2.0 }));
        prop_assert_eq!(style.top, None);
    }
}
