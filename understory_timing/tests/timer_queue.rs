// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_timing` crate.
//!
//! These drive a [`TimerQueue`] with a virtual clock the way an event loop
//! would: schedule while handling input, sleep until the next deadline, then
//! drain what came due.

use understory_timing::TimerQueue;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Open,
    Close,
}

#[test]
fn event_loop_sleeps_until_next_deadline() {
    let mut timers = TimerQueue::new();
    timers.schedule_after(0, 500, Kind::Open);

    let mut now = 0;
    let mut fired = Vec::new();
    while let Some(deadline) = timers.next_deadline() {
        now = deadline;
        fired.extend(timers.drain_due(now).into_iter().map(|f| f.payload));
        if fired.len() == 1 {
            timers.schedule_after(now, 400, Kind::Close);
        }
    }

    assert_eq!(now, 900);
    assert_eq!(fired, [Kind::Open, Kind::Close]);
}

#[test]
fn replacing_a_timer_leaves_one_pending() {
    let mut timers = TimerQueue::new();
    let open = timers.schedule_after(0, 300, Kind::Open);

    // Opposite intent arrives: cancel first, then schedule.
    assert_eq!(timers.cancel(open), Some(Kind::Open));
    let close = timers.schedule_after(100, 200, Kind::Close);

    assert_eq!(timers.len(), 1);
    assert_eq!(timers.deadline(close), Some(300));
    let fired = timers.drain_due(1_000);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].id, close);
    assert_eq!(fired[0].payload, Kind::Close);
}

#[test]
fn clear_drops_everything() {
    let mut timers = TimerQueue::new();
    let a = timers.schedule_after(0, 10, Kind::Open);
    let b = timers.schedule_after(0, 20, Kind::Close);
    timers.clear();

    assert!(timers.is_empty());
    assert!(!timers.contains(a));
    assert!(!timers.contains(b));
    assert!(timers.drain_due(u64::MAX).is_empty());
}

#[test]
fn zero_delay_is_due_immediately() {
    let mut timers = TimerQueue::new();
    timers.schedule_after(42, 0, Kind::Open);
    assert_eq!(timers.pop_due(42).map(|f| f.payload), Some(Kind::Open));
}
