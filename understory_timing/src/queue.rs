// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer queue: deadline-ordered pending timers with cancelable handles.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

/// Opaque handle to a scheduled timer.
///
/// Handles are allocated from a per-queue counter and are never reused, so a
/// stale handle can never alias a newer timer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw sequence number of this handle.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimerId").field(&self.0).finish()
    }
}

/// A timer that came due during [`TimerQueue::pop_due`] or [`TimerQueue::drain_due`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle the timer was scheduled under.
    pub id: TimerId,
    /// The deadline it was scheduled for.
    pub deadline: u64,
    /// Payload supplied at scheduling time.
    pub payload: T,
}

/// A queue of pending timers keyed by absolute deadline.
///
/// Time is whatever monotonic unit the host uses (typically milliseconds).
/// The queue never reads a clock itself: callers pass `now` explicitly, which
/// keeps tests deterministic and lets the host pick its own wake-up strategy
/// from [`TimerQueue::next_deadline`].
///
/// Timers with equal deadlines fire in scheduling order.
///
/// ```
/// use understory_timing::TimerQueue;
///
/// let mut timers = TimerQueue::new();
/// let a = timers.schedule_after(0, 300, "open");
/// let _b = timers.schedule_after(0, 200, "close");
///
/// assert_eq!(timers.next_deadline(), Some(200));
/// assert_eq!(timers.cancel(a), Some("open"));
///
/// let fired: Vec<_> = timers.drain_due(250).into_iter().map(|f| f.payload).collect();
/// assert_eq!(fired, ["close"]);
/// assert!(timers.is_empty());
/// ```
pub struct TimerQueue<T> {
    next_id: u64,
    by_deadline: BTreeMap<(u64, TimerId), T>,
    deadlines: HashMap<TimerId, u64>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("next_id", &self.next_id)
            .field("pending", &self.by_deadline.len())
            .field("next_deadline", &self.next_deadline())
            .finish_non_exhaustive()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            by_deadline: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.by_deadline.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.by_deadline.is_empty()
    }

    /// Schedule `payload` to fire at the absolute `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.by_deadline.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Schedule `payload` to fire `delay` units after `now`.
    ///
    /// The deadline saturates at `u64::MAX` instead of wrapping.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule(now.saturating_add(delay), payload)
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Canceling a timer that already fired, was already canceled, or belongs
    /// to another queue returns `None`.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.by_deadline.remove(&(deadline, id))
    }

    /// Returns `true` if `id` is still pending.
    pub fn contains(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of a pending timer.
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        self.deadlines.get(&id).copied()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.by_deadline.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Fired<T>> {
        let &(deadline, id) = self.by_deadline.keys().next()?;
        if deadline > now {
            return None;
        }
        let payload = self.by_deadline.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        Some(Fired {
            id,
            deadline,
            payload,
        })
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: u64) -> Vec<Fired<T>> {
        let mut out = Vec::new();
        while let Some(fired) = self.pop_due(now) {
            out.push(fired);
        }
        out
    }

    /// Cancel every pending timer.
    ///
    /// The id counter is not reset, so handles issued before the clear stay
    /// dead.
    pub fn clear(&mut self) {
        self.by_deadline.clear();
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_queue_is_empty() {
        let q: TimerQueue<()> = TimerQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule_after(10, 5, 'a');
        assert!(q.pop_due(14).is_none());
        assert_eq!(q.pop_due(15).map(|f| f.payload), Some('a'));
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(100, 1);
        q.schedule(100, 2);
        q.schedule(50, 0);
        let order: Vec<_> = q.drain_due(100).into_iter().map(|f| f.payload).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut q = TimerQueue::new();
        let id = q.schedule(5, "x");
        assert!(q.contains(id));
        assert_eq!(q.cancel(id), Some("x"));
        assert!(!q.contains(id));
        assert!(q.drain_due(u64::MAX).is_empty());
    }

    #[test]
    fn cancel_after_fire_is_none() {
        let mut q = TimerQueue::new();
        let id = q.schedule(5, ());
        assert_eq!(q.pop_due(5).map(|f| f.id), Some(id));
        assert_eq!(q.cancel(id), None);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut q = TimerQueue::new();
        let a = q.schedule(1, ());
        q.clear();
        let b = q.schedule(1, ());
        assert_ne!(a, b);
        assert!(!q.contains(a));
        assert_eq!(q.cancel(a), None);
        assert!(q.contains(b));
    }

    #[test]
    fn schedule_after_saturates() {
        let mut q = TimerQueue::new();
        let id = q.schedule_after(u64::MAX - 1, 10, ());
        assert_eq!(q.deadline(id), Some(u64::MAX));
    }

    #[test]
    fn fired_reports_deadline() {
        let mut q = TimerQueue::new();
        q.schedule_after(100, 20, ());
        let fired = q.pop_due(500).unwrap();
        assert_eq!(fired.deadline, 120);
    }
}
