//! Cancellable one-shot timers on the engine timeline.
//!
//! Replaces ad-hoc chained callbacks: a controller schedules a payload describing
//! what should happen next, keeps the returned handle, and cancels it when a newer
//! operation makes it stale. Nothing runs on its own; the owner drains due payloads
//! with [`TimerQueue::pop_due`] whenever time advances.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer that came due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    /// When the timer was scheduled to fire (not when it was drained)
    pub deadline: Duration,
    pub payload: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    /// Keyed by (deadline, sequence) so equal deadlines fire in scheduling order
    entries: BTreeMap<(Duration, u64), T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to become due at `deadline`
    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((deadline, seq), payload);
        TimerHandle(seq)
    }

    /// Cancel a timer; returns its payload if it had not fired yet
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let key = self.entries.keys().find(|(_, seq)| *seq == handle.0).copied()?;
        self.entries.remove(&key)
    }

    /// Cancel the timer held in `slot`, leaving `None` behind
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerHandle>) {
        if let Some(handle) = slot.take() {
            self.cancel(handle);
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.keys().any(|(_, seq)| *seq == handle.0)
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_next_due(&mut self, now: Duration) -> Option<Fired<T>> {
        let (deadline, seq) = *self.entries.keys().next()?;
        if deadline > now {
            return None;
        }
        self.entries.remove(&(deadline, seq)).map(|payload| Fired {
            handle: TimerHandle(seq),
            deadline,
            payload,
        })
    }

    /// Remove and return every timer due at or before `now`, earliest first
    pub fn pop_due(&mut self, now: Duration) -> Vec<Fired<T>> {
        let mut due = Vec::new();
        while let Some(entry) = self.pop_next_due(now) {
            due.push(entry);
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
