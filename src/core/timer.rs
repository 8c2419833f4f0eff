//! Cancellable timers.
//!
//! The session never owns a clock. It asks a [`Scheduler`] for timers and
//! gets a [`TimerHandle`] back; when the timer is due the scene feeds the
//! handle back in as an event. [`TimerWheel`] is the scheduler used by the
//! scene and by tests, driven by an explicit simulated clock.

use std::time::Duration;

/// Identifies one scheduled timer. Handles are never reused within a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to start and stop deferred callbacks.
pub trait Scheduler {
    /// Schedule a timer that first fires after `delay`. A repeating timer
    /// then fires every `delay` until cancelled.
    fn schedule(&mut self, delay: Duration, repeating: bool) -> TimerHandle;

    /// Stop a timer. Cancelling an unknown or finished timer does nothing.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    deadline: Duration,
    interval: Option<Duration>,
}

/// Simulated-clock scheduler.
///
/// Time only moves through [`TimerWheel::advance`] followed by draining
/// [`TimerWheel::pop_due`]. Due timers come out one at a time in deadline
/// order (ties in scheduling order), so whatever the caller does in response
/// to one firing, including cancelling other timers, is seen by the next.
#[derive(Debug, Clone, Default)]
pub struct TimerWheel {
    now: Duration,
    target: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Move the clock target forward by `dt`. Drain [`Self::pop_due`] to fire
    /// everything due up to the new target.
    pub fn advance(&mut self, dt: Duration) {
        self.target = self.target.max(self.now) + dt;
    }

    /// Fire the earliest timer due at or before the current target.
    ///
    /// Returns `None` once nothing else is due, leaving the clock at the target.
    pub fn pop_due(&mut self) -> Option<TimerHandle> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= self.target)
            .min_by_key(|(_, e)| (e.deadline, e.handle))
            .map(|(i, _)| i);

        let Some(idx) = idx else {
            self.now = self.target;
            return None;
        };

        let entry = &mut self.entries[idx];
        self.now = entry.deadline;
        let handle = entry.handle;
        match entry.interval {
            Some(interval) => entry.deadline += interval,
            None => {
                self.entries.remove(idx);
            }
        }
        Some(handle)
    }

    /// Advance by `dt` and collect every firing in order.
    ///
    /// Convenience for tests that do not cancel timers in response to a
    /// firing.
    #[cfg(test)]
    pub fn advance_and_collect(&mut self, dt: Duration) -> Vec<TimerHandle> {
        self.advance(dt);
        let mut fired = Vec::new();
        while let Some(handle) = self.pop_due() {
            fired.push(handle);
        }
        fired
    }
}

impl Scheduler for TimerWheel {
    fn schedule(&mut self, delay: Duration, repeating: bool) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        // A zero-length repeating timer would fire forever within one advance
        let interval = repeating.then_some(delay.max(Duration::from_millis(1)));
        self.entries.push(Entry {
            handle,
            deadline: self.now + delay,
            interval,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }
}
