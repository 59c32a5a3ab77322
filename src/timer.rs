//! Periodic timers without an executor.
//!
//! The queue only stores deadlines; the owner polls it with the current time,
//! runs the callback for every due timer and re-arms or drops it depending on
//! the returned [`TimerAction`].

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Callback a timer runs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Level,
    Color,
    ColorLoop,
    Blink,
}

/// Result of a timer callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Fire again after the given interval
    Continue(Duration),
    /// Cancel the timer
    Stop,
}

/// Opaque handle of a scheduled timer
///
/// Handles are never reused, so cancelling one that already expired is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Every timer slot is in use
    QueueFull,
}

/// A timer that reached its deadline and was taken out of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired {
    pub handle: TimerHandle,
    pub event: TimerEvent,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: TimerHandle,
    event: TimerEvent,
    deadline: Instant,
}

/// Fixed capacity timer queue
pub struct TimerQueue<const SIZE: usize> {
    entries: Vec<Entry, SIZE>,
    next_id: u32,
}

impl<const SIZE: usize> TimerQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `event` to fire `interval` after `now`
    pub fn schedule(
        &mut self,
        event: TimerEvent,
        interval: Duration,
        now: Instant,
    ) -> Result<TimerHandle, TimerError> {
        let handle = TimerHandle(self.next_id);
        let entry = Entry {
            handle,
            event,
            deadline: now + min_interval(interval),
        };
        if self.entries.push(entry).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[TimerQueue.schedule] no free slot for {:?}", event);
            return Err(TimerError::QueueFull);
        }
        self.next_id = self.next_id.wrapping_add(1);
        Ok(handle)
    }

    /// Cancel a timer; returns `false` for expired or unknown handles
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.position(handle) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.position(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest deadline among the scheduled timers
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Take the earliest timer whose deadline is not after `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<Expired> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| entry.deadline)
            .map(|(index, _)| index)?;
        let entry = self.entries.swap_remove(index);
        Some(Expired {
            handle: entry.handle,
            event: entry.event,
            deadline: entry.deadline,
        })
    }

    /// Put an expired timer back with the same handle
    ///
    /// The next deadline keeps the cadence of the previous one. When the
    /// caller fell more than two intervals behind, the backlog is skipped and
    /// the timer restarts from `now`.
    pub fn rearm(
        &mut self,
        expired: Expired,
        interval: Duration,
        now: Instant,
    ) -> Result<(), TimerError> {
        let interval = min_interval(interval);
        let max_drift = interval * 2;
        let deadline = if now > expired.deadline + max_drift {
            now + interval
        } else {
            expired.deadline + interval
        };
        self.entries
            .push(Entry {
                handle: expired.handle,
                event: expired.event,
                deadline,
            })
            .map_err(|_| TimerError::QueueFull)
    }

    fn position(&self, handle: TimerHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.handle == handle)
    }
}

impl<const SIZE: usize> Default for TimerQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A zero interval would fire forever within one poll
fn min_interval(interval: Duration) -> Duration {
    interval.max(Duration::from_ticks(1))
}
