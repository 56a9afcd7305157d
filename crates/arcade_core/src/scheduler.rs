//! Cancellable deferred actions on a logical clock.
//!
//! The scheduler never sleeps. Its owner tells it how much time passed and
//! pulls out the actions that fell due, one at a time and in due order, so
//! an action that reschedules itself is measured from its own due instant.

use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument, trace, warn};

/// Handle returned by [`Scheduler::schedule`], used to cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Queue of actions waiting for their due time.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TaskHandle), A>,
}

impl<A: std::fmt::Debug> Scheduler<A> {
    /// Creates an empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedules `action` to fall due `delay` from now.
    ///
    /// A task due beyond the end of the clock can never fire and is not queued.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, delay: Duration, action: A) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let Some(due) = self.now.checked_add(delay) else {
            warn!(?handle, ?action, "Clock exhausted, task dropped");
            return handle;
        };
        trace!(?handle, ?due, "Task scheduled");
        self.queue.insert((due, handle), action);
        handle
    }

    /// Cancels a task. Returns false if it already fired or was cancelled.
    #[instrument(skip(self))]
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let key = self.queue.keys().find(|(_, h)| *h == handle).copied();
        match key.and_then(|k| self.queue.remove(&k)) {
            Some(action) => {
                debug!(?action, "Task cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancels every waiting task, returning how many there were.
    #[instrument(skip(self))]
    pub fn cancel_all(&mut self) -> usize {
        let count = self.queue.len();
        self.queue.clear();
        if count > 0 {
            debug!(count, "Cancelled outstanding tasks");
        }
        count
    }

    /// Removes and returns the earliest action due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<A> {
        let entry = self.queue.first_entry()?;
        let (due, _) = *entry.key();
        if due > until {
            return None;
        }
        let action = entry.remove();
        self.now = self.now.max(due);
        Some(action)
    }

    /// Moves the clock forward to `until`. The clock never runs backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<A: std::fmt::Debug> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
