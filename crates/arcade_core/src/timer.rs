//! Elapsed-seconds round timer driven by a repeating deferred tick.

use crate::scheduler::{Scheduler, TaskHandle};
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, instrument};

/// Tick period.
pub const TICK: Duration = Duration::from_secs(1);

/// Counts whole seconds while a round runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct RoundTimer {
    /// Seconds counted so far.
    elapsed_seconds: u64,
    /// Whether ticks are being counted.
    running: bool,
    #[getter(skip)]
    tick: Option<TaskHandle>,
}

impl RoundTimer {
    /// Creates a stopped timer at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to zero and starts ticking. Any previous tick is cancelled.
    #[instrument(skip(self, scheduler))]
    pub fn start<A: std::fmt::Debug>(&mut self, scheduler: &mut Scheduler<A>, tick: A) {
        self.cancel_tick(scheduler);
        self.elapsed_seconds = 0;
        self.running = true;
        self.tick = Some(scheduler.schedule(TICK, tick));
        debug!("Timer started");
    }

    /// Handles a fired tick: counts a second and schedules the next one.
    ///
    /// Returns false (and counts nothing) if the timer was stopped.
    pub fn on_tick<A: std::fmt::Debug>(&mut self, scheduler: &mut Scheduler<A>, next: A) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_seconds += 1;
        self.tick = Some(scheduler.schedule(TICK, next));
        true
    }

    /// Stops counting, keeping the elapsed value.
    #[instrument(skip(self, scheduler), fields(elapsed = self.elapsed_seconds))]
    pub fn stop<A: std::fmt::Debug>(&mut self, scheduler: &mut Scheduler<A>) {
        self.cancel_tick(scheduler);
        self.running = false;
        debug!("Timer stopped");
    }

    fn cancel_tick<A: std::fmt::Debug>(&mut self, scheduler: &mut Scheduler<A>) {
        if let Some(handle) = self.tick.take() {
            scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(timer: &mut RoundTimer, s: &mut Scheduler<()>, secs: u64) {
        let until = s.now() + Duration::from_secs(secs);
        while s.pop_due(until).is_some() {
            timer.on_tick(s, ());
        }
        s.advance_to(until);
    }

    #[test]
    fn test_counts_whole_seconds() {
        let mut s = Scheduler::new();
        let mut timer = RoundTimer::new();
        timer.start(&mut s, ());
        run(&mut timer, &mut s, 3);
        assert_eq!(*timer.elapsed_seconds(), 3);
        s.advance_to(s.now() + Duration::from_millis(900));
        assert_eq!(*timer.elapsed_seconds(), 3);
    }

    #[test]
    fn test_stop_keeps_value_and_cancels_tick() {
        let mut s = Scheduler::new();
        let mut timer = RoundTimer::new();
        timer.start(&mut s, ());
        run(&mut timer, &mut s, 2);
        timer.stop(&mut s);
        assert_eq!(s.pending(), 0);
        run(&mut timer, &mut s, 5);
        assert_eq!(*timer.elapsed_seconds(), 2);
        assert!(!*timer.running());
    }

    #[test]
    fn test_restart_resets_to_zero() {
        let mut s = Scheduler::new();
        let mut timer = RoundTimer::new();
        timer.start(&mut s, ());
        run(&mut timer, &mut s, 4);
        timer.start(&mut s, ());
        assert_eq!(*timer.elapsed_seconds(), 0);
        assert_eq!(s.pending(), 1);
        run(&mut timer, &mut s, 1);
        assert_eq!(*timer.elapsed_seconds(), 1);
    }
}
