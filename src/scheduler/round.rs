//! Round timer: a three-phase cycle that fires prioritized callbacks.
//!
//! ```text
//! Starting --(next tick)--> Running --(run_time elapsed)--> Ending --(wake timer)--> Starting
//! ```
//!
//! Start callbacks fire on entry to `Starting`'s tick, end callbacks when the
//! round runs out. The `Ending → Starting` wait is a timer in the same heap as
//! any one-shot timers the host schedules, and timers are drained after phase
//! logic within a tick.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueueError;
use crate::queue::{IndexedHeap, OrderedQueue, PriorityQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Starting,
    Running,
    Ending,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Length of the `Running` phase.
    pub run_time: f64,
    /// Wait between the end of a round and the next `Starting`.
    pub ending_delay: f64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            run_time: 30.0,
            ending_delay: 1.0,
        }
    }
}

/// What a callback is told when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundEvent {
    /// 1-based index of the current round.
    pub round: u64,
    pub phase: Phase,
    pub now: f64,
}

pub type RoundCallback = Box<dyn FnMut(&RoundEvent) + Send + Sync>;

pub type TimerId = u64;

enum TimerAction {
    EnterStarting,
    Once(RoundCallback),
}

pub struct RoundScheduler {
    config: RoundConfig,
    phase: Phase,
    round: u64,
    round_start: f64,
    round_duration: f64,
    start_callbacks: OrderedQueue<RoundCallback, f64>,
    end_callbacks: OrderedQueue<RoundCallback, f64>,
    /// Keyed by `(wake_at, id)` so timers due together fire in scheduling order.
    timers: IndexedHeap<TimerId, (f64, TimerId)>,
    timer_actions: HashMap<TimerId, TimerAction>,
    next_timer: TimerId,
}

impl fmt::Debug for RoundScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundScheduler")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("start_callbacks", &self.start_callbacks.len())
            .field("end_callbacks", &self.end_callbacks.len())
            .field("pending_timers", &self.timers.len())
            .finish()
    }
}

impl Default for RoundScheduler {
    fn default() -> Self {
        Self::new(RoundConfig::default())
    }
}

impl RoundScheduler {
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            phase: Phase::Starting,
            round: 0,
            round_start: 0.0,
            round_duration: 0.0,
            start_callbacks: OrderedQueue::new(),
            end_callbacks: OrderedQueue::new(),
            timers: IndexedHeap::new(),
            timer_actions: HashMap::new(),
            next_timer: 0,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rounds started so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Start time of the current round, while `Running`.
    pub fn round_start(&self) -> Option<f64> {
        (self.phase == Phase::Running).then_some(self.round_start)
    }

    /// Length of the current round, while `Running`.
    pub fn round_duration(&self) -> Option<f64> {
        (self.phase == Phase::Running).then_some(self.round_duration)
    }

    /// Time left in the current round, while `Running`.
    pub fn time_remaining(&self, now: f64) -> Option<f64> {
        self.round_start()
            .map(|start| (start + self.round_duration - now).max(0.0))
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Register a callback for every round start. Lower priorities fire first.
    pub fn add_start_callback(&mut self, callback: RoundCallback, priority: f64) -> Result<(), QueueError> {
        self.start_callbacks.insert(callback, priority)
    }

    /// Register a callback for every round end. Lower priorities fire first.
    pub fn add_end_callback(&mut self, callback: RoundCallback, priority: f64) -> Result<(), QueueError> {
        self.end_callbacks.insert(callback, priority)
    }

    /// Fire `callback` once, on the first tick at or after `wake_at`.
    pub fn schedule_once(&mut self, wake_at: f64, callback: RoundCallback) -> Result<TimerId, QueueError> {
        self.schedule(wake_at, TimerAction::Once(callback))
    }

    /// Drop every callback and timer and go back to `Starting`.
    pub fn reset(&mut self) {
        self.phase = Phase::Starting;
        self.round = 0;
        self.round_start = 0.0;
        self.round_duration = 0.0;
        self.start_callbacks.clear();
        self.end_callbacks.clear();
        self.timers.clear();
        self.timer_actions.clear();
        tracing::debug!("round scheduler reset");
    }

    /// Advance the state machine to `now`.
    ///
    /// Runs at most one phase transition, then every timer due by `now`.
    /// Returns the last phase entered during this tick, if any.
    pub fn tick(&mut self, now: f64) -> Result<Option<Phase>, QueueError> {
        let mut entered = None;

        match self.phase {
            Phase::Starting => {
                self.round += 1;
                fire(&mut self.start_callbacks, &RoundEvent {
                    round: self.round,
                    phase: Phase::Starting,
                    now,
                });
                self.round_start = now;
                self.round_duration = self.config.run_time;
                self.phase = Phase::Running;
                entered = Some(Phase::Running);
                tracing::info!(round = self.round, now, duration = self.round_duration, "round started");
            }
            Phase::Running if now - self.round_start > self.round_duration => {
                // A wake that cannot be queued leaves the round running.
                self.schedule(now + self.config.ending_delay, TimerAction::EnterStarting)?;
                fire(&mut self.end_callbacks, &RoundEvent {
                    round: self.round,
                    phase: Phase::Ending,
                    now,
                });
                self.phase = Phase::Ending;
                entered = Some(Phase::Ending);
                tracing::info!(round = self.round, now, "round ended");
            }
            Phase::Running | Phase::Ending => {}
        }

        if let Some(phase) = self.run_due_timers(now)? {
            entered = Some(phase);
        }
        Ok(entered)
    }

    fn schedule(&mut self, wake_at: f64, action: TimerAction) -> Result<TimerId, QueueError> {
        let id = self.next_timer;
        self.timers.insert(id, (wake_at, id))?;
        self.timer_actions.insert(id, action);
        self.next_timer += 1;
        Ok(id)
    }

    fn run_due_timers(&mut self, now: f64) -> Result<Option<Phase>, QueueError> {
        let mut entered = None;
        while let Some((_, &(wake_at, _))) = self.timers.peek() {
            if wake_at > now {
                break;
            }
            let (id, _) = self.timers.extract_min()?;
            match self.timer_actions.remove(&id) {
                Some(TimerAction::EnterStarting) => {
                    self.phase = Phase::Starting;
                    entered = Some(Phase::Starting);
                    tracing::debug!(round = self.round, now, "ending wait elapsed");
                }
                Some(TimerAction::Once(mut callback)) => callback(&RoundEvent {
                    round: self.round,
                    phase: self.phase,
                    now,
                }),
                None => tracing::warn!(id, "timer fired without an action"),
            }
        }
        Ok(entered)
    }
}

fn fire(callbacks: &mut OrderedQueue<RoundCallback, f64>, event: &RoundEvent) {
    for (callback, _) in callbacks.iter_mut() {
        callback(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    fn counter(scheduler: &mut RoundScheduler, start: bool) -> Arc<AtomicU32> {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        let cb: RoundCallback = Box::new(move |_| {
            c.fetch_add(1, Ordering::Relaxed);
        });
        if start {
            scheduler.add_start_callback(cb, 0.0).unwrap();
        } else {
            scheduler.add_end_callback(cb, 0.0).unwrap();
        }
        count
    }

    #[test]
    fn first_tick_fires_start_callbacks() {
        let mut scheduler = RoundScheduler::default();
        let starts = counter(&mut scheduler, true);
        assert_eq!(scheduler.phase(), Phase::Starting);
        assert_eq!(scheduler.tick(0.0).unwrap(), Some(Phase::Running));
        assert_eq!(starts.load(Ordering::Relaxed), 1);
        assert_eq!(scheduler.round(), 1);
        assert_eq!(scheduler.round_start(), Some(0.0));
        assert_eq!(scheduler.round_duration(), Some(30.0));
    }

    #[test]
    fn timers_due_together_fire_in_scheduling_order() {
        let mut scheduler = RoundScheduler::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["A", "B", "C", "D", "E"] {
            let order = order.clone();
            scheduler
                .schedule_once(5.0, Box::new(move |_: &RoundEvent| order.lock().unwrap().push(label)))
                .unwrap();
        }
        scheduler.tick(0.0).unwrap();
        assert!(order.lock().unwrap().is_empty());
        scheduler.tick(5.0).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn round_ends_only_after_duration_strictly_elapsed() {
        let mut scheduler = RoundScheduler::default();
        let ends = counter(&mut scheduler, false);
        scheduler.tick(0.0).unwrap();
        assert_eq!(scheduler.tick(30.0).unwrap(), None);
        assert_eq!(scheduler.phase(), Phase::Running);
        assert_eq!(scheduler.tick(30.5).unwrap(), Some(Phase::Ending));
        assert_eq!(ends.load(Ordering::Relaxed), 1);
        assert_eq!(scheduler.round_start(), None);
    }

    #[test]
    fn ending_waits_for_delay_then_restarts() {
        let mut scheduler = RoundScheduler::default();
        let starts = counter(&mut scheduler, true);
        scheduler.tick(0.0).unwrap();
        scheduler.tick(31.0).unwrap();
        assert_eq!(scheduler.tick(31.5).unwrap(), None);
        assert_eq!(scheduler.phase(), Phase::Ending);
        assert_eq!(scheduler.tick(32.0).unwrap(), Some(Phase::Starting));
        assert_eq!(starts.load(Ordering::Relaxed), 1);
        assert_eq!(scheduler.tick(32.1).unwrap(), Some(Phase::Running));
        assert_eq!(starts.load(Ordering::Relaxed), 2);
        assert_eq!(scheduler.round(), 2);
    }

    #[test]
    fn callbacks_fire_in_ascending_priority() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = RoundScheduler::default();
        for (name, priority) in [("c", 3.0), ("a", 1.0), ("b", 2.0), ("a2", 1.0)] {
            let log = log.clone();
            scheduler
                .add_start_callback(Box::new(move |_| log.lock().unwrap().push(name)), priority)
                .unwrap();
        }
        scheduler.tick(0.0).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "a2", "b", "c"]);
    }

    #[test]
    fn slow_tick_runs_one_transition() {
        let mut scheduler = RoundScheduler::default();
        let starts = counter(&mut scheduler, true);
        let ends = counter(&mut scheduler, false);
        scheduler.tick(0.0).unwrap();
        // Far past both the round end and the ending delay.
        assert_eq!(scheduler.tick(1_000.0).unwrap(), Some(Phase::Ending));
        assert_eq!(ends.load(Ordering::Relaxed), 1);
        assert_eq!(scheduler.tick(1_000.0).unwrap(), None);
        assert_eq!(scheduler.tick(2_000.0).unwrap(), Some(Phase::Starting));
        assert_eq!(starts.load(Ordering::Relaxed), 1);
        assert_eq!(ends.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn one_shot_timer_fires_once() {
        let mut scheduler = RoundScheduler::default();
        let hits = Arc::new(AtomicU32::new(0));
        let h = hits.clone();
        scheduler
            .schedule_once(5.0, Box::new(move |event: &RoundEvent| {
                assert_eq!(event.phase, Phase::Running);
                h.fetch_add(1, Ordering::Relaxed);
            }))
            .unwrap();
        scheduler.tick(0.0).unwrap();
        scheduler.tick(4.9).unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 0);
        scheduler.tick(5.0).unwrap();
        scheduler.tick(6.0).unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 1);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn nan_priority_and_wake_rejected() {
        let mut scheduler = RoundScheduler::default();
        assert_eq!(
            scheduler.add_start_callback(Box::new(|_| {}), f64::NAN),
            Err(QueueError::InvalidPriority)
        );
        assert_eq!(
            scheduler.schedule_once(f64::NAN, Box::new(|_| {})).err(),
            Some(QueueError::InvalidPriority)
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut scheduler = RoundScheduler::default();
        let starts = counter(&mut scheduler, true);
        scheduler.tick(0.0).unwrap();
        scheduler.tick(40.0).unwrap();
        scheduler.reset();
        assert_eq!(scheduler.phase(), Phase::Starting);
        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(scheduler.round(), 0);
        scheduler.tick(41.0).unwrap();
        assert_eq!(starts.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn time_remaining_counts_down() {
        let mut scheduler = RoundScheduler::new(RoundConfig {
            run_time: 10.0,
            ending_delay: 1.0,
        });
        assert_eq!(scheduler.time_remaining(0.0), None);
        scheduler.tick(2.0).unwrap();
        assert_eq!(scheduler.time_remaining(5.0), Some(7.0));
        assert_eq!(scheduler.time_remaining(50.0), Some(0.0));
    }
}
