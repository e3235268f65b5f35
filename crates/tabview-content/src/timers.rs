//! Cooperative timers polled from the host event loop.
//!
//! Nothing here blocks or spawns: timers are deadlines that fire when the
//! owner calls [`TimerQueue::poll`]. The host sleeps until
//! [`TimerQueue::next_deadline`] between polls.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock; clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Shortest period a repeating timer runs with.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct TimerEntry<T> {
    id: TimerId,
    deadline: Instant,
    period: Option<Duration>,
    payload: T,
}

/// A set of one-shot and repeating timers carrying a payload of type `T`.
pub struct TimerQueue<T> {
    clock: Rc<dyn Clock>,
    next_id: u64,
    entries: Vec<TimerEntry<T>>,
}

impl<T: Copy> TimerQueue<T> {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Fire once after `delay`.
    pub fn start_single_shot(&mut self, delay: Duration, payload: T) -> TimerId {
        self.insert(delay, None, payload)
    }

    /// Fire every `period` until cancelled. Periods shorter than
    /// [`MIN_PERIOD`] are raised to it so a poll loop always makes progress.
    pub fn start_repeating(&mut self, period: Duration, payload: T) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(period, Some(period), payload)
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Collect every timer whose deadline has passed, earliest first.
    ///
    /// One-shot timers are removed. Repeating timers fire at most once per
    /// poll and are re-armed one period after `now`, so missed ticks collapse.
    pub fn poll(&mut self) -> Vec<(TimerId, T)> {
        let now = self.clock.now();
        let mut due: Vec<(Instant, TimerId, T)> = self
            .entries
            .iter()
            .filter(|entry| entry.deadline <= now)
            .map(|entry| (entry.deadline, entry.id, entry.payload))
            .collect();
        due.sort_by_key(|(deadline, id, _)| (*deadline, id.0));

        self.entries.retain_mut(|entry| {
            if entry.deadline > now {
                return true;
            }
            match entry.period {
                Some(period) => {
                    entry.deadline = now + period;
                    true
                }
                None => false,
            }
        });

        due.into_iter().map(|(_, id, payload)| (id, payload)).collect()
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            deadline: self.clock.now() + delay,
            period,
            payload,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tick {
        A,
        B,
    }

    fn queue() -> (ManualClock, TimerQueue<Tick>) {
        let clock = ManualClock::new();
        let queue = TimerQueue::new(Rc::new(clock.clone()));
        (clock, queue)
    }

    #[test]
    fn single_shot_fires_once() {
        let (clock, mut timers) = queue();
        let id = timers.start_single_shot(Duration::from_millis(50), Tick::A);

        clock.advance(Duration::from_millis(49));
        assert!(timers.poll().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.poll(), vec![(id, Tick::A)]);
        assert!(!timers.is_active(id));

        clock.advance(Duration::from_secs(1));
        assert!(timers.poll().is_empty());
    }

    #[test]
    fn repeating_rearms_and_collapses_missed_ticks() {
        let (clock, mut timers) = queue();
        let id = timers.start_repeating(Duration::from_secs(1), Tick::B);

        clock.advance(Duration::from_secs(1));
        assert_eq!(timers.poll().len(), 1);

        clock.advance(Duration::from_secs(5));
        assert_eq!(timers.poll(), vec![(id, Tick::B)]);
        assert!(timers.is_active(id));
        assert_eq!(
            timers.next_deadline(),
            Some(clock.now() + Duration::from_secs(1))
        );
    }

    #[test]
    fn zero_period_is_raised_to_minimum() {
        let (clock, mut timers) = queue();
        let id = timers.start_repeating(Duration::ZERO, Tick::A);
        assert_eq!(timers.next_deadline(), Some(timers.now() + MIN_PERIOD));

        clock.advance(MIN_PERIOD);
        assert_eq!(timers.poll(), vec![(id, Tick::A)]);
        assert!(timers.poll().is_empty());
        assert_eq!(timers.next_deadline(), Some(timers.now() + MIN_PERIOD));
    }

    #[test]
    fn cancel_removes_timer() {
        let (clock, mut timers) = queue();
        let id = timers.start_repeating(Duration::from_millis(10), Tick::A);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));

        clock.advance(Duration::from_secs(1));
        assert!(timers.poll().is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let (clock, mut timers) = queue();
        let late = timers.start_single_shot(Duration::from_millis(30), Tick::B);
        let early = timers.start_single_shot(Duration::from_millis(10), Tick::A);

        clock.advance(Duration::from_millis(40));
        assert_eq!(timers.poll(), vec![(early, Tick::A), (late, Tick::B)]);
    }

    #[test]
    fn next_deadline_tracks_earliest() {
        let (clock, mut timers) = queue();
        assert_eq!(timers.next_deadline(), None);
        timers.start_single_shot(Duration::from_millis(30), Tick::B);
        timers.start_single_shot(Duration::from_millis(10), Tick::A);
        assert_eq!(
            timers.next_deadline(),
            Some(clock.now() + Duration::from_millis(10))
        );
    }
}
