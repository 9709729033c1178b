/// Delayed-task queue and clock abstraction
///
/// Timed behavior (the fake session handshake) is expressed as tasks due at
/// a point on a clock. The application polls the queue with a monotonic
/// clock every frame; tests drive a manual clock instead of sleeping.
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Source of "now", as an offset from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: std::cell::Cell<Duration>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, at: Duration) {
        self.now.set(at);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Handle to a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId {
    due: Duration,
    seq: u64,
}

#[cfg(test)]
impl TaskId {
    pub fn due(&self) -> Duration {
        self.due
    }
}

/// A task that came due, with the time it was scheduled for
#[derive(Debug, Clone, PartialEq)]
pub struct Due<T> {
    pub at: Duration,
    pub task: T,
}

/// Queue of tasks ordered by due time, then by insertion order
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BTreeMap<TaskId, T>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, due: Duration, task: T) -> TaskId {
        let id = TaskId { due, seq: self.next_seq };
        self.next_seq += 1;
        self.queue.insert(id, task);
        id
    }

    /// Remove a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.queue.remove(&id)
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    /// Pop every task due at or before `now`
    pub fn drain_due(&mut self, now: Duration) -> Vec<Due<T>> {
        let mut fired = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().due > now {
                break;
            }
            let at = entry.key().due;
            fired.push(Due { at, task: entry.remove() });
        }
        fired
    }

    #[cfg(test)]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|id| id.due)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(Duration::from_millis(300), "c");
        scheduler.schedule_at(Duration::from_millis(100), "a");
        scheduler.schedule_at(Duration::from_millis(200), "b");

        assert!(scheduler.drain_due(Duration::from_millis(50)).is_empty());

        let fired: Vec<_> = scheduler
            .drain_due(Duration::from_millis(200))
            .into_iter()
            .map(|d| d.task)
            .collect();
        assert_eq!(fired, vec!["a", "b"]);
        assert_eq!(scheduler.next_due(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn test_same_due_keeps_insertion_order() {
        let mut scheduler = Scheduler::new();
        let at = Duration::from_secs(1);
        scheduler.schedule_at(at, 1);
        scheduler.schedule_at(at, 2);
        scheduler.schedule_at(at, 3);

        let fired: Vec<_> = scheduler.drain_due(at).into_iter().map(|d| d.task).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule_at(Duration::from_secs(1), "keep");
        let drop = scheduler.schedule_at(Duration::from_secs(1), "drop");

        assert_eq!(scheduler.cancel(drop), Some("drop"));
        assert_eq!(scheduler.cancel(drop), None);
        assert_eq!(keep.due(), Duration::from_secs(1));

        let fired = scheduler.drain_due(Duration::from_secs(5));
        assert_eq!(fired, vec![Due { at: Duration::from_secs(1), task: "keep" }]);

        scheduler.schedule_at(Duration::from_secs(9), "later");
        scheduler.cancel_all();
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(Duration::from_millis(1500));
        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_secs(2));
        clock.set(Duration::from_secs(10));
        assert_eq!(clock.now(), Duration::from_secs(10));
    }
}
