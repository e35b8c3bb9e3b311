//! Logical clock and scheduled-event queue.

use types::Tick;

/// An event queued for a future tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent<E> {
    pub time: Tick,
    pub event: E,
}

/// Time-ordered event queue driving the simulation's logical clock.
///
/// Events keep ascending time order with FIFO ordering among equal
/// times. Currently the simulation schedules nothing on it; it is the
/// extension point for timed shocks.
#[derive(Debug, Clone, Default)]
pub struct EventScheduler<E> {
    queue: Vec<ScheduledEvent<E>>,
    now: Tick,
}

impl<E> EventScheduler<E> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            now: 0,
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Queue an event for the given time, after any event already
    /// queued for the same time.
    pub fn schedule(&mut self, time: Tick, event: E) {
        let idx = self.queue.partition_point(|e| e.time <= time);
        self.queue.insert(idx, ScheduledEvent { time, event });
    }

    /// Pop every event whose time is due (`time <= now`), in order.
    pub fn drain_due(&mut self) -> Vec<E> {
        let due = self.queue.partition_point(|e| e.time <= self.now);
        self.queue.drain(..due).map(|e| e.event).collect()
    }

    /// Advance the logical clock by one tick.
    pub fn advance(&mut self) -> Tick {
        self.now += 1;
        self.now
    }

    /// Number of events still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_only_due_events() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(0, "now");
        scheduler.schedule(2, "later");

        assert_eq!(scheduler.drain_due(), vec!["now"]);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance();
        assert!(scheduler.drain_due().is_empty());

        scheduler.advance();
        assert_eq!(scheduler.drain_due(), vec!["later"]);
    }

    #[test]
    fn equal_times_drain_in_schedule_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(1, "a");
        scheduler.schedule(0, "early");
        scheduler.schedule(1, "b");
        scheduler.schedule(1, "c");

        scheduler.advance();
        assert_eq!(scheduler.drain_due(), vec!["early", "a", "b", "c"]);
    }

    #[test]
    fn advance_moves_the_clock() {
        let mut scheduler: EventScheduler<()> = EventScheduler::new();
        assert_eq!(scheduler.now(), 0);
        assert_eq!(scheduler.advance(), 1);
        assert_eq!(scheduler.advance(), 2);
    }

    #[test]
    fn past_events_are_immediately_due() {
        let mut scheduler = EventScheduler::new();
        for _ in 0..5 {
            scheduler.advance();
        }
        scheduler.schedule(1, "stale");
        assert_eq!(scheduler.drain_due(), vec!["stale"]);
    }
}
