//! Timer facility
//!
//! Scheduling is cooperative: a [`Timer`] hands out a [`TimerId`] for every
//! delayed [`NoteTrigger`], and the host later delivers due triggers back to
//! [`PlaybackScheduler::fire`](super::PlaybackScheduler::fire). Nothing runs on
//! another thread.
//!
//! [`VirtualTimer`] keeps its own clock, advanced explicitly by the host (a
//! frame loop, an audio callback, or a test).

use std::time::Duration;

use super::types::{NoteTrigger, TimerId};

/// Fire-after-delay timers that can be cancelled
pub trait Timer {
    /// Schedule `trigger` to become due after `delay`.
    fn schedule_after(&mut self, delay: Duration, trigger: NoteTrigger) -> TimerId;

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    fn cancel(&mut self, id: TimerId) -> bool;
}

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    due: Duration,
    trigger: NoteTrigger,
}

/// Timer driven by an explicitly advanced clock
///
/// # Ordering
/// Due triggers come out sorted by due time; triggers due at the same time
/// keep the order they were scheduled in.
#[derive(Debug, Clone, Default)]
pub struct VirtualTimer {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the timer was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.due).min()
    }

    /// Move the clock forward and return every trigger that became due.
    pub fn advance(&mut self, by: Duration) -> Vec<(TimerId, NoteTrigger)> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<PendingTimer>, Vec<PendingTimer>) = self
            .pending
            .drain(..)
            .partition(|timer| timer.due <= now);
        self.pending = pending;

        due.sort_by_key(|timer| (timer.due, timer.id));
        due.into_iter()
            .map(|timer| (timer.id, timer.trigger))
            .collect()
    }
}

impl Timer for VirtualTimer {
    fn schedule_after(&mut self, delay: Duration, trigger: NoteTrigger) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            due: self.now + delay,
            trigger,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::PitchClass;
    use crate::playback::AudioKey;

    fn trigger(position: usize) -> NoteTrigger {
        NoteTrigger {
            key: AudioKey::new(PitchClass::new(position), 4),
            position,
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timer = VirtualTimer::new();
        let late = timer.schedule_after(ms(40), trigger(2));
        let early = timer.schedule_after(ms(0), trigger(0));
        let middle = timer.schedule_after(ms(20), trigger(1));

        let fired: Vec<TimerId> = timer.advance(ms(50)).into_iter().map(|(id, _)| id).collect();
        assert_eq!(fired, vec![early, middle, late]);
        assert_eq!(timer.pending_len(), 0);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut timer = VirtualTimer::new();
        let id = timer.schedule_after(Duration::ZERO, trigger(0));
        assert_eq!(timer.pending_len(), 1);

        let fired = timer.advance(Duration::ZERO);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, id);
    }

    #[test]
    fn test_partial_advance() {
        let mut timer = VirtualTimer::new();
        timer.schedule_after(ms(0), trigger(0));
        timer.schedule_after(ms(20), trigger(1));
        timer.schedule_after(ms(40), trigger(2));

        assert_eq!(timer.advance(ms(10)).len(), 1);
        assert_eq!(timer.next_due(), Some(ms(20)));
        assert_eq!(timer.advance(ms(10)).len(), 1);
        assert_eq!(timer.advance(ms(10)).len(), 0);
        assert_eq!(timer.advance(ms(10)).len(), 1);
        assert_eq!(timer.now(), ms(40));
    }

    #[test]
    fn test_cancel() {
        let mut timer = VirtualTimer::new();
        let id = timer.schedule_after(ms(10), trigger(0));
        assert!(timer.cancel(id));
        assert!(!timer.cancel(id)); // second cancel is a no-op
        assert!(timer.advance(ms(100)).is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut timer = VirtualTimer::new();
        timer.advance(ms(100));
        timer.schedule_after(ms(20), trigger(0));
        assert_eq!(timer.next_due(), Some(ms(120)));
    }
}
