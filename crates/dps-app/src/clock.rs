//! Wall-clock tick scheduling.
//!
//! The engine never looks at time. [`TickClock`] tracks when the next tick is
//! due at a fixed interval and invokes [`Engine::tick`] exactly once per due
//! deadline. Stopping the clock is cancellation; the engine is consistent at
//! every tick boundary.

use dps_sim::{Engine, TickOutcome};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    interval: Duration,
    next_tick: Instant,
}

impl TickClock {
    /// First tick is due one interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_tick: now + interval,
        }
    }

    pub fn from_millis(interval_ms: u64, now: Instant) -> Self {
        Self::new(Duration::from_millis(interval_ms), now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn should_tick(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// Move the deadline forward by one interval.
    pub fn advance(&mut self) {
        self.next_tick += self.interval;
    }

    pub fn reset(&mut self, now: Instant) {
        self.next_tick = now + self.interval;
    }

    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    /// Tick the engine if a deadline has passed.
    ///
    /// At most one tick per call; a late caller catches up one deadline at a
    /// time rather than bursting.
    pub fn poll(&mut self, now: Instant, engine: &mut Engine) -> Option<TickOutcome> {
        if !self.should_tick(now) {
            return None;
        }
        self.advance();
        Some(engine.tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dps_sim::Field;

    fn engine() -> Engine {
        let mut engine = Engine::new();
        engine.commit(Field::Gain, "2");
        engine.commit(Field::Tau, "5");
        engine.commit(Field::DeadTime, "1");
        engine.commit(Field::Period, "1");
        engine.commit(Field::StepMagnitude, "1");
        engine
    }

    #[test]
    fn due_after_one_interval() {
        let start = Instant::now();
        let clock = TickClock::from_millis(1000, start);
        assert!(!clock.should_tick(start));
        assert!(!clock.should_tick(start + Duration::from_millis(999)));
        assert!(clock.should_tick(start + Duration::from_millis(1000)));
        assert_eq!(clock.time_until_tick(start), Duration::from_millis(1000));
        assert_eq!(
            clock.time_until_tick(start + Duration::from_secs(5)),
            Duration::ZERO
        );
    }

    #[test]
    fn poll_ticks_once_per_deadline() {
        let start = Instant::now();
        let mut clock = TickClock::from_millis(100, start);
        let mut engine = engine();

        assert!(clock.poll(start, &mut engine).is_none());
        assert_eq!(engine.time_index(), 0);

        let late = start + Duration::from_millis(350);
        let mut ticks = 0;
        while clock.poll(late, &mut engine).is_some() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(engine.time_index(), 3);
    }

    #[test]
    fn reset_restarts_interval() {
        let start = Instant::now();
        let mut clock = TickClock::from_millis(100, start);
        let later = start + Duration::from_millis(500);
        clock.reset(later);
        assert!(!clock.should_tick(later));
        assert_eq!(clock.time_until_tick(later), Duration::from_millis(100));
    }
}
