//! Fixed-duration fireworks show timer.
//!
//! A periodic emitter checked against a precomputed end instant on every
//! tick (not a counter). It self-cancels when the budget is exhausted and
//! exposes a cancellation handle so the owner can stop it early.

use std::time::{Duration, Instant};

/// One emitter firing. `intensity` decays linearly from 1.0 toward 0.0 as
/// the show's remaining time runs down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterTick {
    pub intensity: f32,
}

#[derive(Debug)]
pub struct FireworksShow {
    end: Instant,
    duration: Duration,
    period: Duration,
    next_emit: Instant,
    cancelled: bool,
}

impl FireworksShow {
    pub const DURATION: Duration = Duration::from_secs(5);
    pub const PERIOD: Duration = Duration::from_millis(250);

    pub fn new(now: Instant) -> Self {
        Self::with_timing(now, Self::DURATION, Self::PERIOD)
    }

    pub fn with_timing(now: Instant, duration: Duration, period: Duration) -> Self {
        Self {
            end: now + duration,
            duration,
            period,
            next_emit: now + period,
            cancelled: false,
        }
    }

    /// Drain every emitter firing due by `now`. Once the precomputed end
    /// instant passes, the show cancels itself and emits nothing further.
    pub fn poll(&mut self, now: Instant) -> Vec<EmitterTick> {
        let mut ticks = Vec::new();
        if self.cancelled {
            return ticks;
        }
        while self.next_emit <= now {
            if self.next_emit >= self.end {
                self.cancelled = true;
                break;
            }
            let remaining = self.end.duration_since(self.next_emit);
            ticks.push(EmitterTick {
                intensity: remaining.as_secs_f32() / self.duration.as_secs_f32(),
            });
            self.next_emit += self.period;
        }
        ticks
    }

    /// Stop the show early. Subsequent polls emit nothing.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.cancelled || now >= self.end
    }
}
