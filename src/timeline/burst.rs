//! Staggered spawn schedule for the firecracker burst.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Entities per burst.
pub const FIRECRACKER_COUNT: usize = 12;
/// Gap between consecutive spawns.
pub const FIRECRACKER_STAGGER: Duration = Duration::from_millis(150);
/// Lifetime of each entity, anchored to its scheduled spawn time.
pub const FIRECRACKER_TTL: Duration = Duration::from_millis(1500);

/// Precomputed spawn deadlines for one burst. The burst only says *when*
/// to spawn; the overlay performs the spawns and pairs each with its
/// expiration.
#[derive(Debug)]
pub struct StaggeredBurst {
    due: VecDeque<Instant>,
}

impl StaggeredBurst {
    pub fn new(count: usize, stagger: Duration, now: Instant) -> Self {
        let due = (0..count).map(|i| now + stagger * i as u32).collect();
        Self { due }
    }

    pub fn firecrackers(now: Instant) -> Self {
        Self::new(FIRECRACKER_COUNT, FIRECRACKER_STAGGER, now)
    }

    /// Pop every spawn whose scheduled time has passed. The returned
    /// instants are the *scheduled* times, so expirations anchored to them
    /// stay exact even when a tick arrives late.
    pub fn take_due(&mut self, now: Instant) -> Vec<Instant> {
        let mut due = Vec::new();
        while let Some(&front) = self.due.front() {
            if front > now {
                break;
            }
            self.due.pop_front();
            due.push(front);
        }
        due
    }

    pub fn is_exhausted(&self) -> bool {
        self.due.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.due.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_are_staggered() {
        let t0 = Instant::now();
        let mut burst = StaggeredBurst::firecrackers(t0);

        // First spawn is due at the trigger instant.
        assert_eq!(burst.take_due(t0).len(), 1);
        assert_eq!(burst.take_due(t0 + Duration::from_millis(149)).len(), 0);
        assert_eq!(burst.take_due(t0 + Duration::from_millis(150)).len(), 1);
        assert_eq!(burst.remaining(), FIRECRACKER_COUNT - 2);
    }

    #[test]
    fn late_tick_drains_all_overdue_spawns() {
        let t0 = Instant::now();
        let mut burst = StaggeredBurst::firecrackers(t0);
        let due = burst.take_due(t0 + Duration::from_millis(1650));
        assert_eq!(due.len(), FIRECRACKER_COUNT);
        assert!(burst.is_exhausted());
        // Scheduled times are preserved for expiration anchoring.
        assert_eq!(due[0], t0);
        assert_eq!(due[11], t0 + Duration::from_millis(1650));
    }
}
