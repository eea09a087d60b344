//! App-owned overlay for celebratory effects.
//!
//! Hosts the [`EffectRegistry`] plus the schedulers whose timers outlive
//! individual scenes: staggered firecracker bursts, the fireworks show,
//! and one-shot confetti spreads. Each spawn is paired here with its
//! deferred expiration; expirations are never cancelled — they run to
//! their deadlines even after the spawning scene is gone.

use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::timeline::{
    EffectKind, EffectRegistry, FireworksShow, StaggeredBurst, FIRECRACKER_TTL,
};
use crate::ui::theme;

/// Entities per one-shot confetti burst.
const CONFETTI_COUNT: usize = 24;
const CONFETTI_TTL: Duration = Duration::from_millis(900);

/// Sparks flung out when the cake is cut.
const SLICE_SPARK_COUNT: usize = 8;
const SLICE_SPARK_TTL: Duration = Duration::from_millis(800);

/// Particles per emitter side at full show intensity.
const SHOW_PARTICLES_PER_SIDE: f32 = 5.0;
const SHOW_PARTICLE_TTL: Duration = Duration::from_millis(700);

pub struct OverlayEffects {
    registry: EffectRegistry,
    bursts: Vec<StaggeredBurst>,
    show: Option<FireworksShow>,
    expirations: Vec<(u64, Instant)>,
}

impl OverlayEffects {
    pub fn new() -> Self {
        Self {
            registry: EffectRegistry::new(),
            bursts: Vec::new(),
            show: None,
            expirations: Vec::new(),
        }
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Begin the 12-entity staggered firecracker burst.
    pub fn start_firecracker_burst(&mut self, now: Instant) {
        self.bursts.push(StaggeredBurst::firecrackers(now));
    }

    /// Begin the 5-second two-emitter fireworks show. A show already in
    /// flight is replaced rather than stacked.
    pub fn start_show(&mut self, now: Instant) {
        self.show = Some(FireworksShow::new(now));
    }

    /// Stop any running show early. Spawned entities keep their deadlines.
    pub fn cancel_show(&mut self) {
        if let Some(show) = &mut self.show {
            show.cancel();
        }
        self.show = None;
    }

    /// One-shot celebratory spread around the lower-center of the screen.
    pub fn confetti_burst(&mut self, now: Instant) {
        let mut rng = rand::rng();
        for _ in 0..CONFETTI_COUNT {
            let x = rng.random_range(0.25..0.75);
            let y = rng.random_range(0.35..0.85);
            let id = self.registry.spawn(x, y, EffectKind::Confetti);
            self.expirations.push((id, now + CONFETTI_TTL));
        }
    }

    /// Short spark ring centered on `(cx, cy)` (fractions of the area).
    pub fn slice_sparks(&mut self, now: Instant, cx: f32, cy: f32) {
        for i in 0..SLICE_SPARK_COUNT {
            let angle = (i as f32 / SLICE_SPARK_COUNT as f32) * std::f32::consts::TAU;
            let x = (cx + angle.cos() * 0.08).clamp(0.0, 1.0);
            let y = (cy + angle.sin() * 0.08).clamp(0.0, 1.0);
            let id = self.registry.spawn(x, y, EffectKind::Spark);
            self.expirations.push((id, now + SLICE_SPARK_TTL));
        }
    }

    /// Advance all schedulers: show emitters, due burst spawns, due
    /// expirations.
    pub fn update(&mut self, now: Instant) {
        if let Some(show) = &mut self.show {
            let mut rng = rand::rng();
            for tick in show.poll(now) {
                let per_side = (tick.intensity * SHOW_PARTICLES_PER_SIDE).ceil() as usize;
                for _ in 0..per_side {
                    let left_x = rng.random_range(0.10..0.30);
                    let right_x = rng.random_range(0.70..0.90);
                    let y = rng.random_range(0.05..0.55);
                    let left = self.registry.spawn(left_x, y, EffectKind::Confetti);
                    let right = self.registry.spawn(right_x, y, EffectKind::Confetti);
                    self.expirations.push((left, now + SHOW_PARTICLE_TTL));
                    self.expirations.push((right, now + SHOW_PARTICLE_TTL));
                }
            }
            if show.is_finished(now) {
                self.show = None;
            }
        }

        let mut spawned = Vec::new();
        for burst in &mut self.bursts {
            for scheduled in burst.take_due(now) {
                spawned.push(scheduled);
            }
        }
        self.bursts.retain(|burst| !burst.is_exhausted());
        if !spawned.is_empty() {
            let mut rng = rand::rng();
            for scheduled in spawned {
                let x = rng.random_range(0.10..0.90);
                let y = rng.random_range(0.20..0.80);
                let id = self.registry.spawn(x, y, EffectKind::Firecracker);
                // Lifetime anchored to the scheduled spawn, not the tick
                // that performed it.
                self.expirations.push((id, scheduled + FIRECRACKER_TTL));
            }
        }

        let mut i = 0;
        while i < self.expirations.len() {
            if self.expirations[i].1 <= now {
                let (id, _) = self.expirations.swap_remove(i);
                self.registry.expire(id);
            } else {
                i += 1;
            }
        }
    }

    /// Paint every live entity over the current scene.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for entity in self.registry.entities() {
            let x = area.x + (entity.x * (area.width.saturating_sub(1)) as f32) as u16;
            let y = area.y + (entity.y * (area.height.saturating_sub(1)) as f32) as u16;
            let (glyph, color) = match entity.kind {
                EffectKind::Firecracker => ('✸', theme::ember()),
                EffectKind::Confetti => {
                    let glyph = ['✦', '✧', '•', '*'][(entity.id % 4) as usize];
                    (glyph, theme::confetti_color(entity.id))
                }
                EffectKind::Spark => ('·', theme::gold()),
            };
            buf[(x, y)]
                .set_char(glyph)
                .set_style(Style::default().fg(color));
        }
    }
}

impl Default for OverlayEffects {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::timeline::FIRECRACKER_COUNT;

    #[test]
    fn burst_spawns_twelve_then_drains_to_empty() {
        let t0 = Instant::now();
        let mut overlay = OverlayEffects::new();
        overlay.start_firecracker_burst(t0);

        let mut seen: HashSet<u64> = HashSet::new();
        // Step through the ~1650ms spawn window at the frame cadence.
        for step in 0u64..=33 {
            overlay.update(t0 + Duration::from_millis(step * 50));
            seen.extend(overlay.registry().entities().iter().map(|e| e.id));
        }
        assert_eq!(seen.len(), FIRECRACKER_COUNT);

        // Last spawn is scheduled at t0+1650; all lifetimes are over
        // 1500ms later.
        overlay.update(t0 + Duration::from_millis(1650 + 1500));
        assert!(overlay.registry().is_empty());
    }

    #[test]
    fn confetti_burst_is_bounded_and_self_expiring() {
        let t0 = Instant::now();
        let mut overlay = OverlayEffects::new();
        overlay.confetti_burst(t0);
        assert_eq!(overlay.registry().len(), CONFETTI_COUNT);
        overlay.update(t0 + CONFETTI_TTL);
        assert!(overlay.registry().is_empty());
    }

    #[test]
    fn cancelled_show_spawns_nothing_further() {
        let t0 = Instant::now();
        let mut overlay = OverlayEffects::new();
        overlay.start_show(t0);
        overlay.update(t0 + Duration::from_millis(300));
        let after_first_tick = overlay.registry().len();
        assert!(after_first_tick > 0);

        overlay.cancel_show();
        overlay.update(t0 + Duration::from_millis(600));
        // Nothing new spawned; the earlier particles may still be live.
        assert!(overlay.registry().len() <= after_first_tick);
        // Existing particles still run to their own deadlines.
        overlay.update(t0 + Duration::from_millis(300) + SHOW_PARTICLE_TTL);
        assert!(overlay.registry().is_empty());
    }

    #[test]
    fn entity_lifetimes_survive_scene_style_interleaving() {
        // Spawns from a burst keep expiring on schedule even when new
        // effects start in between (the overlay outlives scenes).
        let t0 = Instant::now();
        let mut overlay = OverlayEffects::new();
        overlay.start_firecracker_burst(t0);
        overlay.update(t0);
        assert_eq!(overlay.registry().len(), 1);
        overlay.confetti_burst(t0 + Duration::from_millis(100));
        overlay.update(t0 + Duration::from_millis(1500));
        // The first firecracker (scheduled at t0) is gone at exactly ttl.
        let kinds: Vec<_> = overlay
            .registry()
            .entities()
            .iter()
            .filter(|e| e.kind == EffectKind::Firecracker)
            .map(|e| e.id)
            .collect();
        assert!(!kinds.contains(&0));
    }
}
