//! Falling-hearts backdrop for the opening scenes.
//!
//! Layout is randomized once at construction; positions derive from the
//! elapsed time, so rendering needs no per-frame mutation.

use std::time::Instant;

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::ui::theme;

struct Heart {
    /// Horizontal position as a fraction of the area width.
    column: f32,
    /// Fall speed in rows per second.
    speed: f32,
    /// Starting offset as a fraction of the fall cycle.
    phase: f32,
    glyph: char,
}

pub struct HeartRain {
    hearts: Vec<Heart>,
    started: Instant,
}

impl HeartRain {
    pub fn new(count: usize, now: Instant) -> Self {
        let mut rng = rand::rng();
        let hearts = (0..count)
            .map(|_| Heart {
                column: rng.random_range(0.0..1.0),
                speed: rng.random_range(1.2..3.5),
                phase: rng.random_range(0.0..1.0),
                glyph: if rng.random_bool(0.6) { '♥' } else { '♡' },
            })
            .collect();
        Self {
            hearts,
            started: now,
        }
    }

    pub fn render(&self, now: Instant, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let elapsed = now.duration_since(self.started).as_secs_f32();
        // Hearts fall off the bottom and wrap back in above the top.
        let cycle = area.height as f32 + 4.0;
        for heart in &self.hearts {
            let progress = (heart.phase * cycle + elapsed * heart.speed) % cycle;
            let row = progress - 2.0;
            if row < 0.0 || row >= area.height as f32 {
                continue;
            }
            let x = area.x + (heart.column * (area.width.saturating_sub(1)) as f32) as u16;
            let y = area.y + row as u16;
            buf[(x, y)]
                .set_char(heart.glyph)
                .set_style(Style::default().fg(theme::heart_dim()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn renders_within_bounds() {
        let t0 = Instant::now();
        let rain = HeartRain::new(20, t0);
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        // Any instant is safe: all writes must stay inside the area.
        rain.render(t0 + Duration::from_millis(3700), area, &mut buf);
    }

    #[test]
    fn zero_sized_area_is_a_no_op() {
        let t0 = Instant::now();
        let rain = HeartRain::new(5, t0);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        rain.render(t0, area, &mut buf);
    }
}
