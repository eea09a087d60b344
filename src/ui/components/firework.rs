//! Firework scene: orbiting hearts medallion and falling stars.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use super::chrome::centered_line;
use crate::ui::theme;

const ORBIT_HEARTS: [&str; 5] = ["💕", "💖", "💗", "💝", "💓"];
const STAR_COLUMNS: u16 = 6;

pub struct FireworkStage {
    started: Instant,
}

impl FireworkStage {
    pub fn new(now: Instant) -> Self {
        Self { started: now }
    }

    pub fn render(&self, now: Instant, area: Rect, buf: &mut Buffer) {
        let elapsed = now.duration_since(self.started).as_secs_f32();
        let cx = (area.x + area.width / 2) as f32;
        let cy = (area.y + area.height / 2) as f32 - 2.0;

        centered_line(
            buf,
            area,
            (cy as u16).saturating_sub(1),
            "✨",
            Style::default().fg(theme::gold()).add_modifier(Modifier::BOLD),
        );

        // Hearts orbit on a terminal-friendly ellipse (cells are taller
        // than they are wide).
        let rx = (area.width as f32 / 2.0 - 4.0).min(14.0).max(4.0);
        let ry = (area.height as f32 / 2.0 - 4.0).min(5.0).max(2.0);
        for (i, heart) in ORBIT_HEARTS.iter().enumerate() {
            let angle = (i as f32 / ORBIT_HEARTS.len() as f32) * std::f32::consts::TAU
                + elapsed * 0.8;
            let x = cx + angle.cos() * rx;
            let y = cy + angle.sin() * ry;
            if x >= area.x as f32
                && x < (area.x + area.width).saturating_sub(1) as f32
                && y >= area.y as f32
                && y < (area.y + area.height) as f32
            {
                buf.set_string(x as u16, y as u16, heart, Style::default());
            }
        }

        // Stars rising from the bottom, one column each.
        for i in 0..STAR_COLUMNS {
            let x = area.x + (area.width as u32 * (2 + i as u32 * 2) / 16) as u16;
            let climb = (elapsed * 3.0 + i as f32 * 2.0) % area.height.max(1) as f32;
            let y = (area.y + area.height).saturating_sub(1 + climb as u16);
            if y > area.y && x < area.x + area.width {
                buf[(x, y)]
                    .set_char('⭒')
                    .set_style(Style::default().fg(theme::gold()));
            }
        }

        centered_line(
            buf,
            area,
            area.y + area.height.saturating_sub(5),
            "Ready for the Sweetness?",
            Style::default()
                .fg(theme::lavender())
                .add_modifier(Modifier::BOLD),
        );
    }
}
