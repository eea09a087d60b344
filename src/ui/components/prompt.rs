//! Pulsing single-action prompt, shared by the MusicPlay and LightOn
//! scenes.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::chrome::centered_line;
use crate::ui::theme;

pub struct PulsePrompt {
    started: Instant,
}

impl PulsePrompt {
    pub fn new(now: Instant) -> Self {
        Self { started: now }
    }

    pub fn render(
        &self,
        now: Instant,
        title: &str,
        glyph: &str,
        accent: Color,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let mid = area.y + area.height / 2;
        let elapsed = now.duration_since(self.started).as_secs_f32();
        // Two-second breathing cycle.
        let bright = (elapsed % 2.0) < 1.0;

        centered_line(
            buf,
            area,
            mid.saturating_sub(3),
            title,
            Style::default()
                .fg(theme::text_bright())
                .add_modifier(Modifier::BOLD),
        );

        let ring = if bright {
            format!("❨  {glyph}  ❩")
        } else {
            format!("(  {glyph}  )")
        };
        let ring_style = if bright {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };
        centered_line(buf, area, mid, &ring, ring_style);
    }
}
