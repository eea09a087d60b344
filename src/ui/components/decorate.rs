//! Decorate scene: the birthday banner. Firecracker entities are drawn by
//! the overlay on top of this view.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget, Wrap},
};

use super::chrome::centered_line;
use crate::ui::theme;

pub struct DecorateView {
    started: Instant,
}

impl DecorateView {
    pub fn new(now: Instant) -> Self {
        Self { started: now }
    }

    pub fn render(&self, now: Instant, recipient: &str, area: Rect, buf: &mut Buffer) {
        let elapsed = now.duration_since(self.started).as_secs_f32();
        // Gentle three-second bounce for the decor row.
        let lifted = (elapsed % 3.0) < 1.5;

        let mid = area.y + area.height / 2;
        let decor_y = if lifted {
            mid.saturating_sub(5)
        } else {
            mid.saturating_sub(4)
        };
        centered_line(
            buf,
            area,
            decor_y,
            "💕  ✨  💕",
            Style::default().fg(theme::gold()),
        );

        let banner = format!("💝 Wish You A Very Happy Birthday {recipient} 💝");
        let column_width = area.width.min(60);
        let column = Rect {
            x: area.x + (area.width.saturating_sub(column_width)) / 2,
            y: mid.saturating_sub(2),
            width: column_width,
            height: 4,
        };
        Paragraph::new(banner)
            .style(
                Style::default()
                    .fg(theme::rose())
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(column, buf);

        centered_line(
            buf,
            area,
            mid + 3,
            "Fly the Firecracker 🎆",
            Style::default().fg(theme::ember()),
        );
    }
}
