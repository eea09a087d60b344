//! Intro scene: one sequenced line at a time over the night backdrop.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget, Wrap},
};

use super::chrome::centered_line;
use crate::ui::theme;

pub struct IntroView;

impl IntroView {
    /// Render the currently displayed sequencer line, if any. Between the
    /// sentinel arriving and the scene change the screen simply stays
    /// dark, like a beat of silence.
    pub fn render(text: Option<&str>, area: Rect, buf: &mut Buffer) {
        let Some(text) = text else {
            return;
        };

        let mid = area.y + area.height / 2;
        centered_line(
            buf,
            area,
            mid.saturating_sub(3),
            "💝",
            Style::default().fg(theme::rose()),
        );

        let column_width = area.width.min(64);
        let top = mid.saturating_sub(1);
        let column = Rect {
            x: area.x + (area.width.saturating_sub(column_width)) / 2,
            y: top,
            width: column_width,
            height: (area.y + area.height).saturating_sub(top),
        };
        Paragraph::new(text)
            .style(
                Style::default()
                    .fg(theme::text_bright())
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(column, buf);
    }
}
