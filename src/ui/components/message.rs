//! Message scene: the closing letter, rendered as markdown.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget, Wrap},
};

use super::chrome::centered_line;
use crate::ui::theme;

pub struct MessageView {
    scroll: u16,
}

impl MessageView {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn render(&self, recipient: &str, letter: &str, area: Rect, buf: &mut Buffer) {
        centered_line(
            buf,
            area,
            area.y + 1,
            "❤",
            Style::default().fg(theme::rose()).add_modifier(Modifier::BOLD),
        );
        centered_line(
            buf,
            area,
            area.y + 3,
            &format!("Dear {recipient},"),
            Style::default()
                .fg(theme::text_bright())
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        );

        let column_width = area.width.min(72);
        let body = Rect {
            x: area.x + (area.width.saturating_sub(column_width)) / 2,
            y: area.y + 5,
            width: column_width,
            height: area.height.saturating_sub(8),
        };
        let text = tui_markdown::from_str(letter);
        Paragraph::new(text)
            .style(Style::default().fg(theme::text_bright()))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0))
            .render(body, buf);

        centered_line(
            buf,
            area,
            area.y + area.height.saturating_sub(3),
            "Reply to me 💕",
            Style::default().fg(theme::blush()),
        );
    }
}

impl Default for MessageView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_saturates_at_the_top() {
        let mut view = MessageView::new();
        view.scroll_up();
        assert_eq!(view.scroll, 0);
        view.scroll_down();
        view.scroll_down();
        view.scroll_up();
        assert_eq!(view.scroll, 1);
    }
}
