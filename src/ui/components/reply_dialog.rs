//! Reply scene: the free-text reply dialog.
//!
//! The draft is mutable while editing and frozen the moment it is
//! submitted. Sending shows a spinner; success shows the thank-you card
//! before the session closes; failure is a blocking alert that resets the
//! sending flag so the user can retry.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::chrome::{DialogFrame, InstructionBar};
use crate::ui::theme;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyPhase {
    Editing,
    Sending,
    Submitted,
    Failed(String),
}

pub struct ReplyDialog {
    input: String,
    phase: ReplyPhase,
    spinner_frame: usize,
}

impl ReplyDialog {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            phase: ReplyPhase::Editing,
            spinner_frame: 0,
        }
    }

    pub fn phase(&self) -> &ReplyPhase {
        &self.phase
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    /// The send action is offered only for a non-empty draft while editing.
    pub fn can_send(&self) -> bool {
        self.phase == ReplyPhase::Editing && !self.input.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.phase == ReplyPhase::Editing {
            self.input.push(c);
        }
    }

    pub fn insert_newline(&mut self) {
        if self.phase == ReplyPhase::Editing {
            self.input.push('\n');
        }
    }

    pub fn backspace(&mut self) {
        if self.phase == ReplyPhase::Editing {
            self.input.pop();
        }
    }

    /// Freeze the draft and mark it in flight. Returns the submitted text.
    pub fn begin_sending(&mut self) -> String {
        self.phase = ReplyPhase::Sending;
        self.input.clone()
    }

    pub fn mark_submitted(&mut self) {
        self.phase = ReplyPhase::Submitted;
    }

    /// Delivery failed: surface the alert and allow a manual retry. The
    /// draft is kept.
    pub fn mark_failed(&mut self, message: String) {
        self.phase = ReplyPhase::Failed(message);
    }

    pub fn dismiss_failure(&mut self) {
        if matches!(self.phase, ReplyPhase::Failed(_)) {
            self.phase = ReplyPhase::Editing;
        }
    }

    /// Advance the sending spinner.
    pub fn tick(&mut self) {
        if self.phase == ReplyPhase::Sending {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        match &self.phase {
            ReplyPhase::Editing | ReplyPhase::Sending => self.render_editor(area, buf),
            ReplyPhase::Submitted => self.render_thanks(area, buf),
            ReplyPhase::Failed(message) => self.render_alert(message, area, buf),
        }
    }

    fn render_editor(&self, area: Rect, buf: &mut Buffer) {
        let frame = DialogFrame::new("Write Your Reply 💕", 54, 14);
        let inner = frame.render(area, buf);
        if inner.height < 6 {
            return;
        }

        Paragraph::new("Write your reply and press Enter to send")
            .style(Style::default().fg(theme::text_muted()))
            .alignment(Alignment::Center)
            .render(row(inner, 0), buf);

        let editor = Rect {
            x: inner.x + 1,
            y: inner.y + 2,
            width: inner.width.saturating_sub(2),
            height: inner.height.saturating_sub(5),
        };
        let shown = if self.phase == ReplyPhase::Editing {
            format!("{}▌", self.input)
        } else {
            self.input.clone()
        };
        Paragraph::new(shown)
            .style(Style::default().fg(theme::text_bright()))
            .wrap(Wrap { trim: false })
            .render(editor, buf);

        let status_y = inner.y + inner.height.saturating_sub(2);
        if self.phase == ReplyPhase::Sending {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(theme::blush())),
                Span::styled("Sending...", Style::default().fg(theme::text_bright())),
            ]))
            .alignment(Alignment::Center)
            .render(
                Rect {
                    y: status_y,
                    height: 1,
                    ..inner
                },
                buf,
            );
        } else {
            let send_hint = if self.can_send() {
                ("Enter", "Send Reply")
            } else {
                ("Enter", "Send (type a message first)")
            };
            InstructionBar::new(vec![send_hint, ("Alt+Enter", "New line")]).render(
                Rect {
                    y: status_y,
                    height: 1,
                    ..inner
                },
                buf,
            );
        }
    }

    fn render_thanks(&self, area: Rect, buf: &mut Buffer) {
        let frame = DialogFrame::new("Write Your Reply 💕", 54, 11);
        let inner = frame.render(area, buf);
        if inner.height < 5 {
            return;
        }
        let lines = [
            ("🎉💕✨", theme::gold()),
            ("Thank You! 🥰", theme::lavender()),
            ("Your beautiful message has been received! 💌", theme::text_bright()),
            ("Closing in a moment...", theme::hint()),
        ];
        for (i, (text, color)) in lines.iter().enumerate() {
            Paragraph::new(*text)
                .style(Style::default().fg(*color))
                .alignment(Alignment::Center)
                .render(row(inner, 1 + i as u16 * 2), buf);
        }
    }

    fn render_alert(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let frame = DialogFrame::new("Delivery Failed", 54, 9)
            .border_color(ratatui::style::Color::Red);
        let inner = frame.render(area, buf);
        if inner.height < 4 {
            return;
        }
        Paragraph::new("Failed to send reply. Please try again.")
            .style(Style::default().fg(theme::text_bright()))
            .alignment(Alignment::Center)
            .render(row(inner, 1), buf);
        Paragraph::new(message)
            .style(Style::default().fg(theme::text_muted()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    y: inner.y + 3,
                    height: 2,
                    ..inner
                },
                buf,
            );
        InstructionBar::new(vec![("Esc", "Dismiss & retry")]).render(
            Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            },
            buf,
        );
    }
}

impl Default for ReplyDialog {
    fn default() -> Self {
        Self::new()
    }
}

fn row(inner: Rect, offset: u16) -> Rect {
    Rect {
        x: inner.x,
        y: inner.y + offset,
        width: inner.width,
        height: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_whitespace_draft_cannot_send() {
        let mut dialog = ReplyDialog::new();
        assert!(!dialog.can_send());
        dialog.insert_char(' ');
        dialog.insert_newline();
        assert!(!dialog.can_send());
        dialog.insert_char('h');
        assert!(dialog.can_send());
    }

    #[test]
    fn draft_freezes_while_sending() {
        let mut dialog = ReplyDialog::new();
        dialog.insert_char('h');
        dialog.insert_char('i');
        let sent = dialog.begin_sending();
        assert_eq!(sent, "hi");
        dialog.insert_char('!');
        dialog.backspace();
        assert_eq!(dialog.value(), "hi");
        assert!(!dialog.can_send());
    }

    #[test]
    fn failure_resets_to_editing_and_keeps_the_draft() {
        let mut dialog = ReplyDialog::new();
        dialog.insert_char('h');
        dialog.begin_sending();
        dialog.mark_failed("boom".into());
        assert!(matches!(dialog.phase(), ReplyPhase::Failed(_)));
        dialog.dismiss_failure();
        assert_eq!(*dialog.phase(), ReplyPhase::Editing);
        assert_eq!(dialog.value(), "h");
        assert!(dialog.can_send());
    }

    #[test]
    fn spinner_only_advances_while_sending() {
        let mut dialog = ReplyDialog::new();
        dialog.tick();
        assert_eq!(dialog.spinner_frame, 0);
        dialog.insert_char('x');
        dialog.begin_sending();
        dialog.tick();
        assert_eq!(dialog.spinner_frame, 1);
    }
}
