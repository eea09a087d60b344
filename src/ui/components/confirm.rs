//! Confirm scene: the yes/no question with the dodging "No" button.

use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use super::chrome::centered_line;
use crate::ui::theme;

/// Maximum displacement of the "No" button, in cells.
const DODGE_X: i16 = 9;
const DODGE_Y: i16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
}

#[derive(Debug)]
pub struct ConfirmPrompt {
    selected: ConfirmChoice,
    dodge: (i16, i16),
}

impl ConfirmPrompt {
    pub fn new() -> Self {
        Self {
            selected: ConfirmChoice::Yes,
            dodge: (0, 0),
        }
    }

    pub fn selected(&self) -> ConfirmChoice {
        self.selected
    }

    pub fn dodge(&self) -> (i16, i16) {
        self.dodge
    }

    /// Move the selection. Landing on "No" counts as a hover: the button
    /// jumps to a fresh random displacement every time.
    pub fn toggle(&mut self) {
        self.selected = match self.selected {
            ConfirmChoice::Yes => {
                self.re_dodge();
                ConfirmChoice::No
            }
            ConfirmChoice::No => ConfirmChoice::Yes,
        };
    }

    /// Activate the current choice. Returns `true` only for "Yes"; "No"
    /// never transitions — it just jumps again.
    pub fn activate(&mut self) -> bool {
        match self.selected {
            ConfirmChoice::Yes => true,
            ConfirmChoice::No => {
                self.re_dodge();
                false
            }
        }
    }

    fn re_dodge(&mut self) {
        let mut rng = rand::rng();
        self.dodge = (
            rng.random_range(-DODGE_X..=DODGE_X),
            rng.random_range(-DODGE_Y..=DODGE_Y),
        );
    }

    pub fn render(&self, question: &str, area: Rect, buf: &mut Buffer) {
        let mid = area.y + area.height / 2;

        centered_line(
            buf,
            area,
            mid.saturating_sub(4),
            "💕",
            Style::default().fg(theme::rose()),
        );
        centered_line(
            buf,
            area,
            mid.saturating_sub(2),
            question,
            Style::default()
                .fg(theme::text_bright())
                .add_modifier(Modifier::BOLD),
        );

        let yes_label = "  YES 💗  ";
        let no_label = "   NO   ";
        let buttons_y = mid + 2;

        let yes_style = if self.selected == ConfirmChoice::Yes {
            Style::default()
                .fg(theme::night())
                .bg(theme::rose())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::rose())
        };
        let no_style = if self.selected == ConfirmChoice::No {
            Style::default()
                .fg(theme::text_bright())
                .bg(theme::hint())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::text_muted())
        };

        let yes_width = UnicodeWidthStr::width(yes_label) as u16;
        let yes_x = (area.x + area.width / 2)
            .saturating_sub(yes_width + 2)
            .max(area.x);
        buf.set_string(yes_x, buttons_y, yes_label, yes_style);

        // The "No" button sits to the right of center, displaced by the
        // current dodge, clamped so it always stays on screen.
        let no_width = UnicodeWidthStr::width(no_label) as i32;
        let base_x = (area.x + area.width / 2 + 2) as i32;
        let base_y = buttons_y as i32;
        let max_x = (area.x + area.width) as i32 - no_width - 1;
        let max_y = (area.y + area.height) as i32 - 1;
        let no_x = (base_x + self.dodge.0 as i32).clamp(area.x as i32, max_x.max(area.x as i32));
        let no_y = (base_y + self.dodge.1 as i32).clamp(area.y as i32, max_y.max(area.y as i32));
        buf.set_string(no_x as u16, no_y as u16, no_label, no_style);
    }
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_is_selected_first_and_activates() {
        let mut prompt = ConfirmPrompt::new();
        assert_eq!(prompt.selected(), ConfirmChoice::Yes);
        assert!(prompt.activate());
    }

    #[test]
    fn no_never_activates_no_matter_how_often() {
        let mut prompt = ConfirmPrompt::new();
        prompt.toggle();
        assert_eq!(prompt.selected(), ConfirmChoice::No);
        for _ in 0..25 {
            assert!(!prompt.activate());
            let (dx, dy) = prompt.dodge();
            assert!(dx.abs() <= DODGE_X);
            assert!(dy.abs() <= DODGE_Y);
        }
    }

    #[test]
    fn landing_on_no_displaces_the_button() {
        let mut prompt = ConfirmPrompt::new();
        assert_eq!(prompt.dodge(), (0, 0));
        prompt.toggle();
        let (dx, dy) = prompt.dodge();
        assert!(dx.abs() <= DODGE_X);
        assert!(dy.abs() <= DODGE_Y);
    }
}
