//! Cake scene: the cake-cutting interaction.
//!
//! The cut is scene-local state: first activation slides the halves
//! apart under a knife sweep; the next activation advances the scene.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use super::chrome::centered_line;
use crate::ui::theme;

/// How far each half slides, in cells.
const SLIDE_CELLS: f32 = 6.0;
/// Time for the halves to fully separate.
const SLIDE_SWEEP: Duration = Duration::from_millis(800);
/// Knife visibility window after the cut.
const KNIFE_SWEEP: Duration = Duration::from_millis(600);

const CAKE: [&str; 11] = [
    "   i   i   i   i   ",
    "   |   |   |   |   ",
    " __|___|___|___|__ ",
    "/~~~~~~~~~~~~~~~~~\\",
    "|  o   o   o   o  |",
    "|__________________|",
    "/~~~~~~~~~~~~~~~~~~\\",
    "|  *   *   *   *   |",
    "|___________________|",
    "/~~~~~~~~~~~~~~~~~~~\\",
    "|____________________|",
];

pub struct CakeScene {
    cut_at: Option<Instant>,
}

impl CakeScene {
    pub fn new() -> Self {
        Self { cut_at: None }
    }

    pub fn is_cut(&self) -> bool {
        self.cut_at.is_some()
    }

    /// Cut the cake. Returns `true` on the first cut only.
    pub fn cut(&mut self, now: Instant) -> bool {
        if self.cut_at.is_some() {
            return false;
        }
        self.cut_at = Some(now);
        true
    }

    fn separation(&self, now: Instant) -> u16 {
        match self.cut_at {
            None => 0,
            Some(at) => {
                let progress = (now.duration_since(at).as_secs_f32()
                    / SLIDE_SWEEP.as_secs_f32())
                .min(1.0);
                (progress * SLIDE_CELLS) as u16
            }
        }
    }

    pub fn render(&self, now: Instant, area: Rect, buf: &mut Buffer) {
        let art_width = CAKE[0].len() as u16 + 2;
        let art_height = CAKE.len() as u16;
        if area.width < art_width + 2 * SLIDE_CELLS as u16 || area.height < art_height + 6 {
            return;
        }

        let sep = self.separation(now);
        let top = area.y + (area.height - art_height) / 2;
        let center_x = area.x + area.width / 2;

        // Corner decorations.
        let decor = Style::default().fg(theme::blush());
        buf.set_string(area.x + 2, area.y + 1, "💖", decor);
        buf.set_string(area.x + area.width - 4, area.y + 1, "✨", decor);
        buf.set_string(area.x + 2, area.y + area.height - 2, "🌹", decor);
        buf.set_string(area.x + area.width - 4, area.y + area.height - 2, "💕", decor);

        let cake_style = Style::default().fg(theme::text_bright());
        let candle_style = Style::default().fg(theme::gold());
        for (row, line) in CAKE.iter().enumerate() {
            let style = if row == 0 { candle_style } else { cake_style };
            let half = line.len() / 2;
            let (left, right) = line.split_at(half);
            let y = top + row as u16;
            // Left half slides left, right half slides right.
            let left_x = center_x
                .saturating_sub(half as u16)
                .saturating_sub(sep);
            buf.set_string(left_x, y, left, style);
            buf.set_string(center_x + sep, y, right, style);
        }

        if let Some(at) = self.cut_at {
            let since = now.duration_since(at);
            if since < KNIFE_SWEEP {
                // Knife sweeping down the cut line.
                let depth = (since.as_secs_f32() / KNIFE_SWEEP.as_secs_f32()
                    * art_height as f32) as u16;
                for y in top..(top + depth.min(art_height)) {
                    buf[(center_x, y)]
                        .set_char('╿')
                        .set_style(Style::default().fg(theme::text_muted()));
                }
            } else {
                centered_line(
                    buf,
                    area,
                    top + art_height + 1,
                    "🎉 Sliced! 🍰 🎉",
                    Style::default()
                        .fg(theme::rose())
                        .add_modifier(Modifier::BOLD),
                );
            }
        } else {
            centered_line(
                buf,
                area,
                top.saturating_sub(2),
                "🔪 Press Enter to cut",
                Style::default().fg(theme::lavender()),
            );
        }
    }
}

impl Default for CakeScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_cut_counts() {
        let t0 = Instant::now();
        let mut cake = CakeScene::new();
        assert!(!cake.is_cut());
        assert!(cake.cut(t0));
        assert!(cake.is_cut());
        assert!(!cake.cut(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn halves_separate_over_the_sweep() {
        let t0 = Instant::now();
        let mut cake = CakeScene::new();
        assert_eq!(cake.separation(t0), 0);
        cake.cut(t0);
        assert_eq!(cake.separation(t0), 0);
        let partway = cake.separation(t0 + Duration::from_millis(400));
        assert!(partway > 0 && partway < SLIDE_CELLS as u16);
        assert_eq!(
            cake.separation(t0 + Duration::from_secs(5)),
            SLIDE_CELLS as u16
        );
    }
}
