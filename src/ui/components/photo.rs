//! Photo reveal scene: a polaroid-style frame uncovered by a staggered
//! blinds sweep.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use super::chrome::centered_line;
use crate::ui::theme;

/// Number of vertical blind strips.
const STRIPS: u16 = 12;
/// Delay before the first strip starts opening.
const SWEEP_LEAD: Duration = Duration::from_millis(500);
/// Additional delay per strip.
const STRIP_STAGGER: Duration = Duration::from_millis(80);
/// Time for one strip to fully open.
const STRIP_SWEEP: Duration = Duration::from_millis(1200);

/// The "photograph": stylized in-terminal art in place of an image asset.
const PORTRAIT: [&str; 9] = [
    "   ...     ...   ",
    " .:::::. .:::::. ",
    ":::::::::::::::::",
    ":::::::::::::::::",
    " ':::::::::::::' ",
    "   ':::::::::'   ",
    "     ':::::'     ",
    "       ':'       ",
    "                 ",
];

pub struct PhotoReveal {
    started: Instant,
}

impl PhotoReveal {
    pub fn new(now: Instant) -> Self {
        Self { started: now }
    }

    fn strip_progress(&self, strip: u16, now: Instant) -> f32 {
        let start = self.started + SWEEP_LEAD + STRIP_STAGGER * strip as u32;
        if now < start {
            return 0.0;
        }
        (now.duration_since(start).as_secs_f32() / STRIP_SWEEP.as_secs_f32()).min(1.0)
    }

    pub fn render(&self, now: Instant, recipient: &str, area: Rect, buf: &mut Buffer) {
        let frame_width: u16 = 28;
        let frame_height: u16 = 15;
        let fx = area.x + area.width.saturating_sub(frame_width) / 2;
        let fy = area.y + area.height.saturating_sub(frame_height) / 2;
        if area.width < frame_width || area.height < frame_height {
            return;
        }

        let border = Style::default().fg(theme::blush());
        // Polaroid card: double-line border, wide bottom margin.
        buf.set_string(fx, fy, "╔", border);
        buf.set_string(fx + frame_width - 1, fy, "╗", border);
        for x in 1..frame_width - 1 {
            buf.set_string(fx + x, fy, "═", border);
            buf.set_string(fx + x, fy + frame_height - 1, "═", border);
        }
        for y in 1..frame_height - 1 {
            buf.set_string(fx, fy + y, "║", border);
            buf.set_string(fx + frame_width - 1, fy + y, "║", border);
        }
        buf.set_string(fx, fy + frame_height - 1, "╚", border);
        buf.set_string(fx + frame_width - 1, fy + frame_height - 1, "╝", border);

        // Decorative tape on the top corner.
        buf.set_string(
            fx + 3,
            fy,
            "▞▞▞▞",
            Style::default().fg(theme::rose()),
        );

        // The picture area inside the card.
        let pic = Rect {
            x: fx + 2,
            y: fy + 2,
            width: frame_width - 4,
            height: PORTRAIT.len() as u16,
        };
        for (row, line) in PORTRAIT.iter().enumerate() {
            centered_line(
                buf,
                pic,
                pic.y + row as u16,
                line,
                Style::default().fg(theme::rose()),
            );
        }

        // Blinds: each strip covers its share of the picture until its
        // sweep completes, fading through shades as it opens.
        let strip_width = (pic.width as f32 / STRIPS as f32).max(1.0);
        for strip in 0..STRIPS {
            let progress = self.strip_progress(strip, now);
            if progress >= 1.0 {
                continue;
            }
            let cover = match progress {
                p if p < 0.33 => '▓',
                p if p < 0.66 => '▒',
                _ => '░',
            };
            let x_start = pic.x + (strip as f32 * strip_width) as u16;
            let x_end = (pic.x + ((strip + 1) as f32 * strip_width) as u16)
                .min(pic.x + pic.width);
            for y in pic.y..pic.y + pic.height {
                for x in x_start..x_end {
                    buf[(x, y)]
                        .set_char(cover)
                        .set_style(Style::default().fg(theme::hint()));
                }
            }
        }

        // Caption on the polaroid's bottom margin.
        centered_line(
            buf,
            area,
            fy + frame_height - 3,
            recipient,
            Style::default()
                .fg(theme::lavender())
                .add_modifier(Modifier::BOLD),
        );
        centered_line(
            buf,
            area,
            fy + frame_height,
            "Hayee.... ❤",
            Style::default()
                .fg(theme::rose())
                .add_modifier(Modifier::ITALIC),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_open_in_stagger_order() {
        let t0 = Instant::now();
        let reveal = PhotoReveal::new(t0);
        let mid = t0 + Duration::from_millis(500 + 80 * 6);
        let early = reveal.strip_progress(0, mid);
        let late = reveal.strip_progress(11, mid);
        assert!(early > late);
    }

    #[test]
    fn all_strips_fully_open_after_the_sweep() {
        let t0 = Instant::now();
        let reveal = PhotoReveal::new(t0);
        let done = t0 + Duration::from_millis(500 + 80 * 11 + 1200);
        for strip in 0..STRIPS {
            assert_eq!(reveal.strip_progress(strip, done), 1.0);
        }
    }
}
