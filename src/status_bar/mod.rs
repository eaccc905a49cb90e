//! One-row status bar rendering for poll segments.

mod segment;

pub use segment::{StatusBarSegment, BAD_COLOR, GOOD_COLOR};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Configuration for the status bar.
#[derive(Clone, Debug)]
pub struct StatusBarConfig {
    /// Background style.
    pub style: Style,
    /// Separator between segments.
    pub separator: String,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            style: Style::default().bg(Color::Black).fg(Color::White),
            separator: " | ".to_string(),
        }
    }
}

/// Renders segments left to right on the first row of its area, clipping at
/// the right edge.
#[derive(Debug)]
pub struct StatusBarWidget<'a> {
    segments: &'a [StatusBarSegment],
    config: StatusBarConfig,
}

impl<'a> StatusBarWidget<'a> {
    /// Create a new status bar widget.
    #[must_use]
    pub fn new(segments: &'a [StatusBarSegment]) -> Self {
        Self {
            segments,
            config: StatusBarConfig::default(),
        }
    }

    /// Set the configuration.
    #[must_use]
    pub fn config(mut self, config: StatusBarConfig) -> Self {
        self.config = config;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.config.style);

        let right = area.right();
        let mut x = area.x;
        let mut first = true;

        for segment in self.segments.iter().filter(|s| !s.is_empty()) {
            if !first {
                x = put(buf, x, area.y, right, &self.config.separator, self.config.style);
            }
            first = false;

            if let Some(icon) = &segment.icon {
                x = put(buf, x, area.y, right, icon, segment.style);
                x = put(buf, x, area.y, right, " ", segment.style);
            }
            x = put(buf, x, area.y, right, &segment.content, segment.style);

            if x >= right {
                break;
            }
        }
    }
}

/// Write `text` at (`x`, `y`) without crossing `right`; returns the next column.
fn put(buf: &mut Buffer, x: u16, y: u16, right: u16, text: &str, style: Style) -> u16 {
    if x >= right {
        return x;
    }
    let (next, _) = buf.set_stringn(x, y, text, usize::from(right - x), style);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_segments_with_separator() {
        let segments = [
            StatusBarSegment::new("a is live!").style(Style::default().fg(GOOD_COLOR)),
            StatusBarSegment::default(),
            StatusBarSegment::new("b is offline.").icon("*"),
        ];
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);

        StatusBarWidget::new(&segments).render(area, &mut buf);

        assert_eq!(row(&buf), "a is live! | * b is offline.  ");
        assert_eq!(buf[(0, 0)].fg, GOOD_COLOR);
        assert_eq!(buf[(11, 0)].fg, Color::White);
    }

    #[test]
    fn test_clips_at_right_edge() {
        let segments = [StatusBarSegment::new("exotic_bug is live!")];
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        StatusBarWidget::new(&segments).render(area, &mut buf);

        assert_eq!(row(&buf), "exotic_bug");
    }
}
