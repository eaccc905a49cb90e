//! Status bar segment - the rendered form of a poll.

use ratatui::style::{Color, Style};

use crate::poller::{PollResult, StatusColor};

/// Foreground used for [`StatusColor::Good`].
pub const GOOD_COLOR: Color = Color::Rgb(0x00, 0xFF, 0x00);

/// Foreground used for [`StatusColor::Bad`].
pub const BAD_COLOR: Color = Color::Rgb(0xFF, 0x00, 0x00);

impl StatusColor {
    /// Default style for this status.
    #[must_use]
    pub fn style(self) -> Style {
        match self {
            Self::Good => Style::default().fg(GOOD_COLOR),
            Self::Bad => Style::default().fg(BAD_COLOR),
        }
    }
}

/// A segment of text for the status bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusBarSegment {
    /// The text content.
    pub content: String,
    /// Style for the segment.
    pub style: Style,
    /// Optional icon/prefix (symbol).
    pub icon: Option<String>,
}

impl StatusBarSegment {
    /// Create a new segment with text only.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set an icon/prefix.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Check if segment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.icon.is_none()
    }
}

impl From<&PollResult> for StatusBarSegment {
    fn from(result: &PollResult) -> Self {
        Self::new(result.display_text.clone()).style(result.color.style())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_from_poll_result() {
        let result = PollResult {
            is_active: true,
            display_text: "exotic_bug is live!".to_string(),
            color: StatusColor::Good,
            valid_until: Utc::now(),
        };

        let segment = StatusBarSegment::from(&result);

        assert_eq!(segment.content, "exotic_bug is live!");
        assert_eq!(segment.style.fg, Some(GOOD_COLOR));
        assert_eq!(segment.icon, None);
    }

    #[test]
    fn test_is_empty() {
        assert!(StatusBarSegment::default().is_empty());
        assert!(!StatusBarSegment::default().icon("!").is_empty());
        assert!(!StatusBarSegment::new("live").is_empty());
    }
}
