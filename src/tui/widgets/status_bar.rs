/// StatusBar widget - two-line bar at the bottom of the dashboard.
///
/// - Top line: horizontal separator with a connector above the countdown
///   divider.
/// - Bottom line: error message or key hints and the last-updated clock on
///   the left, seconds until the next refresh on the right.
///
/// The last-updated clock is only supplied by the caller while the
/// selection is non-empty.
use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;
use chrono::{DateTime, Local};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use std::time::SystemTime;

/// A keyboard hint displayed in the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug)]
pub struct StatusBar {
    /// Pre-formatted "last updated" clock text, shown only when supplied.
    pub last_updated: Option<String>,
    /// Refresh instant driving the countdown on the right.
    pub last_refresh: Option<SystemTime>,
    pub refresh_interval: u32,
    pub error_message: Option<String>,
    pub hints: Vec<KeyHint>,
}

impl StatusBar {
    /// Status bar with the default dashboard hints.
    pub fn new() -> Self {
        Self {
            last_updated: None,
            last_refresh: None,
            refresh_interval: 30,
            error_message: None,
            hints: vec![
                KeyHint::new("a", "Add"),
                KeyHint::new("d", "Remove"),
                KeyHint::new("r", "Refresh"),
                KeyHint::new("q", "Quit"),
            ],
        }
    }

    pub fn with_last_updated(mut self, last_updated: Option<String>) -> Self {
        self.last_updated = last_updated;
        self
    }

    pub fn with_last_refresh(mut self, last_refresh: Option<SystemTime>) -> Self {
        self.last_refresh = last_refresh;
        self
    }

    pub fn with_refresh_interval(mut self, refresh_interval: u32) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error_message = error;
        self
    }

    /// Left side: error first, otherwise hints plus the updated clock.
    fn status_text(&self) -> String {
        if let Some(msg) = &self.error_message {
            return format!("ERROR: {}", msg);
        }
        let hints = self
            .hints
            .iter()
            .map(|hint| format!("{} {}", hint.key, hint.action))
            .collect::<Vec<_>>()
            .join("  ");
        match &self.last_updated {
            Some(updated) => format!("{}   Updated {}", hints, updated),
            None => hints,
        }
    }

    /// Right side: 3-char countdown to the next refresh. Dashes before the
    /// first refresh, dots once a refresh is due.
    fn countdown_text(&self) -> String {
        let Some(refresh_time) = self.last_refresh else {
            return "---".to_string();
        };
        let Ok(elapsed) = SystemTime::now().duration_since(refresh_time) else {
            return "  ?".to_string();
        };
        let remaining = self
            .refresh_interval
            .saturating_sub(elapsed.as_secs() as u32);
        if remaining > 0 {
            format!("{:>3}", remaining.min(999))
        } else {
            "...".to_string()
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a refresh instant with the configured time format.
pub fn format_refresh_time(time: SystemTime, time_format: &str) -> String {
    let local: DateTime<Local> = time.into();
    local.format(time_format).to_string()
}

impl RenderableWidget for StatusBar {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height < 2 {
            return;
        }

        let chars = &config.box_chars;
        // Layout: [left] [padding] | [space] [3-char countdown] [space]
        let bar_position = area.width.saturating_sub(6);

        // Separator line with the connector above the divider
        let separator = format!(
            "{}{}{}",
            chars.horizontal.repeat(bar_position as usize),
            chars.connector,
            chars
                .horizontal
                .repeat(area.width.saturating_sub(bar_position + 1) as usize),
        );
        buf.set_string(area.x, area.y, &separator, Style::default());

        // Status line
        let left_text = self.status_text();
        let left_style = if self.error_message.is_some() {
            Style::default().fg(config.error_fg)
        } else {
            Style::default()
        };
        let mut x = area.x;
        buf.set_string(x, area.y + 1, " ", Style::default());
        x += 1;
        let left_limit = bar_position.saturating_sub(1) as usize;
        let left_clipped: String = left_text.chars().take(left_limit).collect();
        buf.set_string(x, area.y + 1, &left_clipped, left_style);
        x += left_clipped.chars().count() as u16;
        let padding = bar_position.saturating_sub(x - area.x);
        buf.set_string(x, area.y + 1, " ".repeat(padding as usize), Style::default());

        buf.set_string(area.x + bar_position, area.y + 1, &chars.vertical, Style::default());
        buf.set_string(
            area.x + bar_position + 1,
            area.y + 1,
            format!(" {} ", self.countdown_text()),
            Style::default(),
        );
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2) // Separator line + status line
    }
}
