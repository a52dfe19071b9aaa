/// EmptyState widget - centered call-to-action shown when the selection
/// is empty.
use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default)]
pub struct EmptyState;

impl EmptyState {
    pub fn new() -> Self {
        Self
    }
}

const LINES: [&str; 3] = [
    "Welcome to your sports dashboard",
    "Track live scores and upcoming games from six leagues",
    "Press a to add your first game",
];

impl RenderableWidget for EmptyState {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.height < LINES.len() as u16 + 1 || area.width == 0 {
            return;
        }

        let top = area.y + (area.height - LINES.len() as u16 - 1) / 2;
        for (idx, line) in LINES.iter().enumerate() {
            let width = line.width() as u16;
            if width > area.width {
                continue;
            }
            let x = area.x + (area.width - width) / 2;
            // Extra gap before the key hint line
            let y = top + idx as u16 + if idx == LINES.len() - 1 { 1 } else { 0 };
            let style = if idx == LINES.len() - 1 {
                Style::default().fg(config.selection_fg)
            } else {
                Style::default()
            };
            buf.set_string(x, y, *line, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::testing::*;

    #[test]
    fn renders_call_to_action_centered() {
        let buf = render_widget(&EmptyState::new(), 80, 20);
        assert!(buffer_contains(&buf, "Welcome to your sports dashboard"));
        assert!(buffer_contains(&buf, "Press a to add your first game"));

        // Horizontally centered: equal margins around the first line.
        let line = (0..20)
            .map(|y| buffer_line(&buf, y))
            .find(|l| l.contains("Welcome"))
            .unwrap();
        let leading = line.len() - line.trim_start().len();
        let trailing = line.len() - line.trim_end().len();
        assert!(leading.abs_diff(trailing) <= 1);
    }

    #[test]
    fn tiny_area_renders_nothing() {
        let buf = render_widget(&EmptyState::new(), 80, 2);
        assert_eq!(buffer_line(&buf, 0).trim(), "");
    }
}
