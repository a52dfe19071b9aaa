/// Testing utilities for widget rendering.
///
/// Helpers for rendering widgets into standalone buffers and asserting on
/// their textual content.
use super::RenderableWidget;
use crate::config::{Config, DisplayConfig};
use ratatui::{buffer::Buffer, layout::Rect};

/// Default display configuration for tests (unicode box characters).
pub fn test_config() -> DisplayConfig {
    Config::default().display()
}

/// Display configuration with ASCII box characters, for tests that want
/// predictable ASCII-only output.
pub fn test_config_ascii() -> DisplayConfig {
    let mut config = Config::default();
    config.use_unicode = false;
    config.display()
}

/// Render a widget to a fresh buffer and return it for inspection.
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    render_widget_with_config(widget, width, height, &test_config())
}

pub fn render_widget_with_config(
    widget: &impl RenderableWidget,
    width: u16,
    height: u16,
    config: &DisplayConfig,
) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(buf.area, &mut buf, config);
    buf
}

/// The text content of one buffer line, including trailing spaces.
pub fn buffer_line(buf: &Buffer, line: u16) -> String {
    let area = buf.area();
    let mut output = String::new();
    for x in 0..area.width {
        output.push_str(buf[(x, line)].symbol());
    }
    output
}

/// Assert that a buffer line matches the expected string exactly.
pub fn assert_buffer_line(buf: &Buffer, line: u16, expected: &str) {
    let actual = buffer_line(buf, line);
    assert_eq!(
        actual, expected,
        "\nLine {} mismatch:\nExpected: {}\nActual:   {}",
        line, expected, actual
    );
}

/// True if any buffer line contains the needle.
pub fn buffer_contains(buf: &Buffer, needle: &str) -> bool {
    (0..buf.area().height).any(|line| buffer_line(buf, line).contains(needle))
}
