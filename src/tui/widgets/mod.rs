/// Widget-based rendering infrastructure for the dashboard TUI.
///
/// Widgets are small, focused components that render themselves directly
/// into a ratatui Buffer, so they compose cleanly and can be tested in
/// isolation against expected buffer contents.

#[cfg(test)]
pub mod testing;

pub mod empty_state;
pub use empty_state::EmptyState;

pub mod game_card;
pub use game_card::GameCard;

pub mod game_grid;
pub use game_grid::{cards_per_row, GameGrid};

pub mod selection_modal;
pub use selection_modal::{ModalRow, SelectionModal};

pub mod status_bar;
pub use status_bar::{KeyHint, StatusBar};

use crate::config::DisplayConfig;
use ratatui::{buffer::Buffer, layout::Rect};
use unicode_width::UnicodeWidthChar;

/// Core trait for renderable widgets.
///
/// Widgets render into the provided buffer area using the shared display
/// configuration (colors, box characters, time format).
pub trait RenderableWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig);

    /// Preferred height, or None when the widget adapts to any height.
    fn preferred_height(&self) -> Option<u16> {
        None
    }

    /// Preferred width, or None when the widget adapts to any width.
    fn preferred_width(&self) -> Option<u16> {
        None
    }
}

/// Truncate a string to at most `width` terminal columns, appending an
/// ellipsis when anything was cut. Wide characters (CJK, emoji) count as
/// their display width.
pub fn fit_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            // Drop trailing chars until the ellipsis fits.
            while used + 1 > width {
                match out.pop() {
                    Some(last) => used -= last.width().unwrap_or(0),
                    None => break,
                }
            }
            if used < width {
                out.push('…');
            }
            return out;
        }
        used += w;
        out.push(ch);
    }
    out
}
