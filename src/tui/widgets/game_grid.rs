/// GameGrid widget - lays out the selected games as fixed-size cards in
/// as many columns as the terminal width allows, plus an "add" cell.
use crate::config::DisplayConfig;
use crate::layout_constants::{GAME_CARD_HEIGHT, GAME_CARD_WIDTH, GAME_CARD_WITH_GAP};
use crate::tui::widgets::{GameCard, RenderableWidget};
use crate::types::Game;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// How many cards fit side by side in the given width.
pub fn cards_per_row(width: u16) -> usize {
    (((width + (GAME_CARD_WITH_GAP - GAME_CARD_WIDTH)) / GAME_CARD_WITH_GAP).max(1)) as usize
}

#[derive(Debug, Clone)]
pub struct GameGrid {
    pub games: Vec<Game>,
    /// Index of the focused card.
    pub focused: usize,
}

impl GameGrid {
    pub fn new(games: Vec<Game>, focused: usize) -> Self {
        Self { games, focused }
    }
}

impl RenderableWidget for GameGrid {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if self.games.is_empty() {
            return;
        }

        let columns = cards_per_row(area.width);
        let mut slot = 0usize;
        for (idx, game) in self.games.iter().enumerate() {
            let col = (slot % columns) as u16;
            let row = (slot / columns) as u16;
            let x = area.x + col * GAME_CARD_WITH_GAP;
            let y = area.y + row * GAME_CARD_HEIGHT;
            if y + GAME_CARD_HEIGHT > area.bottom() {
                break; // No more vertical space
            }

            let card = GameCard::new(game.clone(), idx == self.focused);
            let card_area = Rect::new(x, y, GAME_CARD_WIDTH, GAME_CARD_HEIGHT);
            card.render(card_area, buf, config);
            slot += 1;
        }

        // Trailing add cell, in the next free slot if there is room.
        let col = (slot % columns) as u16;
        let row = (slot / columns) as u16;
        let x = area.x + col * GAME_CARD_WITH_GAP;
        let y = area.y + row * GAME_CARD_HEIGHT;
        if y + GAME_CARD_HEIGHT <= area.bottom() {
            render_add_cell(Rect::new(x, y, GAME_CARD_WIDTH, GAME_CARD_HEIGHT), buf, config);
        }
    }
}

/// Empty bordered cell inviting the user to add another game.
fn render_add_cell(area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
    let chars = &config.box_chars;
    let inner_width = (GAME_CARD_WIDTH - 2) as usize;
    let horizontal = chars.horizontal.repeat(inner_width);
    let style = Style::default().fg(config.disabled_fg);

    buf.set_string(
        area.x,
        area.y,
        format!("{}{}{}", chars.top_left, horizontal, chars.top_right),
        style,
    );
    for dy in 1..GAME_CARD_HEIGHT - 1 {
        buf.set_string(area.x, area.y + dy, &chars.vertical, style);
        buf.set_string(area.x + GAME_CARD_WIDTH - 1, area.y + dy, &chars.vertical, style);
    }
    let label = "+ Add game (a)";
    let label_x = area.x + 1 + ((inner_width - label.len()) / 2) as u16;
    buf.set_string(label_x, area.y + GAME_CARD_HEIGHT / 2, label, style);
    buf.set_string(
        area.x,
        area.y + GAME_CARD_HEIGHT - 1,
        format!("{}{}{}", chars.bottom_left, horizontal, chars.bottom_right),
        style,
    );
}
