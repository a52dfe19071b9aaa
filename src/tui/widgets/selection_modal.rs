/// SelectionModal widget - centered popup for picking a game to track.
///
/// Renders one of four bodies: a loading notice, a retryable error, an
/// empty notice, or the list of available games with LIVE/ADDED badges.
/// Games already in the selection stay visible but render disabled.
use crate::config::DisplayConfig;
use crate::tui::widgets::{fit_width, RenderableWidget};
use crate::types::Game;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Preferred modal width including borders.
const MODAL_WIDTH: u16 = 48;

/// One selectable row in the loaded list.
#[derive(Debug, Clone)]
pub struct ModalRow {
    pub game: Game,
    pub already_added: bool,
}

#[derive(Debug, Clone)]
enum Body {
    Loading,
    Error(String),
    Empty,
    Games { rows: Vec<ModalRow>, cursor: usize },
}

#[derive(Debug, Clone)]
pub struct SelectionModal {
    body: Body,
}

impl SelectionModal {
    pub fn loading() -> Self {
        Self { body: Body::Loading }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            body: Body::Error(message.into()),
        }
    }

    pub fn games(rows: Vec<ModalRow>, cursor: usize) -> Self {
        if rows.is_empty() {
            Self { body: Body::Empty }
        } else {
            Self {
                body: Body::Games { rows, cursor },
            }
        }
    }

    fn content_lines(&self) -> u16 {
        match &self.body {
            Body::Loading => 1,
            Body::Error(_) => 2,
            Body::Empty => 2,
            Body::Games { rows, .. } => rows.len() as u16,
        }
    }
}

impl RenderableWidget for SelectionModal {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let modal_width = MODAL_WIDTH.min(area.width.saturating_sub(2));
        let modal_height = (self.content_lines() + 2).min(area.height);
        if modal_width < 10 || modal_height < 3 {
            return;
        }

        // Centered over the dashboard
        let modal_area = Rect {
            x: area.x + (area.width - modal_width) / 2,
            y: area.y + (area.height - modal_height) / 2,
            width: modal_width,
            height: modal_height,
        };

        Clear.render(modal_area, buf);
        let border_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(config.selection_fg))
            .title(" Select a game ");
        border_block.render(modal_area, buf);

        let inner = Rect {
            x: modal_area.x + 1,
            y: modal_area.y + 1,
            width: modal_area.width.saturating_sub(2),
            height: modal_area.height.saturating_sub(2),
        };

        match &self.body {
            Body::Loading => {
                buf.set_string(inner.x + 1, inner.y, "Loading games…", Style::default());
            }
            Body::Error(message) => {
                let text = fit_width(message, inner.width.saturating_sub(2) as usize);
                buf.set_string(inner.x + 1, inner.y, text, Style::default().fg(config.error_fg));
                if inner.height > 1 {
                    buf.set_string(
                        inner.x + 1,
                        inner.y + 1,
                        "Press r to retry",
                        Style::default(),
                    );
                }
            }
            Body::Empty => {
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    "No live or upcoming games right now.",
                    Style::default(),
                );
                if inner.height > 1 {
                    buf.set_string(
                        inner.x + 1,
                        inner.y + 1,
                        "Check back when games are in progress.",
                        Style::default(),
                    );
                }
            }
            Body::Games { rows, cursor } => {
                render_rows(rows, *cursor, inner, buf, config);
            }
        }
    }
}

fn render_rows(rows: &[ModalRow], cursor: usize, inner: Rect, buf: &mut Buffer, config: &DisplayConfig) {
    let selector = format!("{} ", config.box_chars.selector);
    for (idx, row) in rows.iter().enumerate() {
        let y = inner.y + idx as u16;
        if y >= inner.bottom() {
            break;
        }

        let badge = if row.already_added {
            "ADDED"
        } else if row.game.is_live {
            "LIVE"
        } else {
            ""
        };

        let row_style = if row.already_added {
            Style::default().fg(config.disabled_fg)
        } else if idx == cursor {
            Style::default().fg(config.selection_fg)
        } else {
            Style::default()
        };

        if idx == cursor {
            buf.set_string(inner.x, y, &selector, Style::default().fg(config.selection_fg));
        }

        let game = &row.game;
        let text = format!(
            "{} {} {} @ {}",
            game.sport_icon,
            game.sport,
            game.away_team.abbreviation_or_name(),
            game.home_team.abbreviation_or_name(),
        );
        let text_width = (inner.width as usize).saturating_sub(2 + 1 + badge.width() + 1);
        buf.set_string(inner.x + 2, y, fit_width(&text, text_width), row_style);

        if !badge.is_empty() {
            let badge_style = if row.already_added {
                Style::default().fg(config.disabled_fg)
            } else {
                Style::default().fg(config.live_fg)
            };
            let badge_x = inner.right().saturating_sub(badge.width() as u16 + 1);
            buf.set_string(badge_x, y, badge, badge_style);
        }
    }
}
