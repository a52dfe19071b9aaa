/// GameCard widget - one selected game rendered as a fixed-size card.
///
/// Fixed dimensions: 37 columns x 7 rows (borders, league header,
/// separator, two team rows, status row).
use crate::config::DisplayConfig;
use crate::layout_constants::{
    CARD_SCORE_WIDTH, CARD_TEAM_NAME_WIDTH, GAME_CARD_HEIGHT, GAME_CARD_WIDTH,
};
use crate::tui::widgets::{fit_width, RenderableWidget};
use crate::types::{Game, Team};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

/// Width of the abbreviation column in a team row.
const ABBREV_COL_WIDTH: usize = 5;

#[derive(Debug, Clone)]
pub struct GameCard {
    pub game: Game,
    /// Whether this card currently has keyboard focus.
    pub focused: bool,
}

impl GameCard {
    pub fn new(game: Game, focused: bool) -> Self {
        Self { game, focused }
    }

    fn border_style(&self, config: &DisplayConfig) -> Style {
        if self.focused {
            Style::default().fg(config.selection_fg)
        } else {
            Style::default()
        }
    }

    /// Header content: league identity left, LIVE badge right.
    fn header_line(&self, inner_width: usize) -> (String, String) {
        let left = format!(" {} {}", self.game.sport_icon, self.game.sport);
        let badge = if self.game.is_live {
            "LIVE ".to_string()
        } else {
            String::new()
        };
        (fit_width(&left, inner_width.saturating_sub(badge.width())), badge)
    }

    fn team_line(team: &Team) -> String {
        let abbrev = pad_to(&fit_width(team.abbreviation_or_name(), ABBREV_COL_WIDTH - 1), ABBREV_COL_WIDTH);
        let name = pad_to(&fit_width(&team.name, CARD_TEAM_NAME_WIDTH), CARD_TEAM_NAME_WIDTH);
        let score = fit_width(&team.score, CARD_SCORE_WIDTH);
        format!(" {}{} {:>width$}  ", abbrev, name, score, width = CARD_SCORE_WIDTH)
    }
}

/// Pad a string with spaces to an exact display width.
fn pad_to(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

impl RenderableWidget for GameCard {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width < GAME_CARD_WIDTH || area.height < GAME_CARD_HEIGHT {
            return; // Not enough space
        }

        let style = self.border_style(config);
        let chars = &config.box_chars;
        let inner_width = (GAME_CARD_WIDTH - 2) as usize;
        let x = area.x;
        let mut y = area.y;

        let horizontal = chars.horizontal.repeat(inner_width);

        // Top border
        buf.set_string(
            x,
            y,
            format!("{}{}{}", chars.top_left, horizontal, chars.top_right),
            style,
        );
        y += 1;

        // League header with LIVE badge
        let (left, badge) = self.header_line(inner_width);
        buf.set_string(x, y, &chars.vertical, style);
        buf.set_string(x + 1, y, pad_to("", inner_width), Style::default());
        buf.set_string(x + 1, y, &left, Style::default());
        if !badge.is_empty() {
            let badge_x = x + 1 + (inner_width - badge.width()) as u16;
            buf.set_string(badge_x, y, &badge, Style::default().fg(config.live_fg));
        }
        buf.set_string(x + GAME_CARD_WIDTH - 1, y, &chars.vertical, style);
        y += 1;

        // Separator between header and teams
        buf.set_string(
            x,
            y,
            format!("{}{}{}", chars.left_junction, horizontal, chars.right_junction),
            style,
        );
        y += 1;

        // Away above home, matching the upstream card layout.
        for team in [&self.game.away_team, &self.game.home_team] {
            buf.set_string(x, y, &chars.vertical, style);
            buf.set_string(x + 1, y, pad_to(&GameCard::team_line(team), inner_width), Style::default());
            buf.set_string(x + GAME_CARD_WIDTH - 1, y, &chars.vertical, style);
            y += 1;
        }

        // Status row: detail text, highlighted while live.
        let status_style = if self.game.is_live {
            Style::default().fg(config.live_fg)
        } else {
            Style::default()
        };
        let status = format!(" {}", fit_width(&self.game.status_detail, inner_width - 2));
        buf.set_string(x, y, &chars.vertical, style);
        buf.set_string(x + 1, y, pad_to("", inner_width), Style::default());
        buf.set_string(x + 1, y, &status, status_style);
        buf.set_string(x + GAME_CARD_WIDTH - 1, y, &chars.vertical, style);
        y += 1;

        // Bottom border
        buf.set_string(
            x,
            y,
            format!("{}{}{}", chars.bottom_left, horizontal, chars.bottom_right),
            style,
        );
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(GAME_CARD_HEIGHT)
    }

    fn preferred_width(&self) -> Option<u16> {
        Some(GAME_CARD_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{live_game, scheduled_game};
    use crate::tui::widgets::testing::*;

    #[test]
    fn card_renders_borders_at_fixed_size() {
        let widget = GameCard::new(scheduled_game("a", 30), false);
        let buf = render_widget(&widget, GAME_CARD_WIDTH, GAME_CARD_HEIGHT);

        let horizontal = "─".repeat(35);
        assert_buffer_line(&buf, 0, &format!("╭{}╮", horizontal));
        assert_buffer_line(&buf, 2, &format!("├{}┤", horizontal));
        assert_buffer_line(&buf, 6, &format!("╰{}╯", horizontal));
    }

    #[test]
    fn card_shows_league_and_teams() {
        let widget = GameCard::new(scheduled_game("a", 30), false);
        let buf = render_widget(&widget, GAME_CARD_WIDTH, GAME_CARD_HEIGHT);

        assert!(buffer_line(&buf, 1).contains("* NFL"));
        assert!(buffer_line(&buf, 3).contains("AWY  AWY Town"));
        assert!(buffer_line(&buf, 4).contains("HOM  HOM Town"));
        assert!(buffer_line(&buf, 5).contains("7:00 PM"));
    }

    #[test]
    fn live_card_shows_badge_and_scores() {
        let widget = GameCard::new(live_game("a"), false);
        let buf = render_widget(&widget, GAME_CARD_WIDTH, GAME_CARD_HEIGHT);

        let header = buffer_line(&buf, 1);
        assert!(header.contains("# NHL"));
        assert!(header.contains("LIVE"));
        // Scores sit right-aligned just inside the border.
        let away = buffer_line(&buf, 3);
        assert!(away.contains("AWY"));
        assert!(away.ends_with("3  │"), "away row was: {:?}", away);
        let home = buffer_line(&buf, 4);
        assert!(home.ends_with("2  │"), "home row was: {:?}", home);
        assert!(buffer_line(&buf, 5).contains("2nd Period"));
    }

    #[test]
    fn scheduled_card_has_no_badge() {
        let widget = GameCard::new(scheduled_game("a", 30), false);
        let buf = render_widget(&widget, GAME_CARD_WIDTH, GAME_CARD_HEIGHT);
        assert!(!buffer_line(&buf, 1).contains("LIVE"));
    }

    #[test]
    fn long_team_names_are_truncated() {
        let mut game = live_game("a");
        game.home_team.name = "An Extremely Long Franchise Name".to_string();
        let widget = GameCard::new(game, false);
        let buf = render_widget(&widget, GAME_CARD_WIDTH, GAME_CARD_HEIGHT);

        let home = buffer_line(&buf, 4);
        assert!(home.contains('…'), "home row was: {:?}", home);
        // The border column survives truncation.
        assert_eq!(buf[(GAME_CARD_WIDTH - 1, 4)].symbol(), "│");
    }

    #[test]
    fn card_skips_render_when_area_too_small() {
        let widget = GameCard::new(live_game("a"), false);
        let buf = render_widget(&widget, 10, 3);
        assert_eq!(buffer_line(&buf, 0).trim(), "");
    }
}
