//! Shared layout constants used across CLI and TUI components.

/// Width of a game card in the dashboard grid (content plus borders).
pub const GAME_CARD_WIDTH: u16 = 37;

/// Height of a game card (header + two team rows + status + borders).
pub const GAME_CARD_HEIGHT: u16 = 7;

/// Horizontal gap between cards in the grid.
pub const GAME_CARD_GAP: u16 = 2;

/// Total width a card occupies in the grid including its gap.
pub const GAME_CARD_WITH_GAP: u16 = GAME_CARD_WIDTH + GAME_CARD_GAP;

/// Width of the team name column inside a card.
pub const CARD_TEAM_NAME_WIDTH: usize = 22;

/// Width of the score column inside a card.
pub const CARD_SCORE_WIDTH: usize = 4;

/// Width of the matchup column in `scorewatch games` output.
pub const CLI_MATCHUP_WIDTH: usize = 34;
