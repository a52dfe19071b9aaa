//! `scorewatch games` - one-shot listing of the currently available games.

use crate::config::DisplayConfig;
use crate::formatting::format_header;
use crate::layout_constants::CLI_MATCHUP_WIDTH;
use crate::provider::ScoreProvider;
use crate::types::Game;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};

pub async fn run(
    provider: &dyn ScoreProvider,
    id: Option<String>,
    display: &DisplayConfig,
) -> Result<()> {
    match id {
        Some(id) => run_single(provider, &id, display).await,
        None => run_list(provider, display).await,
    }
}

async fn run_list(provider: &dyn ScoreProvider, display: &DisplayConfig) -> Result<()> {
    let games = provider
        .available_games()
        .await
        .context("Failed to fetch available games")?;

    println!();
    print!("{}", format_header("LIVE & UPCOMING GAMES", true, display));

    if games.is_empty() {
        println!("No live games or games starting within the next hour.\n");
        return Ok(());
    }

    for game in &games {
        println!("{}", format_game_line(game, display));
    }
    println!();

    Ok(())
}

async fn run_single(provider: &dyn ScoreProvider, id: &str, display: &DisplayConfig) -> Result<()> {
    let game = provider
        .game_by_id(id)
        .await
        .context("Failed to fetch available games")?;

    match game {
        Some(game) => {
            println!("{}", format_game_line(&game, display));
            println!("  {}", game.status_detail);
        }
        None => println!("No live or upcoming game with id {}", id),
    }

    Ok(())
}

/// One listing line: league, matchup with scores, and state.
pub fn format_game_line(game: &Game, display: &DisplayConfig) -> String {
    let matchup = format!(
        "{} {} @ {} {}",
        game.away_team.abbreviation_or_name(),
        game.away_team.score,
        game.home_team.abbreviation_or_name(),
        game.home_team.score,
    );
    let state = if game.is_live {
        "LIVE".to_string()
    } else {
        let local: DateTime<Local> = game.start_time.into();
        local.format(&display.time_format).to_string()
    };
    format!(
        "{:<16} {:<width$} {}",
        game.sport,
        matchup,
        state,
        width = CLI_MATCHUP_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{live_game, scheduled_game};

    #[test]
    fn live_games_show_live_marker() {
        let display = DisplayConfig::default();
        let line = format_game_line(&live_game("a"), &display);
        assert!(line.starts_with("NHL"));
        assert!(line.contains("AWY 3 @ HOM 2"));
        assert!(line.ends_with("LIVE"));
    }

    #[test]
    fn scheduled_games_show_start_time() {
        let display = DisplayConfig::default();
        let line = format_game_line(&scheduled_game("a", 30), &display);
        assert!(line.contains("AWY 0 @ HOM 0"));
        assert!(!line.contains("LIVE"));
    }

    #[test]
    fn abbreviation_falls_back_to_name() {
        let mut game = live_game("a");
        game.away_team.abbreviation = String::new();
        let display = DisplayConfig::default();
        let line = format_game_line(&game, &display);
        assert!(line.contains("AWY Town 3 @ HOM 2"));
    }
}
