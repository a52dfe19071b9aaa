use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One side of a game as shown on a card.
///
/// Every field is display-ready: missing upstream data has already been
/// substituted with defaults by the mapping layer, so rendering code never
/// has to handle absent names or scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub abbreviation: String,
    pub logo: Option<String>,
    /// Score as the provider sends it (a string, "0" when not started).
    pub score: String,
}

/// One sporting event with two teams, scores, and a live/scheduled status.
///
/// Identified by the provider-assigned `id`, which is stable across
/// refreshes for the same event. Immutable per fetch; the selection store
/// swaps whole records on reconcile rather than patching fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    /// League display name, e.g. "NFL".
    pub sport: String,
    pub sport_icon: String,
    pub home_team: Team,
    pub away_team: Team,
    /// Short state text, e.g. "In Progress".
    pub status: String,
    /// Detailed state text, e.g. "3rd Quarter - 4:12".
    pub status_detail: String,
    pub is_live: bool,
    pub start_time: DateTime<Utc>,
}

impl Team {
    /// Abbreviation when the provider sent one, full name otherwise.
    pub fn abbreviation_or_name(&self) -> &str {
        if self.abbreviation.is_empty() {
            &self.name
        } else {
            &self.abbreviation
        }
    }
}

impl Game {
    /// Display ordering: live games first, then ascending start time.
    ///
    /// Live games compare equal to each other so a stable sort preserves
    /// their fetch order (leagues in configuration order).
    pub fn display_cmp(&self, other: &Game) -> Ordering {
        match (self.is_live, other.is_live) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => Ordering::Equal,
            (false, false) => self.start_time.cmp(&other.start_time),
        }
    }
}

/// Sort games for display: live first (stable), then by start time.
pub fn sort_for_display(games: &mut [Game]) {
    games.sort_by(|a, b| a.display_cmp(b));
}
