//! ESPN scoreboard client.
//!
//! Fetches the scoreboard for every configured league concurrently,
//! keeps events that are live or starting within the next hour, and
//! normalizes them into [`Game`] records. A league whose request or
//! parse fails contributes zero games; the merged result never fails.

use crate::types::{sort_for_display, Game, Team};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use futures::future::join_all;
use serde::Deserialize;

/// Base URL of the upstream scoreboard API.
pub const BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports";

/// Per-request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// How far into the future a scheduled game may start and still be listed.
fn upcoming_window() -> Duration {
    Duration::hours(1)
}

/// One configured league source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    /// Display name, e.g. "Premier League".
    pub name: &'static str,
    /// Sport path segment of the scoreboard URL.
    pub sport: &'static str,
    /// League path segment of the scoreboard URL.
    pub league: &'static str,
    pub icon: &'static str,
}

/// The fixed set of leagues shown on the dashboard, in display order.
pub static LEAGUES: [League; 6] = [
    League { name: "NFL", sport: "football", league: "nfl", icon: "🏈" },
    League { name: "NBA", sport: "basketball", league: "nba", icon: "🏀" },
    League { name: "MLB", sport: "baseball", league: "mlb", icon: "⚾" },
    League { name: "NHL", sport: "hockey", league: "nhl", icon: "🏒" },
    League { name: "MLS", sport: "soccer", league: "usa.1", icon: "⚽" },
    League { name: "Premier League", sport: "soccer", league: "eng.1", icon: "⚽" },
];

// Wire types mirroring the scoreboard payload. Everything defaults so a
// partial payload still parses; the mapping layer fills in display
// fallbacks afterwards.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoreboardResponse {
    pub events: Vec<ScoreboardEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoreboardEvent {
    pub id: String,
    pub date: String,
    pub status: EventStatus,
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventStatus {
    #[serde(rename = "type")]
    pub kind: StatusType,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusType {
    /// "pre", "in", or "post".
    pub state: String,
    pub description: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Competition {
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competitor {
    pub home_away: String,
    pub score: String,
    pub team: CompetitorTeam,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitorTeam {
    pub display_name: String,
    pub abbreviation: String,
    pub logo: Option<String>,
}

/// HTTP client for the scoreboard API.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Client against an alternate base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Client {
            http,
            base_url: base_url.into(),
        })
    }

    async fn fetch_league(&self, league: &League) -> Result<ScoreboardResponse> {
        let url = format!(
            "{}/{}/{}/scoreboard",
            self.base_url, league.sport, league.league
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Scoreboard request for {} rejected", league.name))?;
        response
            .json::<ScoreboardResponse>()
            .await
            .with_context(|| format!("Malformed scoreboard payload for {}", league.name))
    }

    /// All live or soon-to-start games across every configured league,
    /// sorted live-first then by start time. Individual league failures
    /// are logged and contribute nothing.
    pub async fn fetch_available_games(&self) -> Result<Vec<Game>> {
        Ok(self.fetch_available_games_at(Utc::now()).await)
    }

    /// Same as [`fetch_available_games`](Self::fetch_available_games) with
    /// an explicit clock, so the window filter is deterministic in tests.
    pub async fn fetch_available_games_at(&self, now: DateTime<Utc>) -> Vec<Game> {
        let fetches = LEAGUES.iter().map(|league| async move {
            let result = self
                .fetch_league(league)
                .await
                .map(|board| league_games(league, board.events, now));
            (league, result)
        });

        merge_league_results(join_all(fetches).await)
    }

    /// Look up a single game in the current available set. Linear over the
    /// full fetch; not on a hot path.
    pub async fn fetch_game_by_id(&self, id: &str) -> Result<Option<Game>> {
        let games = self.fetch_available_games().await?;
        Ok(games.into_iter().find(|game| game.id == id))
    }
}

/// Merge per-league outcomes into one sorted list. A failed league is
/// logged and contributes nothing; it never aborts the merged result.
pub fn merge_league_results(results: Vec<(&League, Result<Vec<Game>>)>) -> Vec<Game> {
    let mut games = Vec::new();
    for (league, result) in results {
        match result {
            Ok(league_games) => games.extend(league_games),
            Err(e) => {
                tracing::warn!(league = league.name, "Scoreboard fetch failed: {:#}", e);
            }
        }
    }
    sort_for_display(&mut games);
    games
}

/// Filter and map one league's events into display records.
pub fn league_games(
    league: &League,
    events: Vec<ScoreboardEvent>,
    now: DateTime<Utc>,
) -> Vec<Game> {
    events
        .into_iter()
        .filter_map(|event| {
            let is_live = event.status.kind.state == "in";
            let start = parse_event_date(&event.date);
            if !within_window(start, is_live, now) {
                return None;
            }
            // Live events with an unparseable date keep their slot; the
            // sort only looks at start times for scheduled games.
            Some(map_event(league, event, start.unwrap_or(now)))
        })
        .collect()
}

/// An event qualifies if it is live, or scheduled strictly after `now`
/// and at most one hour out.
pub fn within_window(start: Option<DateTime<Utc>>, is_live: bool, now: DateTime<Utc>) -> bool {
    if is_live {
        return true;
    }
    match start {
        Some(start) => start > now && start <= now + upcoming_window(),
        None => false,
    }
}

/// Event timestamps arrive as RFC 3339 or the provider's minute-precision
/// variant ("2025-11-01T18:30Z").
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}

/// Map one event into a fully-populated [`Game`]. Never fails: absent
/// competitors or fields become display defaults.
pub fn map_event(league: &League, event: ScoreboardEvent, start_time: DateTime<Utc>) -> Game {
    let competitors = event
        .competitions
        .into_iter()
        .next()
        .map(|competition| competition.competitors)
        .unwrap_or_default();

    let home = competitors
        .iter()
        .find(|c| c.home_away.eq_ignore_ascii_case("home"));
    let away = competitors
        .iter()
        .find(|c| c.home_away.eq_ignore_ascii_case("away"));

    Game {
        id: event.id,
        sport: league.name.to_string(),
        sport_icon: league.icon.to_string(),
        home_team: map_team(home, "Home"),
        away_team: map_team(away, "Away"),
        status: event.status.kind.description,
        status_detail: event.status.kind.detail,
        is_live: event.status.kind.state == "in",
        start_time,
    }
}

fn map_team(competitor: Option<&Competitor>, fallback_name: &str) -> Team {
    match competitor {
        Some(c) => Team {
            name: if c.team.display_name.is_empty() {
                fallback_name.to_string()
            } else {
                c.team.display_name.clone()
            },
            abbreviation: c.team.abbreviation.clone(),
            logo: c.team.logo.clone().filter(|logo| !logo.is_empty()),
            score: if c.score.is_empty() {
                "0".to_string()
            } else {
                c.score.clone()
            },
        },
        None => Team {
            name: fallback_name.to_string(),
            abbreviation: String::new(),
            logo: None,
            score: "0".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::fixed_now;

    static NHL: &League = &LEAGUES[3];

    fn parse_events(json: &str) -> Vec<ScoreboardEvent> {
        serde_json::from_str::<ScoreboardResponse>(json)
            .expect("fixture should parse")
            .events
    }

    /// One live game and one game 30 minutes out, relative to fixed_now().
    fn sample_events() -> Vec<ScoreboardEvent> {
        parse_events(
            r#"{
              "events": [
                {
                  "id": "401001",
                  "date": "2025-11-01T17:00Z",
                  "status": {"type": {"state": "in", "description": "In Progress", "detail": "2nd Period"}},
                  "competitions": [{"competitors": [
                    {"homeAway": "home", "score": "2", "team": {"displayName": "Boston Bruins", "abbreviation": "BOS", "logo": "https://x/bos.png"}},
                    {"homeAway": "away", "score": "1", "team": {"displayName": "Montreal Canadiens", "abbreviation": "MTL", "logo": "https://x/mtl.png"}}
                  ]}]
                },
                {
                  "id": "401002",
                  "date": "2025-11-01T18:30Z",
                  "status": {"type": {"state": "pre", "description": "Scheduled", "detail": "6:30 PM UTC"}},
                  "competitions": [{"competitors": [
                    {"homeAway": "home", "score": "", "team": {"displayName": "Toronto Maple Leafs", "abbreviation": "TOR"}},
                    {"homeAway": "away", "score": "", "team": {"displayName": "Ottawa Senators", "abbreviation": "OTT"}}
                  ]}]
                }
              ]
            }"#,
        )
    }

    #[test]
    fn in_state_maps_to_live() {
        let games = league_games(NHL, sample_events(), fixed_now());
        assert_eq!(games.len(), 2);
        assert!(games[0].is_live);
        assert_eq!(games[0].status, "In Progress");
        assert_eq!(games[0].home_team.score, "2");
        assert!(!games[1].is_live);
    }

    #[test]
    fn events_outside_window_are_dropped() {
        let events = parse_events(
            r#"{
              "events": [
                {"id": "past", "date": "2025-11-01T16:00Z", "status": {"type": {"state": "post", "description": "Final", "detail": "Final"}}},
                {"id": "far", "date": "2025-11-01T19:30Z", "status": {"type": {"state": "pre", "description": "Scheduled", "detail": ""}}},
                {"id": "soon", "date": "2025-11-01T18:45Z", "status": {"type": {"state": "pre", "description": "Scheduled", "detail": ""}}}
              ]
            }"#,
        );
        let games = league_games(NHL, events, fixed_now());
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "soon");
    }

    #[test]
    fn window_boundaries() {
        let now = fixed_now();
        let hour = Duration::hours(1);
        // Starting exactly now is not "strictly after now".
        assert!(!within_window(Some(now), false, now));
        // Exactly one hour out is still included.
        assert!(within_window(Some(now + hour), false, now));
        assert!(!within_window(Some(now + hour + Duration::minutes(1)), false, now));
        // Live games qualify regardless of start.
        assert!(within_window(Some(now - hour), true, now));
        assert!(within_window(None, true, now));
        assert!(!within_window(None, false, now));
    }

    #[test]
    fn parse_event_date_accepts_both_formats() {
        let minute = parse_event_date("2025-11-01T18:30Z").unwrap();
        assert_eq!(minute, Utc.with_ymd_and_hms(2025, 11, 1, 18, 30, 0).unwrap());
        let full = parse_event_date("2025-11-01T18:30:45Z").unwrap();
        assert_eq!(full, Utc.with_ymd_and_hms(2025, 11, 1, 18, 30, 45).unwrap());
        assert!(parse_event_date("tonight").is_none());
    }

    #[test]
    fn mapping_substitutes_defaults_for_missing_fields() {
        let events = parse_events(
            r#"{
              "events": [
                {"id": "bare", "date": "2025-11-01T18:15Z", "status": {"type": {"state": "pre", "description": "Scheduled", "detail": ""}}}
              ]
            }"#,
        );
        let games = league_games(NHL, events, fixed_now());
        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.home_team.name, "Home");
        assert_eq!(game.away_team.name, "Away");
        assert_eq!(game.home_team.score, "0");
        assert_eq!(game.home_team.abbreviation, "");
        assert_eq!(game.home_team.logo, None);
    }

    #[test]
    fn mapping_carries_league_identity() {
        let games = league_games(NHL, sample_events(), fixed_now());
        assert_eq!(games[0].sport, "NHL");
        assert_eq!(games[0].sport_icon, "🏒");
        assert_eq!(games[0].home_team.abbreviation, "BOS");
        assert_eq!(games[0].away_team.name, "Montreal Canadiens");
        assert_eq!(
            games[0].home_team.logo.as_deref(),
            Some("https://x/bos.png")
        );
    }

    #[test]
    fn empty_score_becomes_zero() {
        let games = league_games(NHL, sample_events(), fixed_now());
        assert_eq!(games[1].home_team.score, "0");
        assert_eq!(games[1].away_team.score, "0");
    }

    #[test]
    fn failed_league_never_aborts_the_merge() {
        // One league's request 500s while another succeeds: the result
        // carries only the healthy league's games, sorted for display.
        use anyhow::anyhow;
        let healthy = league_games(NHL, sample_events(), fixed_now());
        let results = vec![
            (&LEAGUES[0], Err(anyhow!("HTTP 500"))),
            (NHL, Ok(healthy)),
        ];

        let merged = merge_league_results(results);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|game| game.sport == "NHL"));
        assert!(merged[0].is_live);
    }

    #[test]
    fn merge_sorts_across_leagues() {
        let nfl = &LEAGUES[0];
        let live_nhl = league_games(NHL, sample_events(), fixed_now());
        let scheduled_nfl = parse_events(
            r#"{
              "events": [
                {"id": "nfl-early", "date": "2025-11-01T18:10Z", "status": {"type": {"state": "pre", "description": "Scheduled", "detail": ""}}}
              ]
            }"#,
        );
        let results = vec![
            (nfl, Ok(league_games(nfl, scheduled_nfl, fixed_now()))),
            (NHL, Ok(live_nhl)),
        ];

        let merged = merge_league_results(results);
        // Live NHL game first, then the two scheduled games by start time.
        assert_eq!(merged[0].id, "401001");
        assert_eq!(merged[1].id, "nfl-early");
        assert_eq!(merged[2].id, "401002");
    }

    #[test]
    fn partial_payload_parses_with_defaults() {
        // Completely empty objects are valid events; they just fail the
        // window check and drop out.
        let events = parse_events(r#"{"events": [{}]}"#);
        assert_eq!(events.len(), 1);
        let games = league_games(NHL, events, fixed_now());
        assert!(games.is_empty());
    }
}
