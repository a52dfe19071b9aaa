//! Deterministic fixture data shared by unit tests and benchmarks.
//!
//! All timestamps are fixed so assertions never depend on the wall clock;
//! tests that exercise the live/upcoming window pass their own `now`.

use crate::types::{Game, Team};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// A fixed reference instant used as "now" across tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 1, 18, 0, 0).unwrap()
}

pub fn team(abbreviation: &str, score: &str) -> Team {
    Team {
        name: format!("{} Town", abbreviation),
        abbreviation: abbreviation.to_string(),
        logo: None,
        score: score.to_string(),
    }
}

/// A live game that started an hour before [`fixed_now`].
pub fn live_game(id: &str) -> Game {
    Game {
        id: id.to_string(),
        sport: "NHL".to_string(),
        sport_icon: "#".to_string(),
        home_team: team("HOM", "2"),
        away_team: team("AWY", "3"),
        status: "In Progress".to_string(),
        status_detail: "2nd Period".to_string(),
        is_live: true,
        start_time: fixed_now() - Duration::hours(1),
    }
}

/// A scheduled game starting `minutes_from_now` after [`fixed_now`].
pub fn scheduled_game(id: &str, minutes_from_now: i64) -> Game {
    Game {
        id: id.to_string(),
        sport: "NFL".to_string(),
        sport_icon: "*".to_string(),
        home_team: team("HOM", "0"),
        away_team: team("AWY", "0"),
        status: "Scheduled".to_string(),
        status_detail: "7:00 PM".to_string(),
        is_live: false,
        start_time: fixed_now() + Duration::minutes(minutes_from_now),
    }
}

/// A mixed batch of `live` live games followed by `scheduled` scheduled
/// games, ids `live-0..` / `sched-0..`, scheduled starts spaced 5 minutes
/// apart. Used by the sort/reconcile benchmarks.
pub fn game_batch(live: usize, scheduled: usize) -> Vec<Game> {
    let mut games = Vec::with_capacity(live + scheduled);
    for i in 0..live {
        games.push(live_game(&format!("live-{}", i)));
    }
    for i in 0..scheduled {
        games.push(scheduled_game(&format!("sched-{}", i), 5 * (i as i64 + 1)));
    }
    games
}
