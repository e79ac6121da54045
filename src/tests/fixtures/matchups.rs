use crate::modules::roster_lock::core::matchup::Matchup;
use chrono::NaiveDate;

pub const MATCHUP_ID: i64 = 10;
pub const TEAM_A: i64 = 1;
pub const TEAM_B: i64 = 2;

pub fn december(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
}

/// Team 1 against team 2, Monday Dec 8 through Sunday Dec 14.
pub fn make_week_matchup() -> Matchup {
    Matchup {
        matchup_id: MATCHUP_ID,
        league_id: 1,
        team1_id: TEAM_A,
        team2_id: TEAM_B,
        week_start: december(8),
        week_end: december(14),
    }
}
