use crate::modules::roster_lock::core::lineup::SlotType;
use crate::shared::core::primitives::{DateRange, MatchupId, PlayerId, TeamId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// What one snapshot row added to its team's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerContribution {
    pub player_id: PlayerId,
    pub slot_type: SlotType,
    pub points: Decimal,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyScore {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub date: NaiveDate,
    pub points: Decimal,
    /// Past day, with rows, all of them locked.
    pub is_final: bool,
    /// Some stat line or the league weights could not be read and counted as zero or default.
    pub degraded: bool,
    pub contributions: Vec<PlayerContribution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodScore {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub week: DateRange,
    pub total: Decimal,
    pub is_final: bool,
    pub degraded: bool,
    pub days: Vec<DailyScore>,
}

impl PeriodScore {
    pub fn from_days(team_id: TeamId, matchup_id: MatchupId, week: DateRange, days: Vec<DailyScore>) -> Self {
        Self {
            team_id,
            matchup_id,
            week,
            total: days.iter().map(|day| day.points).sum(),
            is_final: !days.is_empty() && days.iter().all(|day| day.is_final),
            degraded: days.iter().any(|day| day.degraded),
            days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub matchup_id: MatchupId,
    pub team1: PeriodScore,
    pub team2: PeriodScore,
    /// `None` while the totals are tied.
    pub leader: Option<TeamId>,
    pub is_final: bool,
}

impl Scoreboard {
    pub fn new(matchup_id: MatchupId, team1: PeriodScore, team2: PeriodScore) -> Self {
        let leader = match team1.total.cmp(&team2.total) {
            std::cmp::Ordering::Greater => Some(team1.team_id),
            std::cmp::Ordering::Less => Some(team2.team_id),
            std::cmp::Ordering::Equal => None,
        };
        Self {
            matchup_id,
            is_final: team1.is_final && team2.is_final,
            leader,
            team1,
            team2,
        }
    }
}
