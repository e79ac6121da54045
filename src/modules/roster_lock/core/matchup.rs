// A head-to-head scoring period between two teams.
//
// Purpose
// - Define the date range snapshots must cover. Immutable once created.

use crate::shared::core::primitives::{DateRange, LeagueId, MatchupId, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub matchup_id: MatchupId,
    pub league_id: LeagueId,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

impl Matchup {
    pub fn week(&self) -> DateRange {
        DateRange::new(self.week_start, self.week_end)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.week().contains(date)
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }

    pub fn opponent_of(&self, team_id: TeamId) -> Option<TeamId> {
        if self.team1_id == team_id {
            Some(self.team2_id)
        } else if self.team2_id == team_id {
            Some(self.team1_id)
        } else {
            None
        }
    }

    pub fn teams(&self) -> [TeamId; 2] {
        [self.team1_id, self.team2_id]
    }
}
