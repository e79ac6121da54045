// Command to materialize snapshot rows for a team in a matchup.
//
// Purpose
// - One "ensure snapshots" intent shared by the nightly job, manual backfill and on-demand repair.
//
// Responsibilities
// - `range` defaults to the matchup week when absent.
// - `players` narrows generation to some current lineup members, down to a single (player, date).

use crate::shared::core::primitives::{DateRange, MatchupId, PlayerId, TeamId};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSnapshots {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub range: Option<DateRange>,
    pub players: Option<Vec<PlayerId>>,
}

impl GenerateSnapshots {
    pub fn for_matchup(team_id: TeamId, matchup_id: MatchupId) -> Self {
        Self {
            team_id,
            matchup_id,
            range: None,
            players: None,
        }
    }

    pub fn for_player_on(team_id: TeamId, matchup_id: MatchupId, player_id: PlayerId, date: NaiveDate) -> Self {
        Self {
            team_id,
            matchup_id,
            range: Some(DateRange::single(date)),
            players: Some(vec![player_id]),
        }
    }

    pub fn within(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn wants(&self, player_id: PlayerId) -> bool {
        self.players
            .as_ref()
            .is_none_or(|players| players.contains(&player_id))
    }
}
