use crate::shared::core::primitives::{MatchupId, TeamId};
use crate::shared::infrastructure::snapshot_store::SnapshotStoreError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterLockError {
    #[error("no current lineup for team {team_id}")]
    LineupNotFound { team_id: TeamId },

    #[error("matchup {matchup_id} not found")]
    MatchupNotFound { matchup_id: MatchupId },

    #[error("team {team_id} does not play in matchup {matchup_id}")]
    TeamNotInMatchup { team_id: TeamId, matchup_id: MatchupId },

    #[error("{date} is before today and its snapshots are locked")]
    HistoricalDate { date: NaiveDate },

    #[error(transparent)]
    Store(#[from] SnapshotStoreError),

    #[error("source unavailable: {0}")]
    Source(#[from] anyhow::Error),
}

impl RosterLockError {
    /// Missing collaborator data. Batch callers skip the unit instead of failing it.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RosterLockError::LineupNotFound { .. }
                | RosterLockError::MatchupNotFound { .. }
                | RosterLockError::TeamNotInMatchup { .. }
        )
    }
}
