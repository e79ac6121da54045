use crate::modules::roster_lock::core::snapshot::RosterSnapshot;
use crate::shared::core::primitives::{MatchupId, PlayerId, SlotId, TeamId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotView {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub player_id: PlayerId,
    pub date: NaiveDate,
    pub slot_type: String,
    pub slot_id: Option<SlotId>,
    pub is_locked: bool,
    pub locked_at: Option<DateTime<Utc>>,
}

impl From<RosterSnapshot> for SnapshotView {
    fn from(row: RosterSnapshot) -> Self {
        Self {
            team_id: row.key.team_id,
            matchup_id: row.key.matchup_id,
            player_id: row.key.player_id,
            date: row.key.date,
            slot_type: row.slot_type.as_str().to_string(),
            slot_id: row.slot_id,
            is_locked: row.is_locked(),
            locked_at: row.locked_at(),
        }
    }
}
