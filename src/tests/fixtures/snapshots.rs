use crate::modules::roster_lock::core::lineup::{SlotAssignment, SlotType};
use crate::modules::roster_lock::core::snapshot::{RosterSnapshot, SnapshotKey};
use crate::shared::core::primitives::PlayerId;
use crate::tests::fixtures::matchups::{MATCHUP_ID, TEAM_A};
use chrono::{DateTime, NaiveDate, Utc};

pub fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, 0, 0).unwrap().and_utc()
}

pub fn key(player_id: PlayerId, date: NaiveDate) -> SnapshotKey {
    SnapshotKey {
        team_id: TEAM_A,
        matchup_id: MATCHUP_ID,
        player_id,
        date,
    }
}

pub fn active_row(player_id: PlayerId, date: NaiveDate) -> RosterSnapshot {
    RosterSnapshot::unlocked(
        key(player_id, date),
        SlotAssignment {
            slot_type: SlotType::Active,
            slot_id: None,
        },
    )
}
