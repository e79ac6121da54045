// RosterSnapshot is the as-of fact that a player held a slot on a team for one day.
//
// Purpose
// - Sole basis for scoring a date. Never re-derived from the live lineup once locked.
//
// Lifecycle
// - Unlocked -> Locked { locked_at }. One way, once. A locked row is immutable.
// - Rows for past dates are born locked; rows for today and later are born unlocked.
//
// Boundaries
// - No input or output here. The store enforces key uniqueness and conditional writes.

use crate::modules::roster_lock::core::lineup::{SlotAssignment, SlotType};
use crate::shared::core::primitives::{MatchupId, PlayerId, SlotId, TeamId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub player_id: PlayerId,
    pub date: NaiveDate,
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "team {} matchup {} player {} on {}",
            self.team_id, self.matchup_id, self.player_id, self.date
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LockState {
    Unlocked,
    Locked { locked_at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub key: SnapshotKey,
    pub slot_type: SlotType,
    pub slot_id: Option<SlotId>,
    pub lock: LockState,
}

impl RosterSnapshot {
    pub fn unlocked(key: SnapshotKey, slot: SlotAssignment) -> Self {
        Self {
            key,
            slot_type: slot.slot_type,
            slot_id: slot.slot_id,
            lock: LockState::Unlocked,
        }
    }

    /// Row for a day whose lock window already closed, as inserted by backfill.
    pub fn prelocked(key: SnapshotKey, slot: SlotAssignment, locked_at: DateTime<Utc>) -> Self {
        Self {
            key,
            slot_type: slot.slot_type,
            slot_id: slot.slot_id,
            lock: LockState::Locked { locked_at },
        }
    }

    /// Locked if `date` is strictly before `today`, unlocked otherwise.
    pub fn for_generation(
        key: SnapshotKey,
        slot: SlotAssignment,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        if key.date < today {
            Self::prelocked(key, slot, now)
        } else {
            Self::unlocked(key, slot)
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.lock, LockState::Locked { .. })
    }

    pub fn locked_at(&self) -> Option<DateTime<Utc>> {
        match self.lock {
            LockState::Locked { locked_at } => Some(locked_at),
            LockState::Unlocked => None,
        }
    }

    pub fn slot(&self) -> SlotAssignment {
        SlotAssignment {
            slot_type: self.slot_type,
            slot_id: self.slot_id,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.key.player_id
    }

    pub fn date(&self) -> NaiveDate {
        self.key.date
    }

    /// Locked copy of an unlocked row. A locked row is returned unchanged.
    pub fn into_locked(self, locked_at: DateTime<Utc>) -> Self {
        match self.lock {
            LockState::Locked { .. } => self,
            LockState::Unlocked => Self {
                lock: LockState::Locked { locked_at },
                ..self
            },
        }
    }
}
