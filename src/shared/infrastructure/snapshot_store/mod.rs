// Snapshot store port.
//
// Purpose
// - Persist roster snapshots under a unique (team, matchup, player, date) key.
//
// Responsibilities
// - Offer only primitives that are safe to re-apply from concurrent, uncoordinated writers:
//   insert-if-absent, transition-if-unlocked, and edits that refuse locked rows.
// - Batch insert is all-or-nothing. Callers fall back to single inserts when it fails.
// - Keep rows whose insert failed, as built at the time, until a later run lands them.
//
// Boundaries
// - Implementations never change a locked row.

pub mod in_memory;

use crate::modules::roster_lock::core::lineup::SlotAssignment;
use crate::modules::roster_lock::core::snapshot::{RosterSnapshot, SnapshotKey};
use crate::shared::core::primitives::{DateRange, MatchupId, TeamId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    #[error("snapshot already exists: {key}")]
    Duplicate { key: SnapshotKey },

    #[error("batch insert rejected {rejected} of {attempted} rows")]
    PartialBatch { attempted: usize, rejected: usize },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Outcome of a conditional write against an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    Applied,
    Unchanged,
    RejectedLocked,
    Missing,
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Fails with `Duplicate` when the key exists. The stored row is left as is.
    async fn insert(&self, snapshot: RosterSnapshot) -> Result<(), SnapshotStoreError>;

    async fn insert_batch(&self, snapshots: Vec<RosterSnapshot>) -> Result<(), SnapshotStoreError>;

    /// Flips an unlocked row to locked. Already locked rows report `Unchanged`.
    async fn lock(&self, key: &SnapshotKey, locked_at: DateTime<Utc>) -> Result<RowChange, SnapshotStoreError>;

    async fn update_unlocked(&self, key: &SnapshotKey, slot: SlotAssignment) -> Result<RowChange, SnapshotStoreError>;

    async fn remove_unlocked(&self, key: &SnapshotKey) -> Result<RowChange, SnapshotStoreError>;

    async fn get(&self, key: &SnapshotKey) -> Result<Option<RosterSnapshot>, SnapshotStoreError>;

    /// Rows of a team in `range`, optionally restricted to one matchup, ordered by date then player.
    async fn list_for_team(
        &self,
        team_id: TeamId,
        matchup_id: Option<MatchupId>,
        range: DateRange,
    ) -> Result<Vec<RosterSnapshot>, SnapshotStoreError>;

    /// Unlocked rows dated on or before `through`, optionally for one team.
    async fn list_unlocked(
        &self,
        team_id: Option<TeamId>,
        through: NaiveDate,
    ) -> Result<Vec<RosterSnapshot>, SnapshotStoreError>;

    /// The first recorded row for a key is kept.
    async fn record_failed_insert(&self, snapshot: RosterSnapshot) -> Result<(), SnapshotStoreError>;

    async fn list_failed_inserts(
        &self,
        team_id: TeamId,
        matchup_id: MatchupId,
        range: DateRange,
    ) -> Result<Vec<RosterSnapshot>, SnapshotStoreError>;

    async fn clear_failed_insert(&self, key: &SnapshotKey) -> Result<(), SnapshotStoreError>;
}
