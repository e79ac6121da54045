// In memory implementation of the SnapshotStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep rows in an ordered map so the key is unique by construction.
// - Apply every conditional write under one write guard so concurrent callers see it atomically.
// - Simulate an offline backend and per-player write failures for error path tests.

use crate::modules::roster_lock::core::lineup::SlotAssignment;
use crate::modules::roster_lock::core::snapshot::{RosterSnapshot, SnapshotKey};
use crate::shared::core::primitives::{DateRange, MatchupId, PlayerId, TeamId};
use crate::shared::infrastructure::snapshot_store::{RowChange, SnapshotStore, SnapshotStoreError};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemorySnapshotStore {
    rows: RwLock<BTreeMap<SnapshotKey, RosterSnapshot>>,
    failed_inserts: RwLock<BTreeMap<SnapshotKey, RosterSnapshot>>,
    failing_players: RwLock<HashSet<PlayerId>>,
    is_offline: bool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Any write touching `player_id` fails with a backend error until cleared.
    pub async fn fail_writes_for(&self, player_id: PlayerId) {
        self.failing_players.write().await.insert(player_id);
    }

    pub async fn clear_failures(&self) {
        self.failing_players.write().await.clear();
    }

    pub async fn all(&self) -> Vec<RosterSnapshot> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn ensure_online(&self) -> Result<(), SnapshotStoreError> {
        if self.is_offline {
            return Err(SnapshotStoreError::Backend("Snapshot store offline".into()));
        }
        Ok(())
    }

    async fn ensure_writable(&self, key: &SnapshotKey) -> Result<(), SnapshotStoreError> {
        self.ensure_online()?;
        if self.failing_players.read().await.contains(&key.player_id) {
            return Err(SnapshotStoreError::Backend(format!("write rejected for {key}")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn insert(&self, snapshot: RosterSnapshot) -> Result<(), SnapshotStoreError> {
        self.ensure_writable(&snapshot.key).await?;
        let mut guard = self.rows.write().await;
        if guard.contains_key(&snapshot.key) {
            return Err(SnapshotStoreError::Duplicate { key: snapshot.key });
        }
        guard.insert(snapshot.key, snapshot);
        Ok(())
    }

    async fn insert_batch(&self, snapshots: Vec<RosterSnapshot>) -> Result<(), SnapshotStoreError> {
        self.ensure_online()?;
        let failing = self.failing_players.read().await.clone();
        let mut guard = self.rows.write().await;
        let mut batch_keys = HashSet::new();
        let rejected = snapshots
            .iter()
            .filter(|snapshot| {
                failing.contains(&snapshot.key.player_id)
                    || guard.contains_key(&snapshot.key)
                    || !batch_keys.insert(snapshot.key)
            })
            .count();
        if rejected > 0 {
            return Err(SnapshotStoreError::PartialBatch {
                attempted: snapshots.len(),
                rejected,
            });
        }
        for snapshot in snapshots {
            guard.insert(snapshot.key, snapshot);
        }
        Ok(())
    }

    async fn lock(&self, key: &SnapshotKey, locked_at: DateTime<Utc>) -> Result<RowChange, SnapshotStoreError> {
        self.ensure_writable(key).await?;
        let mut guard = self.rows.write().await;
        let Some(row) = guard.get_mut(key) else {
            return Ok(RowChange::Missing);
        };
        if row.is_locked() {
            return Ok(RowChange::Unchanged);
        }
        *row = row.clone().into_locked(locked_at);
        Ok(RowChange::Applied)
    }

    async fn update_unlocked(&self, key: &SnapshotKey, slot: SlotAssignment) -> Result<RowChange, SnapshotStoreError> {
        self.ensure_writable(key).await?;
        let mut guard = self.rows.write().await;
        let Some(row) = guard.get_mut(key) else {
            return Ok(RowChange::Missing);
        };
        if row.is_locked() {
            return Ok(RowChange::RejectedLocked);
        }
        if row.slot() == slot {
            return Ok(RowChange::Unchanged);
        }
        row.slot_type = slot.slot_type;
        row.slot_id = slot.slot_id;
        Ok(RowChange::Applied)
    }

    async fn remove_unlocked(&self, key: &SnapshotKey) -> Result<RowChange, SnapshotStoreError> {
        self.ensure_writable(key).await?;
        let mut guard = self.rows.write().await;
        match guard.get(key) {
            None => Ok(RowChange::Missing),
            Some(row) if row.is_locked() => Ok(RowChange::RejectedLocked),
            Some(_) => {
                guard.remove(key);
                Ok(RowChange::Applied)
            }
        }
    }

    async fn get(&self, key: &SnapshotKey) -> Result<Option<RosterSnapshot>, SnapshotStoreError> {
        self.ensure_online()?;
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn list_for_team(
        &self,
        team_id: TeamId,
        matchup_id: Option<MatchupId>,
        range: DateRange,
    ) -> Result<Vec<RosterSnapshot>, SnapshotStoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let mut rows: Vec<RosterSnapshot> = guard
            .values()
            .filter(|row| row.key.team_id == team_id)
            .filter(|row| matchup_id.is_none_or(|id| row.key.matchup_id == id))
            .filter(|row| range.contains(row.key.date))
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.key.date, row.key.player_id, row.key.matchup_id));
        Ok(rows)
    }

    async fn list_unlocked(
        &self,
        team_id: Option<TeamId>,
        through: NaiveDate,
    ) -> Result<Vec<RosterSnapshot>, SnapshotStoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard
            .values()
            .filter(|row| !row.is_locked() && row.key.date <= through)
            .filter(|row| team_id.is_none_or(|id| row.key.team_id == id))
            .cloned()
            .collect())
    }

    async fn record_failed_insert(&self, snapshot: RosterSnapshot) -> Result<(), SnapshotStoreError> {
        self.ensure_online()?;
        self.failed_inserts
            .write()
            .await
            .entry(snapshot.key)
            .or_insert(snapshot);
        Ok(())
    }

    async fn list_failed_inserts(
        &self,
        team_id: TeamId,
        matchup_id: MatchupId,
        range: DateRange,
    ) -> Result<Vec<RosterSnapshot>, SnapshotStoreError> {
        self.ensure_online()?;
        Ok(self
            .failed_inserts
            .read()
            .await
            .values()
            .filter(|row| row.key.team_id == team_id && row.key.matchup_id == matchup_id)
            .filter(|row| range.contains(row.key.date))
            .cloned()
            .collect())
    }

    async fn clear_failed_insert(&self, key: &SnapshotKey) -> Result<(), SnapshotStoreError> {
        self.ensure_online()?;
        self.failed_inserts.write().await.remove(key);
        Ok(())
    }
}
