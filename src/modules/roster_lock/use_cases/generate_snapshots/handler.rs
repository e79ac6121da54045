// Snapshot generation orchestrates the insert-only write flow.
//
// Responsibilities
// - Read the current lineup and the matchup once per run.
// - Build one row per (lineup member, covered date) and skip keys that already exist.
// - Insert pending rows as one batch, falling back to single inserts when the batch fails.
// - Rows for past dates are inserted locked, rows for today or later unlocked.
// - A day is sealed once the team has a locked row on it, or once it is past and has any row.
//   Players who join later never get a row on a sealed day.
// - Rows whose insert failed are kept by the store and retried on the next run, sealed day or not.
//
// Boundaries
// - Never updates or deletes an existing row. A date outside the matchup is skipped, not fatal.

use crate::modules::roster_lock::core::errors::RosterLockError;
use crate::modules::roster_lock::core::snapshot::{RosterSnapshot, SnapshotKey};
use crate::modules::roster_lock::use_cases::generate_snapshots::command::GenerateSnapshots;
use crate::shared::infrastructure::clock::Clock;
use crate::shared::infrastructure::league_data::{LineupSource, MatchupSource};
use crate::shared::infrastructure::snapshot_store::{SnapshotStore, SnapshotStoreError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::AddAssign;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub attempted: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dates_skipped: usize,
}

impl AddAssign for GenerationSummary {
    fn add_assign(&mut self, other: Self) {
        self.attempted += other.attempted;
        self.inserted += other.inserted;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.dates_skipped += other.dates_skipped;
    }
}

pub struct GenerateSnapshotsHandler<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + 'static,
{
    store: Arc<TStore>,
    league: Arc<TLeague>,
    clock: Arc<dyn Clock>,
}

impl<TStore, TLeague> Clone for GenerateSnapshotsHandler<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            league: self.league.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<TStore, TLeague> GenerateSnapshotsHandler<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + 'static,
{
    pub fn new(store: Arc<TStore>, league: Arc<TLeague>, clock: Arc<dyn Clock>) -> Self {
        Self { store, league, clock }
    }

    pub async fn handle(&self, command: GenerateSnapshots) -> Result<GenerationSummary, RosterLockError> {
        let team_id = command.team_id;
        let matchup_id = command.matchup_id;
        let lineup = self
            .league
            .current_lineup(team_id)
            .await?
            .ok_or(RosterLockError::LineupNotFound { team_id })?;
        let matchup = self
            .league
            .matchup(matchup_id)
            .await?
            .ok_or(RosterLockError::MatchupNotFound { matchup_id })?;
        if !matchup.involves(team_id) {
            return Err(RosterLockError::TeamNotInMatchup { team_id, matchup_id });
        }

        let range = command.range.unwrap_or_else(|| matchup.week());
        let today = self.clock.today();
        let now = self.clock.now();
        let players: Vec<_> = lineup
            .members()
            .into_iter()
            .filter(|player_id| command.wants(*player_id))
            .collect();
        let rows = self.store.list_for_team(team_id, Some(matchup_id), range).await?;
        let existing: HashSet<SnapshotKey> = rows.iter().map(|row| row.key).collect();
        let sealed: HashSet<NaiveDate> = rows
            .iter()
            .filter(|row| row.is_locked() || row.date() < today)
            .map(|row| row.date())
            .collect();

        let mut summary = GenerationSummary::default();
        let mut to_insert = Vec::new();
        let mut retried = HashSet::new();
        for failed in self.store.list_failed_inserts(team_id, matchup_id, range).await? {
            if !command.wants(failed.player_id()) {
                continue;
            }
            summary.attempted += 1;
            retried.insert(failed.key);
            if existing.contains(&failed.key) {
                summary.skipped += 1;
                self.forget_failure(&failed.key).await;
                continue;
            }
            to_insert.push(RosterSnapshot::for_generation(failed.key, failed.slot(), today, now));
        }

        for date in range.days() {
            if !matchup.covers(date) {
                tracing::warn!(team_id, matchup_id, %date, "no scoring period covers date, skipping");
                summary.dates_skipped += 1;
                continue;
            }
            for &player_id in &players {
                let Some(slot) = lineup.slot_of(player_id) else {
                    continue;
                };
                let key = SnapshotKey {
                    team_id,
                    matchup_id,
                    player_id,
                    date,
                };
                if retried.contains(&key) {
                    continue;
                }
                summary.attempted += 1;
                if sealed.contains(&date) || existing.contains(&key) {
                    summary.skipped += 1;
                    continue;
                }
                to_insert.push(RosterSnapshot::for_generation(key, slot, today, now));
            }
        }

        self.write(to_insert, &retried, &mut summary).await;
        tracing::info!(
            team_id,
            matchup_id,
            attempted = summary.attempted,
            inserted = summary.inserted,
            skipped = summary.skipped,
            failed = summary.failed,
            retried = retried.len(),
            "snapshot generation finished"
        );
        Ok(summary)
    }

    async fn write(&self, rows: Vec<RosterSnapshot>, retried: &HashSet<SnapshotKey>, summary: &mut GenerationSummary) {
        if rows.is_empty() {
            return;
        }
        let count = rows.len();
        match self.store.insert_batch(rows.clone()).await {
            Ok(()) => {
                summary.inserted += count;
                for key in rows.iter().map(|row| row.key).filter(|key| retried.contains(key)) {
                    self.forget_failure(&key).await;
                }
            }
            Err(error) => {
                tracing::debug!(%error, rows = count, "batch insert failed, retrying rows individually");
                for snapshot in rows {
                    let key = snapshot.key;
                    match self.store.insert(snapshot.clone()).await {
                        Ok(()) => summary.inserted += 1,
                        Err(SnapshotStoreError::Duplicate { .. }) => summary.skipped += 1,
                        Err(error) => {
                            tracing::warn!(%key, %error, "snapshot insert failed");
                            summary.failed += 1;
                            self.remember_failure(snapshot).await;
                            continue;
                        }
                    }
                    if retried.contains(&key) {
                        self.forget_failure(&key).await;
                    }
                }
            }
        }
    }

    async fn remember_failure(&self, snapshot: RosterSnapshot) {
        let key = snapshot.key;
        if let Err(error) = self.store.record_failed_insert(snapshot).await {
            tracing::error!(%key, %error, "failed insert could not be recorded for retry");
        }
    }

    async fn forget_failure(&self, key: &SnapshotKey) {
        if let Err(error) = self.store.clear_failed_insert(key).await {
            tracing::warn!(%key, %error, "retried insert could not be cleared");
        }
    }
}

#[cfg(test)]
mod generate_snapshots_handler_tests {
    use super::*;
    use crate::modules::roster_lock::core::lineup::SlotType;
    use crate::shared::core::primitives::DateRange;
    use crate::shared::infrastructure::snapshot_store::in_memory::InMemorySnapshotStore;
    use crate::tests::fixtures::lineups::LineupConfigBuilder;
    use crate::tests::fixtures::matchups::{MATCHUP_ID, TEAM_A, december};
    use crate::tests::fixtures::pipeline::Pipeline;
    use crate::tests::fixtures::snapshots::{at, key};
    use rstest::{fixture, rstest};
    use tokio::join;

    #[fixture]
    async fn monday() -> Pipeline {
        Pipeline::team_a_week(december(8)).await
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_one_unlocked_row_per_player_and_day(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let summary = pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .expect("generation failed");
        assert_eq!(summary.inserted, 21);
        assert_eq!(summary.attempted, 21);
        let rows = pipeline.store.all().await;
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|row| !row.is_locked()));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_take_slot_type_and_id_from_the_lineup(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();
        let starter = pipeline.store.get(&key(101, december(9))).await.unwrap().unwrap();
        let bench = pipeline.store.get(&key(103, december(9))).await.unwrap().unwrap();
        assert_eq!((starter.slot_type, starter.slot_id), (SlotType::Active, Some(1)));
        assert_eq!((bench.slot_type, bench.slot_id), (SlotType::Bench, Some(10)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_be_a_no_op_the_second_time(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let generator = pipeline.generator();
        generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();
        let before = pipeline.store.all().await;
        let summary = generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.skipped, 21);
        assert_eq!(pipeline.store.all().await, before);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_prelock_rows_for_past_dates() {
        let pipeline = Pipeline::team_a_week(december(11)).await;
        pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();
        for row in pipeline.store.all().await {
            assert_eq!(row.is_locked(), row.key.date < december(11), "{}", row.key);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_add_players_to_a_recorded_past_day(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let generator = pipeline.generator();
        generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID).within(DateRange::single(december(8))))
            .await
            .unwrap();
        pipeline.clock.set_today(december(10));
        pipeline
            .league
            .put_lineup(LineupConfigBuilder::new().bench(vec![103, 104]).build())
            .await;

        let summary = generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();

        assert!(pipeline.store.get(&key(104, december(8))).await.unwrap().is_none());
        let gap_day = pipeline.store.get(&key(104, december(9))).await.unwrap().unwrap();
        assert!(gap_day.is_locked());
        assert_eq!(summary.skipped, 4);
        assert_eq!(summary.inserted, 24);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_add_players_to_a_day_that_already_locked(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let generator = pipeline.generator();
        generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();
        pipeline.store.lock(&key(101, december(8)), at(december(8), 19)).await.unwrap();
        pipeline
            .league
            .put_lineup(LineupConfigBuilder::new().starters(vec![102, 104]).build())
            .await;

        let summary = generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();

        assert_eq!(summary.inserted, 6);
        assert!(pipeline.store.get(&key(104, december(8))).await.unwrap().is_none());
        for day in 9..=14 {
            let row = pipeline.store.get(&key(104, december(day))).await.unwrap().unwrap();
            assert!(!row.is_locked());
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_land_a_failed_row_on_a_later_run_even_once_the_day_is_past() {
        let store = InMemorySnapshotStore::new();
        store.fail_writes_for(103).await;
        let pipeline = Pipeline::with_store(store, december(8)).await;
        let generator = pipeline.generator();
        generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();
        pipeline.store.clear_failures().await;
        pipeline.clock.set_today(december(9));
        pipeline.store.lock(&key(101, december(8)), at(december(8), 19)).await.unwrap();

        let summary = generator
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();

        assert_eq!(summary.inserted, 7);
        assert_eq!(summary.failed, 0);
        let monday = pipeline.store.get(&key(103, december(8))).await.unwrap().unwrap();
        assert!(monday.is_locked());
        assert_eq!(monday.slot_type, SlotType::Bench);
        let tuesday = pipeline.store.get(&key(103, december(9))).await.unwrap().unwrap();
        assert!(!tuesday.is_locked());
        let week = DateRange::new(december(8), december(14));
        assert!(pipeline.store.list_failed_inserts(TEAM_A, MATCHUP_ID, week).await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_skip_dates_outside_the_matchup(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let summary = pipeline
            .generator()
            .handle(
                GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID)
                    .within(DateRange::new(december(13), december(16))),
            )
            .await
            .unwrap();
        assert_eq!(summary.dates_skipped, 2);
        assert_eq!(summary.inserted, 6);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_generate_exactly_one_player_and_day(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let summary = pipeline
            .generator()
            .handle(GenerateSnapshots::for_player_on(TEAM_A, MATCHUP_ID, 102, december(10)))
            .await
            .unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(pipeline.store.all().await[0].key, key(102, december(10)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_without_a_lineup(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        pipeline.league.remove_lineup(TEAM_A).await;
        let result = pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await;
        assert!(matches!(result, Err(RosterLockError::LineupNotFound { team_id: TEAM_A })));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_for_an_unknown_matchup_or_foreign_team(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let unknown = pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(TEAM_A, 99))
            .await;
        assert!(matches!(unknown, Err(RosterLockError::MatchupNotFound { matchup_id: 99 })));

        pipeline.league.put_lineup(LineupConfigBuilder::new().team_id(3).build()).await;
        let foreign = pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(3, MATCHUP_ID))
            .await;
        assert!(matches!(foreign, Err(RosterLockError::TeamNotInMatchup { team_id: 3, .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_isolate_a_failing_row_and_insert_the_rest() {
        let store = InMemorySnapshotStore::new();
        store.fail_writes_for(103).await;
        let pipeline = Pipeline::with_store(store, december(8)).await;
        let summary = pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await
            .unwrap();
        assert_eq!(summary.inserted, 14);
        assert_eq!(summary.failed, 7);
        assert_eq!(pipeline.store.len().await, 14);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_never_duplicate_under_concurrent_runs(#[future] monday: Pipeline) {
        let pipeline = monday.await;
        let first = pipeline.generator();
        let second = pipeline.generator();
        let (a, b) = join!(
            first.handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID)),
            second.handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.inserted + b.inserted, 21);
        assert_eq!(a.failed + b.failed, 0);
        assert_eq!(pipeline.store.len().await, 21);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_store_is_offline() {
        let mut store = InMemorySnapshotStore::new();
        store.toggle_offline();
        let pipeline = Pipeline::with_store(store, december(8)).await;
        let result = pipeline
            .generator()
            .handle(GenerateSnapshots::for_matchup(TEAM_A, MATCHUP_ID))
            .await;
        assert!(matches!(result, Err(RosterLockError::Store(SnapshotStoreError::Backend(_)))));
    }
}
