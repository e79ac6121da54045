// Wires the in memory store, league data and a fixed clock into every handler.
//
// Seeded with matchup 10 (team 1 against team 2, Dec 8 to Dec 14), team 1's fixture lineup,
// team 2's lineup (201, 202 starting, 203 on the bench), and one NHL club per player.

use crate::modules::roster_lock::use_cases::audit_integrity::handler::{AuditOptions, IntegrityAuditor};
use crate::modules::roster_lock::use_cases::backfill_snapshots::handler::BackfillRunner;
use crate::modules::roster_lock::use_cases::generate_snapshots::handler::GenerateSnapshotsHandler;
use crate::modules::roster_lock::use_cases::lock_snapshots::handler::LockCoordinator;
use crate::modules::roster_lock::use_cases::reconcile_scores::frozen_cache::FrozenScoreCache;
use crate::modules::roster_lock::use_cases::reconcile_scores::handler::ScoreReconciler;
use crate::modules::roster_lock::use_cases::track_attribution::handler::AttributionTracker;
use crate::shared::infrastructure::clock::FixedClock;
use crate::shared::infrastructure::league_data::in_memory::InMemoryLeagueData;
use crate::shared::infrastructure::snapshot_store::in_memory::InMemorySnapshotStore;
use crate::tests::fixtures::lineups::LineupConfigBuilder;
use crate::tests::fixtures::matchups::{TEAM_B, make_week_matchup};
use chrono::NaiveDate;
use std::sync::Arc;

type Store = InMemorySnapshotStore;
type League = InMemoryLeagueData;

pub struct Pipeline {
    pub store: Arc<Store>,
    pub league: Arc<League>,
    pub clock: Arc<FixedClock>,
    pub cache: Arc<FrozenScoreCache>,
}

impl Pipeline {
    pub async fn team_a_week(today: NaiveDate) -> Self {
        Self::with_store(InMemorySnapshotStore::new(), today).await
    }

    pub async fn with_store(store: InMemorySnapshotStore, today: NaiveDate) -> Self {
        let league = InMemoryLeagueData::new();
        league.put_matchup(make_week_matchup()).await;
        league.put_lineup(LineupConfigBuilder::new().build()).await;
        league
            .put_lineup(
                LineupConfigBuilder::new()
                    .team_id(TEAM_B)
                    .starters(vec![201, 202])
                    .bench(vec![203])
                    .slot_assignments(vec![])
                    .build(),
            )
            .await;
        for (player_id, club) in [
            (101, "TOR"),
            (102, "MTL"),
            (103, "BOS"),
            (104, "NYR"),
            (201, "EDM"),
            (202, "VAN"),
            (203, "CGY"),
        ] {
            league.assign_club(player_id, club).await;
        }
        Self {
            store: Arc::new(store),
            league: Arc::new(league),
            clock: Arc::new(FixedClock::at_noon(today)),
            cache: Arc::new(FrozenScoreCache::new()),
        }
    }

    pub fn generator(&self) -> GenerateSnapshotsHandler<Store, League> {
        GenerateSnapshotsHandler::new(self.store.clone(), self.league.clone(), self.clock.clone())
    }

    pub fn lock_coordinator(&self) -> LockCoordinator<Store, League> {
        LockCoordinator::new(self.store.clone(), self.league.clone(), self.clock.clone())
    }

    pub fn auditor_with(&self, options: AuditOptions) -> IntegrityAuditor<Store, League> {
        IntegrityAuditor::new(
            self.generator(),
            self.store.clone(),
            self.league.clone(),
            self.clock.clone(),
            options,
        )
    }

    pub fn auditor(&self) -> IntegrityAuditor<Store, League> {
        self.auditor_with(AuditOptions::default())
    }

    pub fn backfill(&self) -> BackfillRunner<Store, League> {
        BackfillRunner::new(self.generator(), self.auditor(), self.league.clone())
    }

    pub fn reconciler(&self) -> ScoreReconciler<Store, League> {
        ScoreReconciler::new(
            self.store.clone(),
            self.league.clone(),
            self.clock.clone(),
            self.cache.clone(),
        )
    }

    pub fn tracker(&self) -> AttributionTracker<Store, League> {
        AttributionTracker::new(self.store.clone(), self.league.clone())
    }
}
