use crate::modules::roster_lock::use_cases::audit_integrity::handler::{AuditOptions, IntegrityAuditor};
use crate::modules::roster_lock::use_cases::backfill_snapshots::handler::BackfillRunner;
use crate::modules::roster_lock::use_cases::generate_snapshots::handler::GenerateSnapshotsHandler;
use crate::modules::roster_lock::use_cases::list_snapshots::handler::ListSnapshotsHandler;
use crate::modules::roster_lock::use_cases::lock_snapshots::handler::LockCoordinator;
use crate::modules::roster_lock::use_cases::reconcile_scores::frozen_cache::FrozenScoreCache;
use crate::modules::roster_lock::use_cases::reconcile_scores::handler::ScoreReconciler;
use crate::modules::roster_lock::use_cases::track_attribution::handler::AttributionTracker;
use crate::shared::infrastructure::clock::Clock;
use crate::shared::infrastructure::league_data::in_memory::InMemoryLeagueData;
use crate::shared::infrastructure::snapshot_store::in_memory::InMemorySnapshotStore;
use std::sync::Arc;

pub type Store = InMemorySnapshotStore;
pub type League = InMemoryLeagueData;

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub generator: Arc<GenerateSnapshotsHandler<Store, League>>,
    pub lock_coordinator: Arc<LockCoordinator<Store, League>>,
    pub auditor: Arc<IntegrityAuditor<Store, League>>,
    pub backfill: Arc<BackfillRunner<Store, League>>,
    pub reconciler: Arc<ScoreReconciler<Store, League>>,
    pub tracker: Arc<AttributionTracker<Store, League>>,
    pub snapshots: Arc<ListSnapshotsHandler<Store>>,
}

impl AppState {
    pub fn new(store: Arc<Store>, league: Arc<League>, clock: Arc<dyn Clock>, audit: AuditOptions) -> Self {
        let generator = GenerateSnapshotsHandler::new(store.clone(), league.clone(), clock.clone());
        let auditor = || {
            IntegrityAuditor::new(
                generator.clone(),
                store.clone(),
                league.clone(),
                clock.clone(),
                audit,
            )
        };
        let backfill = BackfillRunner::new(generator.clone(), auditor(), league.clone());
        Self {
            lock_coordinator: Arc::new(LockCoordinator::new(store.clone(), league.clone(), clock.clone())),
            auditor: Arc::new(auditor()),
            backfill: Arc::new(backfill),
            reconciler: Arc::new(ScoreReconciler::new(
                store.clone(),
                league.clone(),
                clock.clone(),
                Arc::new(FrozenScoreCache::new()),
            )),
            tracker: Arc::new(AttributionTracker::new(store.clone(), league)),
            snapshots: Arc::new(ListSnapshotsHandler::new(store)),
            generator: Arc::new(generator),
            clock,
        }
    }
}
