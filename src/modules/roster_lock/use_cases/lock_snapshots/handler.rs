// Lock coordinator, the only writer allowed to flip a snapshot to locked.
//
// Responsibilities
// - Load unlocked rows dated today or earlier, for every team or for one team.
// - Ask the game feed only about today's rows. Past rows lock on the calendar alone.
// - Apply the pure lock policy and transition eligible rows with the store's conditional lock.
//
// Boundaries
// - Never raises. A failed read or write leaves rows unlocked for the next pass and is counted.
// - Safe to run from several callers at once; re-locking is a no-op.

use crate::modules::roster_lock::core::lock_policy::{LockDecision, decide_lock};
use crate::shared::core::primitives::TeamId;
use crate::shared::infrastructure::clock::Clock;
use crate::shared::infrastructure::league_data::GameFeed;
use crate::shared::infrastructure::snapshot_store::{RowChange, SnapshotStore};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockScope {
    All,
    Team(TeamId),
}

impl LockScope {
    fn team_id(self) -> Option<TeamId> {
        match self {
            LockScope::All => None,
            LockScope::Team(team_id) => Some(team_id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LockSummary {
    pub evaluated: usize,
    pub locked: usize,
    pub held: usize,
    pub errors: usize,
}

pub struct LockCoordinator<TStore, TGames>
where
    TStore: SnapshotStore + 'static,
    TGames: GameFeed + 'static,
{
    store: Arc<TStore>,
    games: Arc<TGames>,
    clock: Arc<dyn Clock>,
}

impl<TStore, TGames> LockCoordinator<TStore, TGames>
where
    TStore: SnapshotStore + 'static,
    TGames: GameFeed + 'static,
{
    pub fn new(store: Arc<TStore>, games: Arc<TGames>, clock: Arc<dyn Clock>) -> Self {
        Self { store, games, clock }
    }

    pub async fn run(&self, scope: LockScope) -> LockSummary {
        let today = self.clock.today();
        let mut summary = LockSummary::default();
        let rows = match self.store.list_unlocked(scope.team_id(), today).await {
            Ok(rows) => rows,
            Err(error) => {
                tracing::error!(%error, ?scope, "could not load unlocked snapshots");
                summary.errors += 1;
                return summary;
            }
        };

        for row in rows {
            summary.evaluated += 1;
            let status = if row.date() == today {
                match self.games.game_status(row.player_id(), today).await {
                    Ok(status) => status,
                    Err(error) => {
                        tracing::warn!(key = %row.key, %error, "game feed unavailable, row stays unlocked");
                        summary.errors += 1;
                        continue;
                    }
                }
            } else {
                None
            };

            let decision = decide_lock(&row, today, status);
            let LockDecision::Lock(trigger) = decision else {
                tracing::debug!(key = %row.key, ?decision, "snapshot held");
                summary.held += 1;
                continue;
            };
            match self.store.lock(&row.key, self.clock.now()).await {
                Ok(RowChange::Applied) => {
                    tracing::debug!(key = %row.key, ?trigger, "snapshot locked");
                    summary.locked += 1;
                }
                Ok(_) => summary.held += 1,
                Err(error) => {
                    tracing::warn!(key = %row.key, %error, "lock write failed, row stays unlocked");
                    summary.errors += 1;
                }
            }
        }

        tracing::info!(
            ?scope,
            %today,
            evaluated = summary.evaluated,
            locked = summary.locked,
            errors = summary.errors,
            "lock evaluation finished"
        );
        summary
    }
}
