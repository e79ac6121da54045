use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::roster_lock::use_cases::lock_snapshots::handler::{LockScope, LockSummary};
use crate::shared::core::primitives::TeamId;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlLockSummary {
    pub evaluated: usize,
    pub locked: usize,
    pub held: usize,
    pub errors: usize,
}

impl From<LockSummary> for GqlLockSummary {
    fn from(s: LockSummary) -> Self {
        Self {
            evaluated: s.evaluated,
            locked: s.locked,
            held: s.held,
            errors: s.errors,
        }
    }
}

#[derive(Default)]
pub struct LockSnapshotsMutation;

#[Object]
impl LockSnapshotsMutation {
    /// Runs one lock evaluation, for a single team or for every team.
    async fn run_lock_check(&self, context: &Context<'_>, team_id: Option<TeamId>) -> GqlResult<GqlLockSummary> {
        let state = context.data_unchecked::<AppState>();
        let scope = team_id.map_or(LockScope::All, LockScope::Team);
        Ok(state.lock_coordinator.run(scope).await.into())
    }
}
