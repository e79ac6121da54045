use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::roster_lock::use_cases::audit_integrity::handler::AuditReport;
use crate::shared::core::primitives::{MatchupId, TeamId};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlAuditReport {
    pub checked: usize,
    pub missing: usize,
    pub repaired: usize,
    pub failed: usize,
    pub drifted: usize,
    pub reslotted: usize,
    pub stale: usize,
    pub removed: usize,
    pub locked_skipped: usize,
    pub mismatches: usize,
}

impl From<AuditReport> for GqlAuditReport {
    fn from(r: AuditReport) -> Self {
        Self {
            checked: r.checked,
            missing: r.missing,
            repaired: r.repaired,
            failed: r.failed,
            drifted: r.drifted,
            reslotted: r.reslotted,
            stale: r.stale,
            removed: r.removed,
            locked_skipped: r.locked_skipped,
            mismatches: r.mismatches(),
        }
    }
}

#[derive(Default)]
pub struct AuditIntegrityMutation;

#[Object]
impl AuditIntegrityMutation {
    async fn audit_matchup(
        &self,
        context: &Context<'_>,
        team_id: TeamId,
        matchup_id: MatchupId,
    ) -> GqlResult<GqlAuditReport> {
        let state = context.data_unchecked::<AppState>();
        let report = state.auditor.audit_matchup(team_id, matchup_id).await?;
        Ok(report.into())
    }
}
