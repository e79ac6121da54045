use async_graphql::{Context, ID, Object, Result as GqlResult, SimpleObject};

use crate::modules::roster_lock::use_cases::audit_integrity::inbound::graphql::GqlAuditReport;
use crate::modules::roster_lock::use_cases::backfill_snapshots::handler::BackfillReport;
use crate::modules::roster_lock::use_cases::generate_snapshots::inbound::graphql::GqlGenerationSummary;
use crate::shell::graphql::parse_date;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlBackfillReport {
    pub run_id: ID,
    pub units: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub generation: GqlGenerationSummary,
    pub audit: GqlAuditReport,
}

impl From<BackfillReport> for GqlBackfillReport {
    fn from(r: BackfillReport) -> Self {
        Self {
            run_id: ID(r.run_id.to_string()),
            units: r.units,
            succeeded: r.succeeded,
            skipped: r.skipped,
            failed: r.failed,
            generation: r.generation.into(),
            audit: r.audit.into(),
        }
    }
}

#[derive(Default)]
pub struct BackfillMutation;

#[Object]
impl BackfillMutation {
    /// Backfills every matchup covering `date`, today when omitted.
    async fn backfill(&self, context: &Context<'_>, date: Option<String>) -> GqlResult<GqlBackfillReport> {
        let state = context.data_unchecked::<AppState>();
        let date = match date {
            Some(date) => parse_date(&date)?,
            None => state.clock.today(),
        };
        let report = state.backfill.run_for_date(date).await?;
        Ok(report.into())
    }
}
