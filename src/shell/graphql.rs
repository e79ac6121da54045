use async_graphql::{EmptySubscription, MergedObject, Schema};
use chrono::NaiveDate;

use crate::modules::roster_lock::use_cases::audit_integrity::inbound::graphql::AuditIntegrityMutation;
use crate::modules::roster_lock::use_cases::backfill_snapshots::inbound::graphql::BackfillMutation;
use crate::modules::roster_lock::use_cases::generate_snapshots::inbound::graphql::GenerateSnapshotsMutation;
use crate::modules::roster_lock::use_cases::list_snapshots::inbound::graphql::SnapshotsQuery;
use crate::modules::roster_lock::use_cases::lock_snapshots::inbound::graphql::LockSnapshotsMutation;
use crate::modules::roster_lock::use_cases::reconcile_scores::inbound::graphql::ScoresQuery;
use crate::modules::roster_lock::use_cases::track_attribution::inbound::graphql::AttributionQuery;
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(SnapshotsQuery, ScoresQuery, AttributionQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    GenerateSnapshotsMutation,
    LockSnapshotsMutation,
    AuditIntegrityMutation,
    BackfillMutation,
);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

/// Dates cross the GraphQL boundary as `YYYY-MM-DD` strings.
pub fn parse_date(value: &str) -> async_graphql::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| async_graphql::Error::new(format!("invalid date {value}, expected YYYY-MM-DD")))
}
