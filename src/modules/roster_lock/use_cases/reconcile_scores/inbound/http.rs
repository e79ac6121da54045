use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::modules::roster_lock::core::errors::RosterLockError;
use crate::modules::roster_lock::use_cases::lock_snapshots::handler::LockScope;
use crate::shared::core::primitives::{MatchupId, TeamId};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ScoreParams {
    /// `YYYY-MM-DD`. Without it the whole matchup period is returned.
    pub date: Option<NaiveDate>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path((team_id, matchup_id)): Path<(TeamId, MatchupId)>,
    Query(params): Query<ScoreParams>,
) -> impl IntoResponse {
    state.lock_coordinator.run(LockScope::Team(team_id)).await;
    let result = match params.date {
        Some(date) => state
            .reconciler
            .daily_score(team_id, matchup_id, date)
            .await
            .map(|score| Json(score).into_response()),
        None => state
            .reconciler
            .period_score(team_id, matchup_id)
            .await
            .map(|period| Json(period).into_response()),
    };
    match result {
        Ok(response) => response,
        Err(error) => status_for(&error).into_response(),
    }
}

fn status_for(error: &RosterLockError) -> StatusCode {
    if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        tracing::error!(%error, "score read failed");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
