use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::roster_lock::use_cases::list_snapshots::projection::SnapshotView;
use crate::shared::core::primitives::{DateRange, MatchupId, TeamId};
use crate::shell::graphql::parse_date;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlSnapshot {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub player_id: i64,
    pub date: String,
    pub slot_type: String,
    pub slot_id: Option<i64>,
    pub is_locked: bool,
    pub locked_at: Option<String>,
}

impl From<SnapshotView> for GqlSnapshot {
    fn from(v: SnapshotView) -> Self {
        Self {
            team_id: v.team_id,
            matchup_id: v.matchup_id,
            player_id: v.player_id,
            date: v.date.to_string(),
            slot_type: v.slot_type,
            slot_id: v.slot_id,
            is_locked: v.is_locked,
            locked_at: v.locked_at.map(|at| at.to_rfc3339()),
        }
    }
}

#[derive(Default)]
pub struct SnapshotsQuery;

#[Object]
impl SnapshotsQuery {
    async fn snapshots(
        &self,
        context: &Context<'_>,
        team_id: TeamId,
        from: String,
        to: String,
        matchup_id: Option<MatchupId>,
    ) -> GqlResult<Vec<GqlSnapshot>> {
        let state = context.data_unchecked::<AppState>();
        let range = DateRange::new(parse_date(&from)?, parse_date(&to)?);
        let views = state.snapshots.list(team_id, matchup_id, range).await?;
        Ok(views.into_iter().map(Into::into).collect())
    }
}
