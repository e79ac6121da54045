use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::roster_lock::use_cases::track_attribution::handler::DroppedContributor;
use crate::shared::core::primitives::{MatchupId, PlayerId, TeamId};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlDroppedContributor {
    pub player_id: PlayerId,
    pub locked_days: usize,
    pub active_days: usize,
    /// Decimal points as a string.
    pub points: String,
    pub last_snapshot_on: String,
}

impl From<DroppedContributor> for GqlDroppedContributor {
    fn from(d: DroppedContributor) -> Self {
        Self {
            player_id: d.player_id,
            locked_days: d.locked_days,
            active_days: d.active_days,
            points: d.points.normalize().to_string(),
            last_snapshot_on: d.last_snapshot_on.to_string(),
        }
    }
}

#[derive(Default)]
pub struct AttributionQuery;

#[Object]
impl AttributionQuery {
    async fn dropped_contributors(
        &self,
        context: &Context<'_>,
        team_id: TeamId,
        matchup_id: MatchupId,
    ) -> GqlResult<Vec<GqlDroppedContributor>> {
        let state = context.data_unchecked::<AppState>();
        let dropped = state.tracker.dropped_contributors(team_id, matchup_id).await?;
        Ok(dropped.into_iter().map(Into::into).collect())
    }
}
