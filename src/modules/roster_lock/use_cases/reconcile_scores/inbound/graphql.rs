use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::roster_lock::use_cases::lock_snapshots::handler::LockScope;
use crate::modules::roster_lock::use_cases::reconcile_scores::projection::{
    DailyScore, PeriodScore, PlayerContribution, Scoreboard,
};
use crate::shared::core::primitives::{MatchupId, PlayerId, TeamId};
use crate::shell::graphql::parse_date;
use crate::shell::state::AppState;

// Points travel as decimal strings so no precision is lost on the way out.

#[derive(SimpleObject, Clone)]
pub struct GqlPlayerContribution {
    pub player_id: PlayerId,
    pub slot_type: String,
    pub points: String,
    pub locked: bool,
}

impl From<PlayerContribution> for GqlPlayerContribution {
    fn from(c: PlayerContribution) -> Self {
        Self {
            player_id: c.player_id,
            slot_type: c.slot_type.as_str().to_string(),
            points: c.points.normalize().to_string(),
            locked: c.locked,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlDailyScore {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub date: String,
    pub points: String,
    pub is_final: bool,
    pub degraded: bool,
    pub contributions: Vec<GqlPlayerContribution>,
}

impl From<DailyScore> for GqlDailyScore {
    fn from(s: DailyScore) -> Self {
        Self {
            team_id: s.team_id,
            matchup_id: s.matchup_id,
            date: s.date.to_string(),
            points: s.points.normalize().to_string(),
            is_final: s.is_final,
            degraded: s.degraded,
            contributions: s.contributions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlPeriodScore {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
    pub week_start: String,
    pub week_end: String,
    pub total: String,
    pub is_final: bool,
    pub degraded: bool,
    pub days: Vec<GqlDailyScore>,
}

impl From<PeriodScore> for GqlPeriodScore {
    fn from(p: PeriodScore) -> Self {
        Self {
            team_id: p.team_id,
            matchup_id: p.matchup_id,
            week_start: p.week.start.to_string(),
            week_end: p.week.end.to_string(),
            total: p.total.normalize().to_string(),
            is_final: p.is_final,
            degraded: p.degraded,
            days: p.days.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlScoreboard {
    pub matchup_id: MatchupId,
    pub team1: GqlPeriodScore,
    pub team2: GqlPeriodScore,
    pub leader: Option<TeamId>,
    pub is_final: bool,
}

impl From<Scoreboard> for GqlScoreboard {
    fn from(b: Scoreboard) -> Self {
        Self {
            matchup_id: b.matchup_id,
            team1: b.team1.into(),
            team2: b.team2.into(),
            leader: b.leader,
            is_final: b.is_final,
        }
    }
}

#[derive(Default)]
pub struct ScoresQuery;

#[Object]
impl ScoresQuery {
    async fn daily_score(
        &self,
        context: &Context<'_>,
        team_id: TeamId,
        matchup_id: MatchupId,
        date: String,
    ) -> GqlResult<GqlDailyScore> {
        let state = context.data_unchecked::<AppState>();
        let date = parse_date(&date)?;
        state.lock_coordinator.run(LockScope::Team(team_id)).await;
        let score = state.reconciler.daily_score(team_id, matchup_id, date).await?;
        Ok(score.into())
    }

    async fn period_score(
        &self,
        context: &Context<'_>,
        team_id: TeamId,
        matchup_id: MatchupId,
    ) -> GqlResult<GqlPeriodScore> {
        let state = context.data_unchecked::<AppState>();
        state.lock_coordinator.run(LockScope::Team(team_id)).await;
        let period = state.reconciler.period_score(team_id, matchup_id).await?;
        Ok(period.into())
    }

    async fn scoreboard(&self, context: &Context<'_>, matchup_id: MatchupId) -> GqlResult<GqlScoreboard> {
        let state = context.data_unchecked::<AppState>();
        state.lock_coordinator.run(LockScope::All).await;
        let board = state.reconciler.scoreboard(matchup_id).await?;
        Ok(board.into())
    }
}
