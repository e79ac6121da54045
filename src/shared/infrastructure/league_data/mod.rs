// Ports onto collaborators this subsystem reads but never writes.
//
// Purpose
// - LineupSource: roster management's current lineup per team.
// - MatchupSource: league metadata, the scoring periods.
// - GameFeed: schedule ingestion, a player's game state on a date.
// - StatFeed: stat ingestion, a player's raw counters on a date.
// - ScoringRules: per league category weights.
//
// Boundaries
// - Read only. Missing data is `None`, an unreachable source is an error.

pub mod in_memory;

use crate::modules::roster_lock::core::game_status::GameStatus;
use crate::modules::roster_lock::core::lineup::LineupConfig;
use crate::modules::roster_lock::core::matchup::Matchup;
use crate::modules::roster_lock::core::scoring::{DailyStat, ScoringWeights};
use crate::shared::core::primitives::{LeagueId, MatchupId, PlayerId, TeamId};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait LineupSource: Send + Sync {
    async fn current_lineup(&self, team_id: TeamId) -> anyhow::Result<Option<LineupConfig>>;
}

#[async_trait]
pub trait MatchupSource: Send + Sync {
    async fn matchup(&self, matchup_id: MatchupId) -> anyhow::Result<Option<Matchup>>;
    async fn matchups_covering(&self, date: NaiveDate) -> anyhow::Result<Vec<Matchup>>;
}

#[async_trait]
pub trait GameFeed: Send + Sync {
    async fn game_status(&self, player_id: PlayerId, date: NaiveDate) -> anyhow::Result<Option<GameStatus>>;
}

#[async_trait]
pub trait StatFeed: Send + Sync {
    async fn daily_stat(&self, player_id: PlayerId, date: NaiveDate) -> anyhow::Result<Option<DailyStat>>;
}

#[async_trait]
pub trait ScoringRules: Send + Sync {
    async fn weights_for_league(&self, league_id: LeagueId) -> anyhow::Result<ScoringWeights>;
}
