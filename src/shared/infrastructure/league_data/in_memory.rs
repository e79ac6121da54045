// In memory stand-in for roster management, league metadata and the NHL feeds.
//
// Purpose
// - Exercise the pipeline in tests and local development without the upstream services.
//
// Responsibilities
// - Hold lineups, matchups, player clubs, club game states, stat lines and league weights.
// - Game state is stored per (club, date) and resolved per player through the club map.
// - Leagues without explicit weights use the configured default weights.

use crate::modules::roster_lock::core::game_status::GameStatus;
use crate::modules::roster_lock::core::lineup::LineupConfig;
use crate::modules::roster_lock::core::matchup::Matchup;
use crate::modules::roster_lock::core::scoring::{DailyStat, ScoringWeights};
use crate::shared::core::primitives::{LeagueId, MatchupId, PlayerId, TeamId};
use crate::shared::infrastructure::league_data::{
    GameFeed, LineupSource, MatchupSource, ScoringRules, StatFeed,
};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryLeagueData {
    lineups: RwLock<HashMap<TeamId, LineupConfig>>,
    matchups: RwLock<HashMap<MatchupId, Matchup>>,
    player_clubs: RwLock<HashMap<PlayerId, String>>,
    game_states: RwLock<HashMap<(String, NaiveDate), GameStatus>>,
    stats: RwLock<HashMap<(PlayerId, NaiveDate), DailyStat>>,
    failing_stats: RwLock<HashSet<PlayerId>>,
    league_weights: RwLock<HashMap<LeagueId, ScoringWeights>>,
    default_weights: ScoringWeights,
    is_offline: bool,
}

impl InMemoryLeagueData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_weights(default_weights: ScoringWeights) -> Self {
        Self {
            default_weights,
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn put_lineup(&self, lineup: LineupConfig) {
        self.lineups.write().await.insert(lineup.team_id, lineup);
    }

    pub async fn remove_lineup(&self, team_id: TeamId) {
        self.lineups.write().await.remove(&team_id);
    }

    pub async fn put_matchup(&self, matchup: Matchup) {
        self.matchups.write().await.insert(matchup.matchup_id, matchup);
    }

    pub async fn assign_club(&self, player_id: PlayerId, club: impl Into<String>) {
        self.player_clubs.write().await.insert(player_id, club.into());
    }

    pub async fn set_game_status(&self, club: impl Into<String>, date: NaiveDate, status: GameStatus) {
        self.game_states.write().await.insert((club.into(), date), status);
    }

    pub async fn put_stat(&self, stat: DailyStat) {
        self.stats.write().await.insert((stat.player_id, stat.date), stat);
    }

    /// Stat reads for `player_id` fail until cleared, as a flaky ingestion partition would.
    pub async fn fail_stats_for(&self, player_id: PlayerId) {
        self.failing_stats.write().await.insert(player_id);
    }

    pub async fn put_league_weights(&self, league_id: LeagueId, weights: ScoringWeights) {
        self.league_weights.write().await.insert(league_id, weights);
    }

    fn ensure_online(&self, source: &str) -> anyhow::Result<()> {
        if self.is_offline {
            anyhow::bail!("{source} offline");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl LineupSource for InMemoryLeagueData {
    async fn current_lineup(&self, team_id: TeamId) -> anyhow::Result<Option<LineupConfig>> {
        self.ensure_online("Lineup source")?;
        Ok(self.lineups.read().await.get(&team_id).cloned())
    }
}

#[async_trait::async_trait]
impl MatchupSource for InMemoryLeagueData {
    async fn matchup(&self, matchup_id: MatchupId) -> anyhow::Result<Option<Matchup>> {
        self.ensure_online("Matchup source")?;
        Ok(self.matchups.read().await.get(&matchup_id).cloned())
    }

    async fn matchups_covering(&self, date: NaiveDate) -> anyhow::Result<Vec<Matchup>> {
        self.ensure_online("Matchup source")?;
        let mut covering: Vec<Matchup> = self
            .matchups
            .read()
            .await
            .values()
            .filter(|matchup| matchup.covers(date))
            .cloned()
            .collect();
        covering.sort_by_key(|matchup| matchup.matchup_id);
        Ok(covering)
    }
}

#[async_trait::async_trait]
impl GameFeed for InMemoryLeagueData {
    async fn game_status(&self, player_id: PlayerId, date: NaiveDate) -> anyhow::Result<Option<GameStatus>> {
        self.ensure_online("Game feed")?;
        let Some(club) = self.player_clubs.read().await.get(&player_id).cloned() else {
            return Ok(None);
        };
        Ok(self.game_states.read().await.get(&(club, date)).copied())
    }
}

#[async_trait::async_trait]
impl StatFeed for InMemoryLeagueData {
    async fn daily_stat(&self, player_id: PlayerId, date: NaiveDate) -> anyhow::Result<Option<DailyStat>> {
        self.ensure_online("Stat feed")?;
        if self.failing_stats.read().await.contains(&player_id) {
            anyhow::bail!("Stat feed timed out for player {player_id}");
        }
        Ok(self.stats.read().await.get(&(player_id, date)).cloned())
    }
}

#[async_trait::async_trait]
impl ScoringRules for InMemoryLeagueData {
    async fn weights_for_league(&self, league_id: LeagueId) -> anyhow::Result<ScoringWeights> {
        self.ensure_online("Scoring rules")?;
        Ok(self
            .league_weights
            .read()
            .await
            .get(&league_id)
            .cloned()
            .unwrap_or_else(|| self.default_weights.clone()))
    }
}
