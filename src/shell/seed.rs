// Seed data for the in memory collaborators.
//
// Purpose
// - Run the service locally against a fixed league: matchups, lineups, clubs, game states,
//   stat lines and league weights, read from one JSON document.
//
// Boundaries
// - Seeds only the read side collaborators. Snapshots are always produced by the pipeline.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::modules::roster_lock::core::game_status::GameStatus;
use crate::modules::roster_lock::core::lineup::LineupConfig;
use crate::modules::roster_lock::core::matchup::Matchup;
use crate::modules::roster_lock::core::scoring::{DailyStat, ScoringWeights};
use crate::shared::core::primitives::{LeagueId, PlayerId};
use crate::shared::infrastructure::league_data::in_memory::InMemoryLeagueData;

#[derive(Debug, Deserialize)]
pub struct SeedGameStatus {
    pub club: String,
    pub date: NaiveDate,
    pub status: GameStatus,
}

#[derive(Debug, Deserialize)]
pub struct SeedLeagueWeights {
    pub league_id: LeagueId,
    #[serde(flatten)]
    pub weights: ScoringWeights,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub matchups: Vec<Matchup>,
    pub lineups: Vec<LineupConfig>,
    pub player_clubs: HashMap<PlayerId, String>,
    pub game_statuses: Vec<SeedGameStatus>,
    pub stats: Vec<DailyStat>,
    pub league_weights: Vec<SeedLeagueWeights>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Seed file is not valid JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read seed file {}", path.display()))?;
        Self::from_json(&json)
    }

    pub async fn apply(self, league: &InMemoryLeagueData) {
        let counts = (self.matchups.len(), self.lineups.len(), self.stats.len());
        for matchup in self.matchups {
            league.put_matchup(matchup).await;
        }
        for lineup in self.lineups {
            league.put_lineup(lineup).await;
        }
        for (player_id, club) in self.player_clubs {
            league.assign_club(player_id, club).await;
        }
        for game in self.game_statuses {
            league.set_game_status(game.club, game.date, game.status).await;
        }
        for stat in self.stats {
            league.put_stat(stat).await;
        }
        for entry in self.league_weights {
            league.put_league_weights(entry.league_id, entry.weights).await;
        }
        tracing::info!(
            matchups = counts.0,
            lineups = counts.1,
            stats = counts.2,
            "league data seeded"
        );
    }
}
