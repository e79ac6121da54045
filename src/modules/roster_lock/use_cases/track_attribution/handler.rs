// Attribution tracker, players who left a lineup but still carry locked points.
//
// Responsibilities
// - Find players with locked rows in the matchup who are no longer in the current lineup.
// - Report the locked days, the locked active days and the points those rows still contribute.
//
// Boundaries
// - Read only. Never writes a row, never treats a dropped player as a reason to edit history.

use crate::modules::roster_lock::core::errors::RosterLockError;
use crate::modules::roster_lock::core::scoring::{ScoringWeights, score_slot};
use crate::shared::core::primitives::{MatchupId, PlayerId, TeamId};
use crate::shared::infrastructure::league_data::{LineupSource, MatchupSource, ScoringRules, StatFeed};
use crate::shared::infrastructure::snapshot_store::SnapshotStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedContributor {
    pub player_id: PlayerId,
    pub locked_days: usize,
    pub active_days: usize,
    pub points: Decimal,
    pub last_snapshot_on: NaiveDate,
}

pub struct AttributionTracker<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + StatFeed + ScoringRules + 'static,
{
    store: Arc<TStore>,
    league: Arc<TLeague>,
}

impl<TStore, TLeague> AttributionTracker<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + StatFeed + ScoringRules + 'static,
{
    pub fn new(store: Arc<TStore>, league: Arc<TLeague>) -> Self {
        Self { store, league }
    }

    /// Ordered by player id.
    pub async fn dropped_contributors(
        &self,
        team_id: TeamId,
        matchup_id: MatchupId,
    ) -> Result<Vec<DroppedContributor>, RosterLockError> {
        let matchup = self
            .league
            .matchup(matchup_id)
            .await?
            .ok_or(RosterLockError::MatchupNotFound { matchup_id })?;
        if !matchup.involves(team_id) {
            return Err(RosterLockError::TeamNotInMatchup { team_id, matchup_id });
        }
        let lineup = self
            .league
            .current_lineup(team_id)
            .await?
            .ok_or(RosterLockError::LineupNotFound { team_id })?;
        let weights = self
            .league
            .weights_for_league(matchup.league_id)
            .await
            .unwrap_or_else(|error| {
                tracing::warn!(league_id = matchup.league_id, %error, "scoring rules unavailable, using standard weights");
                ScoringWeights::standard()
            });

        let rows = self
            .store
            .list_for_team(team_id, Some(matchup_id), matchup.week())
            .await?;
        let mut dropped: BTreeMap<PlayerId, DroppedContributor> = BTreeMap::new();
        for row in rows.iter().filter(|r| r.is_locked() && !lineup.is_member(r.player_id())) {
            let points = if row.slot_type.counts_toward_score() {
                match self.league.daily_stat(row.player_id(), row.date()).await {
                    Ok(stat) => score_slot(row.slot_type, stat.as_ref(), &weights),
                    Err(error) => {
                        tracing::warn!(key = %row.key, %error, "stat line unavailable, counted as zero");
                        Decimal::ZERO
                    }
                }
            } else {
                Decimal::ZERO
            };
            let entry = dropped.entry(row.player_id()).or_insert_with(|| DroppedContributor {
                player_id: row.player_id(),
                locked_days: 0,
                active_days: 0,
                points: Decimal::ZERO,
                last_snapshot_on: row.date(),
            });
            entry.locked_days += 1;
            if row.slot_type.counts_toward_score() {
                entry.active_days += 1;
            }
            entry.points += points;
            entry.last_snapshot_on = entry.last_snapshot_on.max(row.date());
        }

        if !dropped.is_empty() {
            tracing::debug!(team_id, matchup_id, dropped = dropped.len(), "dropped players still attributed");
        }
        Ok(dropped.into_values().collect())
    }
}
