// Score reconciler, fantasy points computed from locked history.
//
// Responsibilities
// - Score a day from the team's snapshot rows only. The live lineup is never consulted.
// - Active rows contribute their weighted stat line. Bench and ir rows contribute zero.
// - A missing stat line is zero. An unreachable stat feed is zero and marks the day degraded.
// - Final days are frozen in the cache and served from it afterwards.
//
// Boundaries
// - Read only against the snapshot store. Readers may observe a half locked day and report it live.

use crate::modules::roster_lock::core::errors::RosterLockError;
use crate::modules::roster_lock::core::matchup::Matchup;
use crate::modules::roster_lock::core::scoring::{ScoringWeights, score_slot};
use crate::modules::roster_lock::use_cases::reconcile_scores::frozen_cache::FrozenScoreCache;
use crate::modules::roster_lock::use_cases::reconcile_scores::projection::{
    DailyScore, PeriodScore, PlayerContribution, Scoreboard,
};
use crate::shared::core::primitives::{DateRange, MatchupId, TeamId};
use crate::shared::infrastructure::clock::Clock;
use crate::shared::infrastructure::league_data::{MatchupSource, ScoringRules, StatFeed};
use crate::shared::infrastructure::snapshot_store::SnapshotStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

struct Weights {
    weights: ScoringWeights,
    degraded: bool,
}

pub struct ScoreReconciler<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: MatchupSource + StatFeed + ScoringRules + 'static,
{
    store: Arc<TStore>,
    league: Arc<TLeague>,
    clock: Arc<dyn Clock>,
    cache: Arc<FrozenScoreCache>,
}

impl<TStore, TLeague> ScoreReconciler<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: MatchupSource + StatFeed + ScoringRules + 'static,
{
    pub fn new(
        store: Arc<TStore>,
        league: Arc<TLeague>,
        clock: Arc<dyn Clock>,
        cache: Arc<FrozenScoreCache>,
    ) -> Self {
        Self {
            store,
            league,
            clock,
            cache,
        }
    }

    pub async fn daily_score(
        &self,
        team_id: TeamId,
        matchup_id: MatchupId,
        date: NaiveDate,
    ) -> Result<DailyScore, RosterLockError> {
        let matchup = self.load_matchup(team_id, matchup_id).await?;
        if let Some(frozen) = self.cache.get(team_id, matchup_id, date).await {
            return Ok(frozen);
        }
        let weights = self.weights(&matchup).await;
        self.score_day(team_id, matchup_id, date, &weights).await
    }

    pub async fn period_score(&self, team_id: TeamId, matchup_id: MatchupId) -> Result<PeriodScore, RosterLockError> {
        let matchup = self.load_matchup(team_id, matchup_id).await?;
        self.score_period(team_id, &matchup).await
    }

    pub async fn scoreboard(&self, matchup_id: MatchupId) -> Result<Scoreboard, RosterLockError> {
        let matchup = self
            .league
            .matchup(matchup_id)
            .await?
            .ok_or(RosterLockError::MatchupNotFound { matchup_id })?;
        let team1 = self.score_period(matchup.team1_id, &matchup).await?;
        let team2 = self.score_period(matchup.team2_id, &matchup).await?;
        Ok(Scoreboard::new(matchup_id, team1, team2))
    }

    async fn load_matchup(&self, team_id: TeamId, matchup_id: MatchupId) -> Result<Matchup, RosterLockError> {
        let matchup = self
            .league
            .matchup(matchup_id)
            .await?
            .ok_or(RosterLockError::MatchupNotFound { matchup_id })?;
        if !matchup.involves(team_id) {
            return Err(RosterLockError::TeamNotInMatchup { team_id, matchup_id });
        }
        Ok(matchup)
    }

    async fn weights(&self, matchup: &Matchup) -> Weights {
        match self.league.weights_for_league(matchup.league_id).await {
            Ok(weights) => Weights {
                weights,
                degraded: false,
            },
            Err(error) => {
                tracing::warn!(league_id = matchup.league_id, %error, "scoring rules unavailable, using standard weights");
                Weights {
                    weights: ScoringWeights::standard(),
                    degraded: true,
                }
            }
        }
    }

    async fn score_period(&self, team_id: TeamId, matchup: &Matchup) -> Result<PeriodScore, RosterLockError> {
        let week = matchup.week();
        let weights = self.weights(matchup).await;
        let mut days = Vec::with_capacity(week.day_count());
        for date in week.days() {
            let day = match self.cache.get(team_id, matchup.matchup_id, date).await {
                Some(frozen) => frozen,
                None => self.score_day(team_id, matchup.matchup_id, date, &weights).await?,
            };
            days.push(day);
        }
        Ok(PeriodScore::from_days(team_id, matchup.matchup_id, week, days))
    }

    async fn score_day(
        &self,
        team_id: TeamId,
        matchup_id: MatchupId,
        date: NaiveDate,
        weights: &Weights,
    ) -> Result<DailyScore, RosterLockError> {
        let rows = self
            .store
            .list_for_team(team_id, Some(matchup_id), DateRange::single(date))
            .await?;

        let mut degraded = weights.degraded;
        let mut contributions = Vec::with_capacity(rows.len());
        for row in &rows {
            let points = if row.slot_type.counts_toward_score() {
                match self.league.daily_stat(row.player_id(), date).await {
                    Ok(stat) => score_slot(row.slot_type, stat.as_ref(), &weights.weights),
                    Err(error) => {
                        tracing::warn!(key = %row.key, %error, "stat line unavailable, counted as zero");
                        degraded = true;
                        Decimal::ZERO
                    }
                }
            } else {
                Decimal::ZERO
            };
            contributions.push(PlayerContribution {
                player_id: row.player_id(),
                slot_type: row.slot_type,
                points,
                locked: row.is_locked(),
            });
        }

        let score = DailyScore {
            team_id,
            matchup_id,
            date,
            points: contributions.iter().map(|c| c.points).sum(),
            is_final: date < self.clock.today() && !rows.is_empty() && rows.iter().all(|r| r.is_locked()),
            degraded,
            contributions,
        };
        self.cache.freeze(&score).await;
        Ok(score)
    }
}
