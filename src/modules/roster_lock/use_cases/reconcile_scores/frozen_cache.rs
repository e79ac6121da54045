// Final daily scores, kept once every row of the day is locked.
//
// A final day can no longer change, so the cached value is served as is.
// Days that are still live never enter the cache.

use crate::modules::roster_lock::use_cases::reconcile_scores::projection::DailyScore;
use crate::shared::core::primitives::{MatchupId, TeamId};
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;

type DayKey = (TeamId, MatchupId, NaiveDate);

#[derive(Default)]
pub struct FrozenScoreCache {
    scores: RwLock<HashMap<DayKey, DailyScore>>,
}

impl FrozenScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, team_id: TeamId, matchup_id: MatchupId, date: NaiveDate) -> Option<DailyScore> {
        self.scores.read().await.get(&(team_id, matchup_id, date)).cloned()
    }

    /// Ignores scores that are not final. The first final value for a day wins.
    pub async fn freeze(&self, score: &DailyScore) {
        if !score.is_final || score.degraded {
            return;
        }
        self.scores
            .write()
            .await
            .entry((score.team_id, score.matchup_id, score.date))
            .or_insert_with(|| score.clone());
    }

    pub async fn len(&self) -> usize {
        self.scores.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.scores.read().await.is_empty()
    }
}
