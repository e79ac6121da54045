// Weighted-category scoring.
//
// Purpose
// - Turn one player's raw counters for one day into fantasy points.
//
// Responsibilities
// - Deterministic weighted sum. Same counters and weights always give the same Decimal.
// - Missing stat lines and categories without a weight contribute zero.

use crate::modules::roster_lock::core::lineup::SlotType;
use crate::shared::core::primitives::PlayerId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Goals,
    Assists,
    PlusMinus,
    PenaltyMinutes,
    PowerPlayPoints,
    ShortHandedPoints,
    GameWinningGoals,
    Shots,
    Hits,
    Blocks,
    Wins,
    GoalsAgainst,
    Saves,
    Shutouts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    pub player_id: PlayerId,
    pub date: NaiveDate,
    #[serde(default)]
    pub counters: BTreeMap<StatCategory, i32>,
}

impl DailyStat {
    pub fn new(player_id: PlayerId, date: NaiveDate) -> Self {
        Self {
            player_id,
            date,
            counters: BTreeMap::new(),
        }
    }

    pub fn with(mut self, category: StatCategory, value: i32) -> Self {
        self.counters.insert(category, value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub weights: BTreeMap<StatCategory, Decimal>,
}

impl ScoringWeights {
    pub fn new(weights: impl IntoIterator<Item = (StatCategory, Decimal)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    /// Default league configuration.
    pub fn standard() -> Self {
        use StatCategory::*;
        Self::new([
            (Goals, Decimal::from(3)),
            (Assists, Decimal::from(2)),
            (PlusMinus, Decimal::ONE),
            (PowerPlayPoints, Decimal::ONE),
            (ShortHandedPoints, Decimal::from(2)),
            (GameWinningGoals, Decimal::ONE),
            (Shots, Decimal::new(5, 1)),
            (Hits, Decimal::new(5, 1)),
            (Blocks, Decimal::new(5, 1)),
            (Wins, Decimal::from(4)),
            (GoalsAgainst, Decimal::from(-2)),
            (Saves, Decimal::new(2, 1)),
            (Shutouts, Decimal::from(3)),
        ])
    }

    pub fn weight(&self, category: StatCategory) -> Decimal {
        self.weights.get(&category).copied().unwrap_or(Decimal::ZERO)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn score_stat_line(stat: Option<&DailyStat>, weights: &ScoringWeights) -> Decimal {
    let Some(stat) = stat else {
        return Decimal::ZERO;
    };
    stat.counters
        .iter()
        .map(|(category, value)| weights.weight(*category) * Decimal::from(*value))
        .sum()
}

/// Points a snapshot row contributes. Bench and ir rows never score.
pub fn score_slot(slot_type: SlotType, stat: Option<&DailyStat>, weights: &ScoringWeights) -> Decimal {
    if slot_type.counts_toward_score() {
        score_stat_line(stat, weights)
    } else {
        Decimal::ZERO
    }
}
