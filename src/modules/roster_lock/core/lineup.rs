// Current lineup of a team as published by roster management.
//
// Purpose
// - Read-only value captured at generation time. Locked history never points back at it.
//
// Responsibilities
// - Derive the slot type (active, bench, ir) and slot id of a member.
// - Produce the de-duplicated member set used for generation, auditing and attribution.

use crate::shared::core::primitives::{LeagueId, PlayerId, SlotId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    Active,
    Bench,
    Ir,
}

impl SlotType {
    /// Only active slots score.
    pub fn counts_toward_score(self) -> bool {
        matches!(self, SlotType::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotType::Active => "active",
            SlotType::Bench => "bench",
            SlotType::Ir => "ir",
        }
    }
}

/// Where a player sits in a lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    pub slot_type: SlotType,
    pub slot_id: Option<SlotId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupConfig {
    pub team_id: TeamId,
    pub league_id: LeagueId,
    #[serde(default)]
    pub starters: Vec<PlayerId>,
    #[serde(default)]
    pub bench: Vec<PlayerId>,
    #[serde(default)]
    pub ir: Vec<PlayerId>,
    #[serde(default)]
    pub slot_assignments: HashMap<PlayerId, SlotId>,
}

impl LineupConfig {
    /// Starters win over bench, bench over ir, when a player is listed twice.
    pub fn slot_of(&self, player_id: PlayerId) -> Option<SlotAssignment> {
        let slot_type = if self.starters.contains(&player_id) {
            SlotType::Active
        } else if self.bench.contains(&player_id) {
            SlotType::Bench
        } else if self.ir.contains(&player_id) {
            SlotType::Ir
        } else {
            return None;
        };
        Some(SlotAssignment {
            slot_type,
            slot_id: self.slot_assignments.get(&player_id).copied(),
        })
    }

    pub fn members(&self) -> Vec<PlayerId> {
        let mut seen = BTreeSet::new();
        self.starters
            .iter()
            .chain(&self.bench)
            .chain(&self.ir)
            .copied()
            .filter(|player_id| seen.insert(*player_id))
            .collect()
    }

    pub fn is_member(&self, player_id: PlayerId) -> bool {
        self.slot_of(player_id).is_some()
    }

    pub fn member_set(&self) -> BTreeSet<PlayerId> {
        self.members().into_iter().collect()
    }
}
