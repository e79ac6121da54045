// Shared test fixture for LineupConfig.
// Defaults come from json/team_a_lineup.json: team 1 in league 1, starters 101 and 102, 103 on the bench.

use crate::modules::roster_lock::core::lineup::LineupConfig;
use crate::shared::core::primitives::{PlayerId, SlotId, TeamId};
use std::fs;

pub struct LineupConfigBuilder {
    inner: LineupConfig,
}

impl Default for LineupConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl LineupConfigBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/team_a_lineup.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn team_id(mut self, v: TeamId) -> Self {
        self.inner.team_id = v;
        self
    }

    pub fn starters(mut self, v: Vec<PlayerId>) -> Self {
        self.inner.starters = v;
        self
    }

    pub fn bench(mut self, v: Vec<PlayerId>) -> Self {
        self.inner.bench = v;
        self
    }

    pub fn ir(mut self, v: Vec<PlayerId>) -> Self {
        self.inner.ir = v;
        self
    }

    pub fn slot_assignments(mut self, v: Vec<(PlayerId, SlotId)>) -> Self {
        self.inner.slot_assignments = v.into_iter().collect();
        self
    }

    pub fn build(self) -> LineupConfig {
        self.inner
    }
}
