#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::Arc;

use roster_lock::modules::roster_lock::core::lineup::LineupConfig;
use roster_lock::modules::roster_lock::core::snapshot::RosterSnapshot;
use roster_lock::modules::roster_lock::use_cases::audit_integrity::handler::AuditOptions;
use roster_lock::shared::infrastructure::clock::FixedClock;
use roster_lock::shared::infrastructure::league_data::in_memory::InMemoryLeagueData;
use roster_lock::shared::infrastructure::snapshot_store::in_memory::InMemorySnapshotStore;
use roster_lock::shell::seed::Seed;
use roster_lock::shell::state::AppState;

pub const MATCHUP_ID: i64 = 10;
pub const TEAM_A: i64 = 1;
pub const TEAM_B: i64 = 2;

/// Matchup 10, team 1 against team 2 from Monday Dec 8 to Sunday Dec 14 2025.
pub const LEAGUE_SEED: &str = r#"{
    "matchups": [
        {"matchup_id": 10, "league_id": 1, "team1_id": 1, "team2_id": 2,
         "week_start": "2025-12-08", "week_end": "2025-12-14"}
    ],
    "lineups": [
        {"team_id": 1, "league_id": 1, "starters": [101, 102], "bench": [103]},
        {"team_id": 2, "league_id": 1, "starters": [201, 202], "bench": [203]}
    ],
    "player_clubs": {
        "101": "TOR", "102": "MTL", "103": "BOS", "104": "NYR",
        "201": "EDM", "202": "VAN", "203": "CGY"
    }
}"#;

pub fn december(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
}

pub fn lineup(team_id: i64, starters: Vec<i64>, bench: Vec<i64>) -> LineupConfig {
    LineupConfig {
        team_id,
        league_id: 1,
        starters,
        bench,
        ir: vec![],
        slot_assignments: Default::default(),
    }
}

pub struct World {
    pub store: Arc<InMemorySnapshotStore>,
    pub league: Arc<InMemoryLeagueData>,
    pub clock: Arc<FixedClock>,
    pub app: AppState,
}

impl World {
    pub async fn on(today: NaiveDate) -> Self {
        let league = InMemoryLeagueData::new();
        Seed::from_json(LEAGUE_SEED).unwrap().apply(&league).await;
        let store = Arc::new(InMemorySnapshotStore::new());
        let league = Arc::new(league);
        let clock = Arc::new(FixedClock::at_noon(today));
        let app = AppState::new(store.clone(), league.clone(), clock.clone(), AuditOptions::default());
        Self {
            store,
            league,
            clock,
            app,
        }
    }

    pub async fn locked_rows(&self) -> Vec<RosterSnapshot> {
        self.store
            .all()
            .await
            .into_iter()
            .filter(|row| row.is_locked())
            .collect()
    }
}
