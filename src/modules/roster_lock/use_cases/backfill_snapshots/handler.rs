// Backfill runner, the nightly and manual "ensure snapshots" job.
//
// Responsibilities
// - Run generation over the whole matchup week, then audit the open days, for every unit.
// - Each (team, matchup) unit is its own commit boundary. A failed unit never blocks the next one.
// - Past days land pre-locked through the generator, existing rows are never rewritten.

use crate::modules::roster_lock::core::errors::RosterLockError;
use crate::modules::roster_lock::use_cases::audit_integrity::handler::{AuditReport, IntegrityAuditor};
use crate::modules::roster_lock::use_cases::generate_snapshots::command::GenerateSnapshots;
use crate::modules::roster_lock::use_cases::generate_snapshots::handler::{
    GenerateSnapshotsHandler, GenerationSummary,
};
use crate::shared::core::primitives::{MatchupId, TeamId};
use crate::shared::infrastructure::league_data::{LineupSource, MatchupSource};
use crate::shared::infrastructure::snapshot_store::SnapshotStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillUnit {
    pub team_id: TeamId,
    pub matchup_id: MatchupId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub run_id: Uuid,
    pub units: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub generation: GenerationSummary,
    pub audit: AuditReport,
}

impl BackfillReport {
    fn start() -> Self {
        Self {
            run_id: Uuid::now_v7(),
            units: 0,
            succeeded: 0,
            skipped: 0,
            failed: 0,
            generation: GenerationSummary::default(),
            audit: AuditReport::default(),
        }
    }
}

pub struct BackfillRunner<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + 'static,
{
    generator: GenerateSnapshotsHandler<TStore, TLeague>,
    auditor: IntegrityAuditor<TStore, TLeague>,
    league: Arc<TLeague>,
}

impl<TStore, TLeague> BackfillRunner<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + 'static,
{
    pub fn new(
        generator: GenerateSnapshotsHandler<TStore, TLeague>,
        auditor: IntegrityAuditor<TStore, TLeague>,
        league: Arc<TLeague>,
    ) -> Self {
        Self {
            generator,
            auditor,
            league,
        }
    }

    pub async fn run(&self, units: &[BackfillUnit]) -> BackfillReport {
        let mut report = BackfillReport::start();
        let run_id = report.run_id;

        for unit in units {
            report.units += 1;
            match self.run_unit(*unit).await {
                Ok((generation, audit)) => {
                    report.succeeded += 1;
                    report.generation += generation;
                    report.audit += audit;
                }
                Err(error) if error.is_not_found() => {
                    tracing::warn!(%run_id, team_id = unit.team_id, matchup_id = unit.matchup_id, %error, "backfill unit skipped");
                    report.skipped += 1;
                }
                Err(error) => {
                    tracing::warn!(%run_id, team_id = unit.team_id, matchup_id = unit.matchup_id, %error, "backfill unit failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            %run_id,
            units = report.units,
            succeeded = report.succeeded,
            skipped = report.skipped,
            failed = report.failed,
            inserted = report.generation.inserted,
            repaired = report.audit.repaired,
            "backfill finished"
        );
        report
    }

    /// Both teams of every matchup whose week covers `date`.
    pub async fn run_for_date(&self, date: NaiveDate) -> Result<BackfillReport, RosterLockError> {
        let units: Vec<BackfillUnit> = self
            .league
            .matchups_covering(date)
            .await?
            .into_iter()
            .flat_map(|matchup| {
                matchup.teams().map(|team_id| BackfillUnit {
                    team_id,
                    matchup_id: matchup.matchup_id,
                })
            })
            .collect();
        Ok(self.run(&units).await)
    }

    async fn run_unit(&self, unit: BackfillUnit) -> Result<(GenerationSummary, AuditReport), RosterLockError> {
        let generation = self
            .generator
            .handle(GenerateSnapshots::for_matchup(unit.team_id, unit.matchup_id))
            .await?;
        let audit = self.auditor.audit_matchup(unit.team_id, unit.matchup_id).await?;
        Ok((generation, audit))
    }
}
