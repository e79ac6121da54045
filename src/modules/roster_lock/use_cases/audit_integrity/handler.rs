// Integrity auditor, the self-healing loop beside the generator.
//
// Responsibilities
// - Diff the current lineup against the snapshot rows of one unlocked day.
// - Repair missing rows by invoking the generator for exactly that (team, matchup, player, date).
// - Bring unlocked rows whose slot drifted back in line with the lineup.
// - Report stale unlocked rows and prune them when pruning is enabled.
//
// Boundaries
// - Dates before today are rejected. Locked rows are counted and never touched.
// - Once the team has a locked row on the day, players who joined later are counted in
//   `locked_skipped` and get no row.
// - Mismatches are reported as counts and never escalated.

use crate::modules::roster_lock::core::errors::RosterLockError;
use crate::modules::roster_lock::core::lineup::LineupConfig;
use crate::modules::roster_lock::core::matchup::Matchup;
use crate::modules::roster_lock::core::snapshot::RosterSnapshot;
use crate::modules::roster_lock::use_cases::generate_snapshots::command::GenerateSnapshots;
use crate::modules::roster_lock::use_cases::generate_snapshots::handler::GenerateSnapshotsHandler;
use crate::shared::core::primitives::{DateRange, MatchupId, TeamId};
use crate::shared::infrastructure::clock::Clock;
use crate::shared::infrastructure::league_data::{LineupSource, MatchupSource};
use crate::shared::infrastructure::snapshot_store::{RowChange, SnapshotStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::AddAssign;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    pub prune_stale: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self { prune_stale: true }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub checked: usize,
    pub missing: usize,
    pub repaired: usize,
    pub failed: usize,
    pub drifted: usize,
    pub reslotted: usize,
    pub stale: usize,
    pub removed: usize,
    pub locked_skipped: usize,
}

impl AuditReport {
    pub fn mismatches(&self) -> usize {
        self.missing + self.drifted + self.stale
    }
}

impl AddAssign for AuditReport {
    fn add_assign(&mut self, other: Self) {
        self.checked += other.checked;
        self.missing += other.missing;
        self.repaired += other.repaired;
        self.failed += other.failed;
        self.drifted += other.drifted;
        self.reslotted += other.reslotted;
        self.stale += other.stale;
        self.removed += other.removed;
        self.locked_skipped += other.locked_skipped;
    }
}

pub struct IntegrityAuditor<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + 'static,
{
    generator: GenerateSnapshotsHandler<TStore, TLeague>,
    store: Arc<TStore>,
    league: Arc<TLeague>,
    clock: Arc<dyn Clock>,
    options: AuditOptions,
}

impl<TStore, TLeague> IntegrityAuditor<TStore, TLeague>
where
    TStore: SnapshotStore + 'static,
    TLeague: LineupSource + MatchupSource + 'static,
{
    pub fn new(
        generator: GenerateSnapshotsHandler<TStore, TLeague>,
        store: Arc<TStore>,
        league: Arc<TLeague>,
        clock: Arc<dyn Clock>,
        options: AuditOptions,
    ) -> Self {
        Self {
            generator,
            store,
            league,
            clock,
            options,
        }
    }

    pub async fn audit_day(
        &self,
        team_id: TeamId,
        matchup_id: MatchupId,
        date: NaiveDate,
    ) -> Result<AuditReport, RosterLockError> {
        if date < self.clock.today() {
            return Err(RosterLockError::HistoricalDate { date });
        }
        let (lineup, matchup) = self.load(team_id, matchup_id).await?;
        if !matchup.covers(date) {
            return Ok(AuditReport::default());
        }
        self.audit_loaded_day(&lineup, matchup_id, date).await
    }

    /// Audits today through the end of the matchup week. Past days are never visited.
    pub async fn audit_matchup(
        &self,
        team_id: TeamId,
        matchup_id: MatchupId,
    ) -> Result<AuditReport, RosterLockError> {
        let (lineup, matchup) = self.load(team_id, matchup_id).await?;
        let mut report = AuditReport::default();
        let Some(open_days) = matchup.week().remaining_from(self.clock.today()) else {
            return Ok(report);
        };
        for date in open_days.days() {
            report += self.audit_loaded_day(&lineup, matchup_id, date).await?;
        }
        tracing::info!(
            team_id,
            matchup_id,
            checked = report.checked,
            mismatches = report.mismatches(),
            repaired = report.repaired,
            failed = report.failed,
            "integrity audit finished"
        );
        Ok(report)
    }

    async fn load(&self, team_id: TeamId, matchup_id: MatchupId) -> Result<(LineupConfig, Matchup), RosterLockError> {
        let lineup = self
            .league
            .current_lineup(team_id)
            .await?
            .ok_or(RosterLockError::LineupNotFound { team_id })?;
        let matchup = self
            .league
            .matchup(matchup_id)
            .await?
            .ok_or(RosterLockError::MatchupNotFound { matchup_id })?;
        if !matchup.involves(team_id) {
            return Err(RosterLockError::TeamNotInMatchup { team_id, matchup_id });
        }
        Ok((lineup, matchup))
    }

    async fn audit_loaded_day(
        &self,
        lineup: &LineupConfig,
        matchup_id: MatchupId,
        date: NaiveDate,
    ) -> Result<AuditReport, RosterLockError> {
        let team_id = lineup.team_id;
        let actual: BTreeMap<_, RosterSnapshot> = self
            .store
            .list_for_team(team_id, Some(matchup_id), DateRange::single(date))
            .await?
            .into_iter()
            .map(|row| (row.player_id(), row))
            .collect();
        let expected = lineup.member_set();
        let mut report = AuditReport {
            checked: expected.union(&actual.keys().copied().collect::<BTreeSet<_>>()).count(),
            ..AuditReport::default()
        };

        let day_locked = actual.values().any(RosterSnapshot::is_locked);
        for &player_id in expected.iter().filter(|p| !actual.contains_key(*p)) {
            let command = GenerateSnapshots::for_player_on(team_id, matchup_id, player_id, date);
            match self.generator.handle(command).await {
                Ok(summary) if summary.failed > 0 => {
                    report.missing += 1;
                    report.failed += 1;
                }
                Ok(summary) if summary.inserted > 0 => {
                    report.missing += 1;
                    report.repaired += 1;
                }
                Ok(_) if day_locked => report.locked_skipped += 1,
                Ok(summary) if summary.skipped > 0 => {
                    report.missing += 1;
                    report.repaired += 1;
                }
                Ok(_) => {
                    report.missing += 1;
                    report.failed += 1;
                }
                Err(error) => {
                    tracing::warn!(team_id, matchup_id, player_id, %date, %error, "snapshot repair failed");
                    report.missing += 1;
                    report.failed += 1;
                }
            }
        }

        for (player_id, row) in &actual {
            if row.is_locked() {
                report.locked_skipped += 1;
                continue;
            }
            match lineup.slot_of(*player_id) {
                Some(slot) if slot != row.slot() => {
                    report.drifted += 1;
                    match self.store.update_unlocked(&row.key, slot).await {
                        Ok(RowChange::Applied) => report.reslotted += 1,
                        Ok(RowChange::RejectedLocked) => report.locked_skipped += 1,
                        Ok(_) => {}
                        Err(error) => {
                            tracing::warn!(key = %row.key, %error, "reslot failed");
                            report.failed += 1;
                        }
                    }
                }
                Some(_) => {}
                None => {
                    report.stale += 1;
                    if !self.options.prune_stale {
                        continue;
                    }
                    match self.store.remove_unlocked(&row.key).await {
                        Ok(RowChange::Applied) => report.removed += 1,
                        Ok(RowChange::RejectedLocked) => report.locked_skipped += 1,
                        Ok(_) => {}
                        Err(error) => {
                            tracing::warn!(key = %row.key, %error, "stale snapshot removal failed");
                            report.failed += 1;
                        }
                    }
                }
            }
        }

        if report.mismatches() > 0 {
            tracing::debug!(team_id, matchup_id, %date, ?report, "snapshot drift detected");
        }
        Ok(report)
    }
}
