use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::roster_lock::use_cases::generate_snapshots::command::GenerateSnapshots;
use crate::modules::roster_lock::use_cases::generate_snapshots::handler::GenerationSummary;
use crate::shared::core::primitives::{DateRange, MatchupId, PlayerId, TeamId};
use crate::shell::graphql::parse_date;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlGenerationSummary {
    pub attempted: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dates_skipped: usize,
}

impl From<GenerationSummary> for GqlGenerationSummary {
    fn from(s: GenerationSummary) -> Self {
        Self {
            attempted: s.attempted,
            inserted: s.inserted,
            skipped: s.skipped,
            failed: s.failed,
            dates_skipped: s.dates_skipped,
        }
    }
}

#[derive(Default)]
pub struct GenerateSnapshotsMutation;

#[Object]
impl GenerateSnapshotsMutation {
    /// Dates are `YYYY-MM-DD`. Without `from` and `to` the whole matchup week is generated.
    async fn generate_snapshots(
        &self,
        context: &Context<'_>,
        team_id: TeamId,
        matchup_id: MatchupId,
        from: Option<String>,
        to: Option<String>,
        players: Option<Vec<PlayerId>>,
    ) -> GqlResult<GqlGenerationSummary> {
        let state = context.data_unchecked::<AppState>();
        let mut command = GenerateSnapshots::for_matchup(team_id, matchup_id);
        match (from, to) {
            (Some(from), Some(to)) => {
                command = command.within(DateRange::new(parse_date(&from)?, parse_date(&to)?));
            }
            (Some(day), None) | (None, Some(day)) => {
                command = command.within(DateRange::single(parse_date(&day)?));
            }
            (None, None) => {}
        }
        command.players = players;

        let summary = state.generator.handle(command).await?;
        Ok(summary.into())
    }
}
