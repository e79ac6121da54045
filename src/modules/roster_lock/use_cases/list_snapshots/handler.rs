use crate::modules::roster_lock::core::errors::RosterLockError;
use crate::modules::roster_lock::use_cases::list_snapshots::projection::SnapshotView;
use crate::shared::core::primitives::{DateRange, MatchupId, TeamId};
use crate::shared::infrastructure::snapshot_store::SnapshotStore;
use std::sync::Arc;

pub struct ListSnapshotsHandler<TStore>
where
    TStore: SnapshotStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ListSnapshotsHandler<TStore>
where
    TStore: SnapshotStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    /// Rows of a team over `range`, ordered by date then player.
    pub async fn list(
        &self,
        team_id: TeamId,
        matchup_id: Option<MatchupId>,
        range: DateRange,
    ) -> Result<Vec<SnapshotView>, RosterLockError> {
        let rows = self.store.list_for_team(team_id, matchup_id, range).await?;
        Ok(rows.into_iter().map(SnapshotView::from).collect())
    }
}

#[cfg(test)]
mod list_snapshots_handler_tests {
    use super::*;
    use crate::shared::infrastructure::snapshot_store::in_memory::InMemorySnapshotStore;
    use crate::tests::fixtures::matchups::{TEAM_A, december};
    use crate::tests::fixtures::snapshots::active_row;
    use rstest::{fixture, rstest};

    #[fixture]
    async fn before_each() -> Arc<InMemorySnapshotStore> {
        let store = InMemorySnapshotStore::new();
        for (player_id, day) in [(102, 9), (101, 9), (101, 8), (101, 12)] {
            store.insert(active_row(player_id, december(day))).await.unwrap();
        }
        Arc::new(store)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_rows_in_range_by_date_then_player(#[future] before_each: Arc<InMemorySnapshotStore>) {
        let handler = ListSnapshotsHandler::new(before_each.await);
        let views = handler
            .list(TEAM_A, None, DateRange::new(december(8), december(10)))
            .await
            .unwrap();
        let keys: Vec<_> = views.iter().map(|v| (v.date, v.player_id)).collect();
        assert_eq!(keys, vec![(december(8), 101), (december(9), 101), (december(9), 102)]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_store_is_offline() {
        let mut store = InMemorySnapshotStore::new();
        store.toggle_offline();
        let handler = ListSnapshotsHandler::new(Arc::new(store));
        let result = handler.list(TEAM_A, None, DateRange::single(december(8))).await;
        assert!(result.unwrap_err().to_string().contains("Snapshot store offline"));
    }
}
