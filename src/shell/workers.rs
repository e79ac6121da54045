// Background workers.
//
// - Lock worker: evaluates every unlocked row due today or earlier, on a short interval.
// - Backfill worker: ensures snapshots for every matchup covering today, then audits the open days.
//
// Both are idempotent, so overlapping with on-demand runs is harmless.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::modules::roster_lock::use_cases::lock_snapshots::handler::LockScope;
use crate::shell::state::AppState;

pub fn spawn_lock_worker(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let summary = state.lock_coordinator.run(LockScope::All).await;
            if summary.errors > 0 {
                tracing::warn!(errors = summary.errors, "lock worker pass had errors");
            }
        }
    })
}

pub fn spawn_backfill_worker(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let today = state.clock.today();
            if let Err(error) = state.backfill.run_for_date(today).await {
                tracing::error!(%today, %error, "backfill worker could not list matchups");
            }
        }
    })
}
