// Pure lock decision for one snapshot row.
//
// Purpose
// - One transition rule, evaluated in one place, for the Unlocked -> Locked state machine.
//
// Rules
// - A locked row stays locked.
// - A row for a past date locks, whatever the feed says. Every day reaches a terminal state.
// - A row for today locks once the player's game has started. The feed is authoritative for today
//   and stale statuses are never coerced.
// - A row for a future date never locks.
// - Never perform input or output.

use crate::modules::roster_lock::core::game_status::GameStatus;
use crate::modules::roster_lock::core::snapshot::RosterSnapshot;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTrigger {
    DatePassed,
    GameStarted(GameStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    AlreadyLocked,
    FutureDate,
    NoGameToday,
    GameNotStarted(GameStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDecision {
    Lock(LockTrigger),
    Hold(HoldReason),
}

impl LockDecision {
    pub fn should_lock(&self) -> bool {
        matches!(self, LockDecision::Lock(_))
    }
}

/// Only consults `status` when the row is dated `today`.
pub fn decide_lock(
    snapshot: &RosterSnapshot,
    today: NaiveDate,
    status: Option<GameStatus>,
) -> LockDecision {
    if snapshot.is_locked() {
        return LockDecision::Hold(HoldReason::AlreadyLocked);
    }
    let date = snapshot.date();
    if date < today {
        return LockDecision::Lock(LockTrigger::DatePassed);
    }
    if date > today {
        return LockDecision::Hold(HoldReason::FutureDate);
    }
    match status {
        Some(status) if status.has_started() => LockDecision::Lock(LockTrigger::GameStarted(status)),
        Some(status) => LockDecision::Hold(HoldReason::GameNotStarted(status)),
        None => LockDecision::Hold(HoldReason::NoGameToday),
    }
}
