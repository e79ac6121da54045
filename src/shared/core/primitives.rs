// Identifiers and calendar primitives shared by every slice.
//
// Purpose
// - Keep ids as plain integers so snapshots reference players by id, never by live roster membership.
// - Give date ranges one inclusive representation instead of ad hoc start/end pairs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TeamId = i64;
pub type LeagueId = i64;
pub type MatchupId = i64;
pub type PlayerId = i64;
pub type SlotId = i64;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range, swapping the bounds if they were given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Zero for a range whose bounds are reversed, matching `days`.
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    /// The part of this range that falls on or after `date`, if any.
    pub fn remaining_from(&self, date: NaiveDate) -> Option<DateRange> {
        if date > self.end {
            return None;
        }
        Some(DateRange {
            start: self.start.max(date),
            end: self.end,
        })
    }
}
