// Clock port.
//
// Purpose
// - Give every lock and generation decision one source of "now" and "today".
// - "Today" is the calendar day in the league's UTC offset, not the server's.
//
// Testing guidance
// - Use FixedClock and move it forward with `set` to walk through a matchup week.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Mutex::new(now),
            offset,
        }
    }

    /// Noon UTC on `date`, so "today" is `date` for any offset within twelve hours.
    pub fn at_noon(date: NaiveDate) -> Self {
        Self::new(noon(date), Utc.fix())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = now;
    }

    pub fn set_today(&self, date: NaiveDate) {
        self.set(noon(date));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.offset).date_naive()
    }
}

fn noon(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

#[cfg(test)]
mod clock_tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn it_should_report_today_in_the_league_offset() {
        let late_evening_utc = Utc.with_ymd_and_hms(2025, 12, 9, 3, 30, 0).unwrap();
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let clock = FixedClock::new(late_evening_utc, eastern);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 12, 8).unwrap());
    }

    #[rstest]
    fn it_should_move_to_another_day() {
        let clock = FixedClock::at_noon(NaiveDate::from_ymd_opt(2025, 12, 8).unwrap());
        clock.set_today(NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
    }
}
