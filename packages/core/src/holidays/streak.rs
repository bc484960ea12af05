//! Consecutive free-day streaks

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::holidays::{classifier::is_weekend, types::Holiday};

/// Computes the longest run of free days (holidays or weekend days) in a year.
///
/// Each calendar year is computed in isolation: a run that crosses
/// Dec 31 / Jan 1 is cut at the year boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreakCalculator;

impl StreakCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Every free date of `year`, ascending and deduplicated.
    pub fn free_days(&self, holidays: &[Holiday], year: i32) -> BTreeSet<NaiveDate> {
        let mut free: BTreeSet<NaiveDate> = holidays
            .iter()
            .filter(|holiday| holiday.date.year() == year && holiday.kind.is_day_off())
            .map(|holiday| holiday.date)
            .collect();

        let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            return free;
        };
        free.extend(
            first
                .iter_days()
                .take_while(|date| date.year() == year)
                .filter(|date| is_weekend(*date)),
        );

        free
    }

    /// Length of the longest run of consecutive free days in `year`.
    pub fn max_consecutive_free_days(&self, holidays: &[Holiday], year: i32) -> u32 {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return 0;
        }
        longest_run(&self.free_days(holidays, year))
    }
}

/// Longest run of consecutive dates in an ascending set.
fn longest_run(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut max_streak = 0;
    let mut current_streak = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        match previous {
            Some(prev) if prev.succ_opt() != Some(date) => {
                max_streak = max_streak.max(current_streak);
                current_streak = 1;
            }
            _ => current_streak += 1,
        }
        previous = Some(date);
    }

    max_streak.max(current_streak)
}
