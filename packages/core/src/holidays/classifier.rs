//! Day status classification

use chrono::{Datelike, NaiveDate, Weekday};

use crate::holidays::types::{DayKind, DayStatus, Holiday};

/// Classifies a calendar date against a resolved set of holidays.
///
/// Precedence is Holiday, then Weekend, then WorkDay. The classifier is a
/// total function: every date yields exactly one status.
#[derive(Debug, Default, Clone, Copy)]
pub struct DayClassifier;

impl DayClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Full status of `date` given the country's holidays.
    pub fn classify(&self, holidays: &[Holiday], date: NaiveDate) -> DayStatus {
        let status = if self.is_public_holiday(holidays, date) {
            DayKind::Holiday
        } else if is_weekend(date) {
            DayKind::Weekend
        } else {
            DayKind::WorkDay
        };

        DayStatus {
            date,
            day_of_week: date.weekday().number_from_monday() as u8,
            status,
        }
    }

    /// True when some holiday falls exactly on `date`.
    pub fn is_public_holiday(&self, holidays: &[Holiday], date: NaiveDate) -> bool {
        holidays
            .iter()
            .any(|holiday| holiday.date == date && holiday.kind.is_day_off())
    }

    pub fn is_work_day(&self, holidays: &[Holiday], date: NaiveDate) -> bool {
        !(self.is_public_holiday(holidays, date) || is_weekend(date))
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
