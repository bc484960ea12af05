//! Core data types for holiday resolution

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Category tag reported by the provider, e.g. `public_holiday`.
///
/// Kept as an open string tag: the provider may introduce kinds this
/// crate has never seen and they are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayKind(String);

impl HolidayKind {
    pub const PUBLIC_HOLIDAY: &'static str = "public_holiday";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn public_holiday() -> Self {
        Self::new(Self::PUBLIC_HOLIDAY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a holiday of this kind counts as a day off.
    ///
    /// Every kind the provider returns is counted.
    pub fn is_day_off(&self) -> bool {
        true
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A piece of text in a given language (holiday names and notes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub lang: String,
    pub text: String,
}

impl LocalizedText {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            text: text.into(),
        }
    }
}

/// A country supported by the holiday provider. Identity is `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub full_name: String,
    pub regions: Vec<String>,
    pub supported_holiday_kinds: BTreeSet<HolidayKind>,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

/// A single holiday of a country on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub country_code: String,
    pub name: String,
    pub translated_names: Vec<LocalizedText>,
    pub date: NaiveDate,
    pub kind: HolidayKind,
    pub notes: Vec<LocalizedText>,
    pub flags: BTreeSet<String>,
    pub observed_on: Option<NaiveDate>,
}

impl Holiday {
    /// Minimal holiday with no translations, notes or flags.
    pub fn new(
        country_code: impl Into<String>,
        name: impl Into<String>,
        date: NaiveDate,
        kind: HolidayKind,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            name: name.into(),
            translated_names: Vec::new(),
            date,
            kind,
            notes: Vec::new(),
            flags: BTreeSet::new(),
            observed_on: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Classification of a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayKind {
    Holiday,
    Weekend,
    WorkDay,
}

/// Status of a specific day for a country. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: u8,
    pub status: DayKind,
}

/// A year's holidays for one month (1 = January).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthHolidays {
    pub month: u32,
    pub holidays: Vec<Holiday>,
}
