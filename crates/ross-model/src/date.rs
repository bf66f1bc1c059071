//! `DD/MM/YYYY` dates as carried by the date fields.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};

/// Why a date value was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateProblem {
    /// Not `DD/MM/YYYY`.
    Format,
    /// Month outside 1-12, day outside 1-31 or year outside 1900-2100.
    OutOfRange,
    /// Day does not exist in the month (strict calendar only).
    NoSuchDay,
}

impl DateProblem {
    pub fn describe(&self) -> &'static str {
        match self {
            DateProblem::Format => "expected format DD/MM/YYYY",
            DateProblem::OutOfRange => "day, month or year out of range",
            DateProblem::NoSuchDay => "day does not exist in the given month",
        }
    }
}

/// Day, month and year components of a date field, range-checked but not
/// calendar-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl FieldDate {
    /// Parse `DD/MM/YYYY` with month 1-12, day 1-31, year 1900-2100.
    ///
    /// `31/02/2024` is accepted; use [`FieldDate::parse_strict`] to refuse it.
    pub fn parse(value: &str) -> Result<Self, DateProblem> {
        let bytes = value.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[2] == b'/'
            && bytes[5] == b'/'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
        if !shape_ok {
            return Err(DateProblem::Format);
        }

        let number = |range: std::ops::Range<usize>| -> u32 {
            bytes[range]
                .iter()
                .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
        };
        let date = Self {
            day: number(0..2),
            month: number(3..5),
            year: number(6..10) as i32,
        };

        if !(1..=12).contains(&date.month)
            || !(1..=31).contains(&date.day)
            || !(1900..=2100).contains(&date.year)
        {
            return Err(DateProblem::OutOfRange);
        }
        Ok(date)
    }

    /// Like [`FieldDate::parse`] but the day must exist in the month.
    pub fn parse_strict(value: &str) -> Result<Self, DateProblem> {
        let date = Self::parse(value)?;
        if NaiveDate::from_ymd_opt(date.year, date.month, date.day).is_none() {
            return Err(DateProblem::NoSuchDay);
        }
        Ok(date)
    }

    /// Calendar date; days past the end of the month roll into the next one
    /// (`31/02/2024` becomes 2 March 2024).
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)?
            .checked_add_days(Days::new(u64::from(self.day - 1)))
    }

    /// `YYYYMMDD`, as used by the movement XML.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    /// Parse `YYYYMMDD` back into field components.
    pub fn from_compact(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            year: value[0..4].parse().ok()?,
            month: value[4..6].parse().ok()?,
            day: value[6..8].parse().ok()?,
        })
    }
}

impl fmt::Display for FieldDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// Whole years elapsed from `birth` to `on`; negative when `birth` is later.
pub fn age_in_years(birth: NaiveDate, on: NaiveDate) -> i64 {
    let mut years = i64::from(on.year()) - i64::from(birth.year());
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
