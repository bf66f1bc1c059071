//! Configuration options for parsing and validation.

use serde::{Deserialize, Serialize};

use crate::date::{DateProblem, FieldDate};

/// How strictly calendar dates are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalendarCheck {
    /// Month 1-12, day 1-31, year 1900-2100; day is not checked against the month.
    #[default]
    Loose,
    /// Additionally reject days that do not exist in the given month.
    Strict,
}

impl CalendarCheck {
    pub fn parse(&self, value: &str) -> Result<FieldDate, DateProblem> {
        match self {
            CalendarCheck::Loose => FieldDate::parse(value),
            CalendarCheck::Strict => FieldDate::parse_strict(value),
        }
    }
}

/// Options controlling record validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOptions {
    pub calendar: CalendarCheck,
    /// Stays longer than this many days raise a warning.
    pub long_stay_days: i64,
    /// Ages above this raise a warning.
    pub max_plausible_age: i64,
    /// Guests below this age who are not family or group members get a note.
    pub adult_age: i64,
    /// Emit informational notes on unusual tourism/transport pairs.
    pub flag_travel_heuristics: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            calendar: CalendarCheck::Loose,
            long_stay_days: 365,
            max_plausible_age: 120,
            adult_age: 18,
            flag_travel_heuristics: true,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, calendar: CalendarCheck) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_long_stay_days(mut self, days: i64) -> Self {
        self.long_stay_days = days;
        self
    }

    pub fn with_travel_heuristics(mut self, enable: bool) -> Self {
        self.flag_travel_heuristics = enable;
        self
    }
}

/// Options applied while turning text lines into records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Fill empty tourism type and transport mode with `Non Specificato`.
    pub fill_unspecified_defaults: bool,
}

impl ParseOptions {
    pub fn with_fill_unspecified_defaults(mut self, enable: bool) -> Self {
        self.fill_unspecified_defaults = enable;
        self
    }
}
