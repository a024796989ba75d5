use std::fmt;
use std::iter::successors;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month, Weekday};

/// A calendar month of a specific year.
///
/// Construction goes through [`Period::new`], so every `Period` in existence
/// names a month that the calendar library can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Period {
    // Invariant: always the first day of its month
    first: Date,
}

impl Period {
    pub(crate) fn new(year: i32, month: u8) -> Result<Period, InvalidPeriod> {
        let invalid = InvalidPeriod { year, month };
        let month = Month::try_from(month).map_err(|_| invalid)?;
        let first = Date::from_calendar_date(year, month, 1).map_err(|_| invalid)?;
        Ok(Period { first })
    }

    pub(crate) fn year(self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(self) -> Month {
        self.first.month()
    }

    pub(crate) fn month_number(self) -> u8 {
        u8::from(self.month())
    }

    pub(crate) fn month_name(self) -> String {
        self.month().to_string()
    }

    pub(crate) fn day_count(self) -> u8 {
        days_in_month(self.year(), self.month())
    }

    /// Every date in the month, in order
    pub(crate) fn days(self) -> impl Iterator<Item = Date> {
        let month = self.month();
        successors(Some(self.first), |d| d.next_day()).take_while(move |d| d.month() == month)
    }

    /// `"1"` through the number of the last day of the month
    pub(crate) fn day_labels(self) -> impl Iterator<Item = String> {
        (1..=self.day_count()).map(|d| d.to_string())
    }

    pub(crate) fn weekday_initials(self) -> impl Iterator<Item = &'static str> {
        self.days().map(|d| d.weekday().initial())
    }

    pub(crate) fn export_filename(self) -> String {
        format!("habit_tracker_{}_{}.png", self.month_number(), self.year())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month_number())
    }
}

impl FromStr for Period {
    type Err = ParsePeriodError;

    /// Parses `YYYY-MM` (the month may be a single digit)
    fn from_str(s: &str) -> Result<Period, ParsePeriodError> {
        // Split on the last hyphen so that negative years survive
        let (year, month) = s.rsplit_once('-').ok_or(ParsePeriodError::Format)?;
        let year = year
            .parse::<i32>()
            .map_err(|_| ParsePeriodError::Format)?;
        let month = month
            .parse::<u8>()
            .map_err(|_| ParsePeriodError::Format)?;
        Ok(Period::new(year, month)?)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("invalid period: month {month} of year {year} does not exist")]
pub(crate) struct InvalidPeriod {
    year: i32,
    month: u8,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParsePeriodError {
    #[error("expected a month in the form YYYY-MM")]
    Format,
    #[error(transparent)]
    Invalid(#[from] InvalidPeriod),
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

pub(crate) trait WeekdayExt {
    /// The short label printed above each day column.  This is a fixed table
    /// rather than anything locale-derived.
    fn initial(self) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn initial(self) -> &'static str {
        match self {
            Weekday::Monday => "M",
            Weekday::Tuesday => "T",
            Weekday::Wednesday => "W",
            Weekday::Thursday => "Th",
            Weekday::Friday => "F",
            Weekday::Saturday => "Sa",
            Weekday::Sunday => "Su",
        }
    }
}
