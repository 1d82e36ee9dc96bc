//! Month, day and city selections and the rules for parsing them from user input.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use serde::Serialize;

use crate::error::SelectionError;

/// Months covered by the datasets, in calendar order.
pub const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

/// Weekdays in the order used by the day prompt (1 = Sunday).
pub const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English weekday name, independent of any locale setting.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Maps the prompt's day number (1 = Sunday … 7 = Saturday) to a weekday.
pub fn weekday_from_prompt_number(n: u32) -> Option<Weekday> {
    let index = usize::try_from(n.checked_sub(1)?).ok()?;
    WEEKDAYS_FROM_SUNDAY.get(index).copied()
}

/// Uppercases the first letter of each word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Month axis of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, MonthFilter::All)
    }

    pub fn matches(&self, month_number: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m.number_from_month() == month_number,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = SelectionError;

    /// Accepts `all` or a full month name from January to June, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if input == "all" {
            return Ok(MonthFilter::All);
        }

        MONTHS
            .iter()
            .find(|m| m.name().to_lowercase() == input)
            .map(|m| MonthFilter::Only(*m))
            .ok_or_else(|| SelectionError::new("month", s, "January through June or `all`"))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => write!(f, "All"),
            MonthFilter::Only(m) => write!(f, "{}", m.name()),
        }
    }
}

/// Day-of-week axis of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, DayFilter::All)
    }

    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => *d == day,
        }
    }
}

impl FromStr for DayFilter {
    type Err = SelectionError;

    /// Accepts `all`, a prompt number 1–7 (1 = Sunday) or a full weekday name in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if input == "all" {
            return Ok(DayFilter::All);
        }

        let by_number = input.parse::<u32>().ok().and_then(weekday_from_prompt_number);
        let by_name = || {
            WEEKDAYS_FROM_SUNDAY
                .iter()
                .find(|d| weekday_name(**d).to_lowercase() == input)
                .copied()
        };

        by_number
            .or_else(by_name)
            .map(DayFilter::Only)
            .ok_or_else(|| SelectionError::new("day", s, "1-7 (1 = Sunday), a weekday name or `all`"))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => write!(f, "All"),
            DayFilter::Only(d) => write!(f, "{}", weekday_name(*d)),
        }
    }
}

/// Which axes the user wants to filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Month,
    Day,
    Both,
    None,
}

impl FilterMode {
    pub fn wants_month(&self) -> bool {
        matches!(self, FilterMode::Month | FilterMode::Both)
    }

    pub fn wants_day(&self) -> bool {
        matches!(self, FilterMode::Day | FilterMode::Both)
    }
}

impl FromStr for FilterMode {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(FilterMode::Month),
            "day" => Ok(FilterMode::Day),
            "both" => Ok(FilterMode::Both),
            "none" => Ok(FilterMode::None),
            _ => Err(SelectionError::new("filter", s, "month, day, both or none")),
        }
    }
}

/// The (city, month, day) triple chosen for one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub city: String,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: &str, month: MonthFilter, day: DayFilter) -> Self {
        Self {
            city: city.to_string(),
            month,
            day,
        }
    }

    /// Selection with no month or day restriction.
    pub fn unfiltered(city: &str) -> Self {
        Self::new(city, MonthFilter::All, DayFilter::All)
    }
}
