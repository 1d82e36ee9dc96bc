//! Data types produced by the aggregation stage.

use std::time::Duration;

use chrono::{Month, Weekday};
use serde::Serialize;

use crate::analyzers::utility::{mode, pct};
use crate::selection::FilterSelection;

/// Most frequent value in a column, with its count and the rows in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeCount<T> {
    pub value: T,
    pub count: usize,
    pub total: usize,
}

impl<T: Ord> ModeCount<T> {
    /// Mode of `values` measured against `total` rows. `None` when `values` is empty.
    pub fn of(values: impl IntoIterator<Item = T>, total: usize) -> Option<Self> {
        mode(values).map(|(value, count)| ModeCount {
            value,
            count,
            total,
        })
    }
}

impl<T> ModeCount<T> {
    pub fn percent(&self) -> f64 {
        pct(self.count, self.total)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ModeCount<U> {
        ModeCount {
            value: f(self.value),
            count: self.count,
            total: self.total,
        }
    }
}

/// Rows carrying one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    pub total: usize,
}

impl CategoryCount {
    pub fn percent(&self) -> f64 {
        pct(self.count, self.total)
    }
}

/// Counts for every value of a category column, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub counts: Vec<CategoryCount>,
    /// Rows with a blank value.
    pub missing: usize,
}

/// Most popular month, weekday and start hour.
///
/// Month and weekday are `None` when the selection already pins them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub popular_month: Option<ModeCount<Month>>,
    pub popular_day: Option<ModeCount<Weekday>>,
    pub popular_hour: ModeCount<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start: ModeCount<String>,
    pub end: ModeCount<String>,
    /// Keyed as `"<start> -to- <end>"`.
    pub trip: ModeCount<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_secs: f64,
    pub mean_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: ModeCount<i32>,
    pub missing: usize,
}

/// Demographic sub-reports. Each is `None` when the loaded file lacks its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Option<CategoryBreakdown>,
    pub genders: Option<CategoryBreakdown>,
    pub birth_years: Option<BirthYearStats>,
}

/// Time spent computing each section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionTimings {
    pub time: Duration,
    pub stations: Duration,
    pub durations: Duration,
    pub users: Duration,
}

/// Every statistic for one filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub selection: FilterSelection,
    pub rows: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
    pub timings: SectionTimings,
}
