//! Narrows a trip table to a selected month and/or weekday.

use tracing::debug;

use crate::selection::{DayFilter, MonthFilter};
use crate::table::TripTable;

/// Keeps the trips starting in `month`.
pub fn filter_by_month(mut table: TripTable, month: MonthFilter) -> TripTable {
    if !month.is_all() {
        table.retain(|t| month.matches(t.month));
    }
    table
}

/// Keeps the trips starting on `day`.
pub fn filter_by_day(mut table: TripTable, day: DayFilter) -> TripTable {
    if !day.is_all() {
        table.retain(|t| day.matches(t.weekday));
    }
    table
}

/// Applies the month filter, then the day filter.
///
/// The result may be empty; callers decide how to report that.
#[tracing::instrument(skip(table), fields(city = table.city(), rows_in = table.len()))]
pub fn apply_filters(table: TripTable, month: MonthFilter, day: DayFilter) -> TripTable {
    let table = filter_by_day(filter_by_month(table, month), day);
    debug!(rows_out = table.len(), "Filters applied");
    table
}
