use std::time::{Duration, Instant};

use tracing::info;

use crate::analyzers::duration::duration_stats;
use crate::analyzers::stations::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::types::{Report, SectionTimings};
use crate::analyzers::users::user_stats;
use crate::error::BikeshareError;
use crate::selection::FilterSelection;
use crate::table::TripTable;

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Computes all four sections for an already-filtered table.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyResultSet`] if the table has no rows.
#[tracing::instrument(skip(table, selection), fields(city = %selection.city, rows = table.len()))]
pub fn build_report(
    table: &TripTable,
    selection: &FilterSelection,
) -> Result<Report, BikeshareError> {
    if table.is_empty() {
        info!(month = %selection.month, day = %selection.day, "No trips match the filters");
        return Err(BikeshareError::EmptyResultSet);
    }

    let (time, time_elapsed) = timed(|| time_stats(table, selection.month, selection.day));
    let (stations, stations_elapsed) = timed(|| station_stats(table));
    let (durations, durations_elapsed) = timed(|| duration_stats(table));
    let (users, users_elapsed) = timed(|| user_stats(table));

    Ok(Report {
        selection: selection.clone(),
        rows: table.len(),
        time: time.ok_or(BikeshareError::EmptyResultSet)?,
        stations: stations.ok_or(BikeshareError::EmptyResultSet)?,
        durations: durations.ok_or(BikeshareError::EmptyResultSet)?,
        users,
        timings: SectionTimings {
            time: time_elapsed,
            stations: stations_elapsed,
            durations: durations_elapsed,
            users: users_elapsed,
        },
    })
}
