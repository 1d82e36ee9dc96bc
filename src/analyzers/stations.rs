use crate::analyzers::types::{ModeCount, StationStats};
use crate::table::TripTable;

/// Joins start and end station into the key used for trip popularity.
pub const TRIP_SEPARATOR: &str = " -to- ";

pub fn trip_key(start: &str, end: &str) -> String {
    format!("{start}{TRIP_SEPARATOR}{end}")
}

/// Most popular start station, end station and start/end pair.
/// Returns `None` for an empty table.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn station_stats(table: &TripTable) -> Option<StationStats> {
    let trips = table.trips();
    let total = trips.len();

    let start = ModeCount::of(trips.iter().map(|t| t.start_station.as_str()), total)?
        .map(str::to_string);
    let end = ModeCount::of(trips.iter().map(|t| t.end_station.as_str()), total)?
        .map(str::to_string);
    let trip = ModeCount::of(
        trips.iter().map(|t| trip_key(&t.start_station, &t.end_station)),
        total,
    )?;

    Some(StationStats { start, end, trip })
}
