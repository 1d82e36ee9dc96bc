use crate::analyzers::types::DurationStats;
use crate::table::TripTable;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
// no leap years
const SECS_PER_YEAR: u64 = 365 * SECS_PER_DAY;

/// Total and mean trip duration. Returns `None` for an empty table.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn duration_stats(table: &TripTable) -> Option<DurationStats> {
    let trips = table.trips();
    if trips.is_empty() {
        return None;
    }

    let total_secs: f64 = trips.iter().map(|t| t.duration_secs).sum();

    Some(DurationStats {
        trips: trips.len(),
        total_secs,
        mean_secs: total_secs / trips.len() as f64,
    })
}

impl DurationStats {
    pub fn total_display(&self) -> String {
        format_total_duration(whole_secs(self.total_secs))
    }

    pub fn mean_display(&self) -> String {
        format_mean_duration(whole_secs(self.mean_secs))
    }
}

fn whole_secs(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.round() as u64
    } else {
        0
    }
}

/// Formats seconds as `"{y} years {ddd} days {hh} hrs {mm} min {ss} sec"`.
pub fn format_total_duration(secs: u64) -> String {
    let years = secs / SECS_PER_YEAR;
    let days = secs % SECS_PER_YEAR / SECS_PER_DAY;
    format!(
        "{years} years {days:03} days {}",
        format_mean_duration(secs % SECS_PER_DAY)
    )
}

/// Formats seconds as `"{hh} hrs {mm} min {ss} sec"`.
pub fn format_mean_duration(secs: u64) -> String {
    let hours = secs / SECS_PER_HOUR;
    let minutes = secs % SECS_PER_HOUR / SECS_PER_MINUTE;
    let seconds = secs % SECS_PER_MINUTE;
    format!("{hours:02} hrs {minutes:02} min {seconds:02} sec")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnSet, Trip};
    use chrono::NaiveDate;

    fn table(durations: &[f64]) -> TripTable {
        let at = NaiveDate::from_ymd_opt(2017, 2, 14)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        let trips = durations.iter().map(|d| Trip::new(at, "A", "B", *d)).collect();
        TripTable::new("test", ColumnSet::default(), trips)
    }

    #[test]
    fn test_format_total_duration_exact_year() {
        assert_eq!(
            format_total_duration(31_536_000),
            "1 years 000 days 00 hrs 00 min 00 sec"
        );
    }

    #[test]
    fn test_format_total_duration_ignores_leap_years() {
        // 366 days is one 365-day year plus a day
        assert_eq!(
            format_total_duration(31_622_400),
            "1 years 001 days 00 hrs 00 min 00 sec"
        );
    }

    #[test]
    fn test_format_total_duration_mixed() {
        let secs = 2 * SECS_PER_YEAR + 45 * SECS_PER_DAY + 3 * SECS_PER_HOUR + 7 * 60 + 9;
        assert_eq!(
            format_total_duration(secs),
            "2 years 045 days 03 hrs 07 min 09 sec"
        );
    }

    #[test]
    fn test_format_mean_duration() {
        assert_eq!(format_mean_duration(0), "00 hrs 00 min 00 sec");
        assert_eq!(format_mean_duration(936), "00 hrs 15 min 36 sec");
        assert_eq!(format_mean_duration(3_725), "01 hrs 02 min 05 sec");
    }

    #[test]
    fn test_duration_stats() {
        let stats = duration_stats(&table(&[100.0, 200.0, 300.5])).unwrap();
        assert_eq!(stats.trips, 3);
        assert_eq!(stats.total_secs, 600.5);
        assert_eq!(stats.total_display(), "0 years 000 days 00 hrs 10 min 01 sec");
        assert_eq!(stats.mean_display(), "00 hrs 03 min 20 sec");
    }

    #[test]
    fn test_empty_table() {
        assert!(duration_stats(&table(&[])).is_none());
    }
}
