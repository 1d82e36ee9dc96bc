//! CSV loader for a city's trip file.

use std::fs::File;
use std::io::Read;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{CityConfig, CitySource};
use crate::error::{BikeshareError, LoadError};
use crate::table::{ColumnSet, Trip, TripTable};

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] =
    ["Start Time", "Start Station", "End Station", "Trip Duration"];

/// Accepts whole or fractional seconds.
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single row as it appears in the CSV. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // stored as e.g. `1992.0`
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Loads the configured file for `city`.
///
/// # Errors
///
/// Returns [`BikeshareError::DataUnavailable`] if the file is missing or
/// any row cannot be read.
#[tracing::instrument(skip(config), fields(city = %city.name))]
pub fn load_city(config: &CityConfig, city: &CitySource) -> Result<TripTable, BikeshareError> {
    let path = config.path_for(city);
    debug!(path = %path.display(), "Opening trip file");

    let file = File::open(&path)
        .map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })
        .map_err(|e| BikeshareError::unavailable(&city.name, e))?;

    let table =
        load_from_reader(&city.name, file).map_err(|e| BikeshareError::unavailable(&city.name, e))?;

    info!(rows = table.len(), "Trip file loaded");
    Ok(table)
}

/// Reads trips for `city` from any CSV source with a header row.
pub fn load_from_reader<R: Read>(city: &str, reader: R) -> Result<TripTable, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_required_columns(&headers)?;
    let columns = ColumnSet::from_headers(headers.iter());
    debug!(?columns, "Optional columns detected");

    let mut trips = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let raw: RawTrip = record.deserialize(Some(&headers))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        trips.push(into_trip(raw, line)?);
    }

    Ok(TripTable::new(city, columns, trips))
}

fn check_required_columns(headers: &StringRecord) -> Result<(), LoadError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }
    Ok(())
}

fn into_trip(raw: RawTrip, line: u64) -> Result<Trip, LoadError> {
    let start_time = NaiveDateTime::parse_from_str(&raw.start_time, START_TIME_FORMAT).map_err(
        |source| LoadError::InvalidTimestamp {
            line,
            value: raw.start_time.clone(),
            source,
        },
    )?;

    let mut trip = Trip::new(
        start_time,
        &raw.start_station,
        &raw.end_station,
        raw.trip_duration,
    );
    trip.user_type = raw.user_type;
    trip.gender = raw.gender;
    trip.birth_year = raw.birth_year.and_then(whole_year);

    Ok(trip)
}

/// Rounds a birth year to a whole number; NaN, infinities and values outside
/// the `i32` range count as missing.
fn whole_year(year: f64) -> Option<i32> {
    let rounded = year.round();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Some(rounded as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_load_chicago_layout() {
        let table = load_from_reader("chicago", CHICAGO.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns(), ColumnSet::all());

        let first = &table.trips()[0];
        assert_eq!(first.month, 6);
        assert_eq!(first.weekday, Weekday::Fri);
        assert_eq!(first.hour, 15);
        assert_eq!(first.duration_secs, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));

        let last = &table.trips()[2];
        assert_eq!(last.gender, None);
        assert_eq!(last.birth_year, None);
    }

    #[test]
    fn test_load_washington_layout() {
        let table = load_from_reader("washington", WASHINGTON.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.columns().user_type);
        assert!(!table.columns().gender);
        assert!(!table.columns().birth_year);
        assert_eq!(table.trips()[0].duration_secs, 489.066);
    }

    #[test]
    fn test_unusable_birth_years_are_missing() {
        let csv = "Start Time,Trip Duration,Start Station,End Station,Birth Year\n\
                   2017-01-01 00:00:00,60,A,B,NaN\n\
                   2017-01-01 00:00:00,60,A,B,inf\n\
                   2017-01-01 00:00:00,60,A,B,1e12\n\
                   2017-01-01 00:00:00,60,A,B,1990.0\n";
        let table = load_from_reader("test", csv.as_bytes()).unwrap();

        let years: Vec<_> = table.trips().iter().map(|t| t.birth_year).collect();
        assert_eq!(years, vec![None, None, None, Some(1990)]);
    }

    #[test]
    fn test_whole_year() {
        assert_eq!(whole_year(1984.6), Some(1985));
        assert_eq!(whole_year(f64::NAN), None);
        assert_eq!(whole_year(f64::NEG_INFINITY), None);
        assert_eq!(whole_year(-1e12), None);
    }

    #[test]
    fn test_fractional_seconds_in_start_time() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\n\
                   2017-02-01 07:00:00.500,60,A,B\n";
        let table = load_from_reader("test", csv.as_bytes()).unwrap();
        assert_eq!(table.trips()[0].hour, 7);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Start Time,Trip Duration,Start Station\n2017-01-01 00:00:00,60,A\n";
        let err = load_from_reader("test", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("End Station")));
    }

    #[test]
    fn test_invalid_timestamp_reports_line() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\n\
                   2017-01-01 00:00:00,60,A,B\n\
                   not a date,60,A,B\n";
        let err = load_from_reader("test", csv.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidTimestamp { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_duration_is_malformed() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\n\
                   2017-01-01 00:00:00,long,A,B\n";
        let err = load_from_reader("test", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_load_city_missing_file() {
        let config = CityConfig::default().with_data_dir("/nonexistent/bikeshare");
        let city = config.resolve("chicago").unwrap().clone();

        let err = load_city(&config, &city).unwrap_err();
        match err {
            BikeshareError::DataUnavailable { city, source } => {
                assert_eq!(city, "chicago");
                assert!(matches!(source, LoadError::Io { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
