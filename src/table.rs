//! In-memory trip table with columns derived from each trip's start time.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Optional columns a city's file may or may not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSet {
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl ColumnSet {
    pub const USER_TYPE: &'static str = "User Type";
    pub const GENDER: &'static str = "Gender";
    pub const BIRTH_YEAR: &'static str = "Birth Year";

    /// Every optional column present.
    pub fn all() -> Self {
        Self {
            user_type: true,
            gender: true,
            birth_year: true,
        }
    }

    /// Detects optional columns from a header row.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::default();
        for header in headers {
            match header.trim() {
                Self::USER_TYPE => set.user_type = true,
                Self::GENDER => set.gender = true,
                Self::BIRTH_YEAR => set.birth_year = true,
                _ => {}
            }
        }
        set
    }
}

/// One bicycle rental plus the month, weekday and hour of its start time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub duration_secs: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived from start_time
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl Trip {
    pub fn new(
        start_time: NaiveDateTime,
        start_station: &str,
        end_station: &str,
        duration_secs: f64,
    ) -> Self {
        Trip {
            start_time,
            start_station: start_station.to_string(),
            end_station: end_station.to_string(),
            duration_secs,
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn with_user_type(mut self, user_type: &str) -> Self {
        self.user_type = Some(user_type.to_string());
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }
}

/// All trips loaded for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    city: String,
    columns: ColumnSet,
    trips: Vec<Trip>,
}

impl TripTable {
    pub fn new(city: &str, columns: ColumnSet, trips: Vec<Trip>) -> Self {
        Self {
            city: city.to_string(),
            columns,
            trips,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Keeps only the trips for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Trip) -> bool) {
        self.trips.retain(keep);
    }
}
