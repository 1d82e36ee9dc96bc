use tracing::debug;

use crate::analyzers::types::{BirthYearStats, CategoryBreakdown, CategoryCount, ModeCount, UserStats};
use crate::analyzers::utility::value_counts;
use crate::table::TripTable;

/// Counts each value of a category column, skipping blanks.
///
/// Ordered by count, highest first, then by value.
fn breakdown<'a>(values: impl Iterator<Item = Option<&'a str>>, total: usize) -> CategoryBreakdown {
    let mut missing = 0;
    let present = values.filter_map(|v| {
        if v.is_none() {
            missing += 1;
        }
        v
    });

    let mut counts: Vec<CategoryCount> = value_counts(present)
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
            total,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

    CategoryBreakdown { counts, missing }
}

/// Earliest, latest and most common birth year; `None` if no row carries one.
fn birth_year_stats(table: &TripTable) -> Option<BirthYearStats> {
    let trips = table.trips();
    let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();

    let earliest = years.iter().min().copied()?;
    let latest = years.iter().max().copied()?;
    let missing = trips.len() - years.len();
    let most_common = ModeCount::of(years, trips.len())?;

    Some(BirthYearStats {
        earliest,
        latest,
        most_common,
        missing,
    })
}

/// Demographic breakdowns for whichever optional columns the table carries.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn user_stats(table: &TripTable) -> UserStats {
    let columns = table.columns();
    let trips = table.trips();
    let total = trips.len();

    let user_types = columns
        .user_type
        .then(|| breakdown(trips.iter().map(|t| t.user_type.as_deref()), total));

    let genders = columns
        .gender
        .then(|| breakdown(trips.iter().map(|t| t.gender.as_deref()), total));

    let birth_years = if columns.birth_year {
        birth_year_stats(table)
    } else {
        None
    };

    debug!(?columns, "User stats computed");

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}
