use chrono::Month;

use crate::analyzers::types::{ModeCount, TimeStats};
use crate::selection::{DayFilter, MonthFilter, WEEKDAYS_FROM_SUNDAY};
use crate::table::TripTable;

static CALENDAR: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

fn month_from_number(n: u32) -> Option<Month> {
    CALENDAR.get(usize::try_from(n.checked_sub(1)?).ok()?).copied()
}

/// Most popular month, weekday and start hour.
///
/// An axis already pinned by `month` or `day` is skipped. Returns `None` for
/// an empty table.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn time_stats(table: &TripTable, month: MonthFilter, day: DayFilter) -> Option<TimeStats> {
    let trips = table.trips();
    let total = trips.len();

    let popular_hour = ModeCount::of(trips.iter().map(|t| t.hour), total)?;

    let popular_month = if month.is_all() {
        ModeCount::of(trips.iter().map(|t| t.month), total)
            .and_then(|m| month_from_number(m.value).map(|name| m.map(|_| name)))
    } else {
        None
    };

    // counted Sunday-first so ties resolve to the earliest day of the week
    let popular_day = if day.is_all() {
        ModeCount::of(trips.iter().map(|t| t.weekday.num_days_from_sunday()), total)
            .and_then(|d| {
                let weekday = usize::try_from(d.value)
                    .ok()
                    .and_then(|i| WEEKDAYS_FROM_SUNDAY.get(i).copied())?;
                Some(d.map(|_| weekday))
            })
    } else {
        None
    };

    Some(TimeStats {
        popular_month,
        popular_day,
        popular_hour,
    })
}
