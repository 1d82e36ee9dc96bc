//! Load → filter → aggregate for one selection.

use crate::analyzers::report::build_report;
use crate::analyzers::types::Report;
use crate::config::CityConfig;
use crate::error::BikeshareError;
use crate::filter::apply_filters;
use crate::loader::load_city;
use crate::selection::{DayFilter, FilterSelection, MonthFilter};

/// Produces the report for `selection`.
///
/// # Errors
///
/// [`BikeshareError::UnknownCity`] if the city is not configured,
/// [`BikeshareError::DataUnavailable`] if its file cannot be loaded, and
/// [`BikeshareError::EmptyResultSet`] if no trips match the filters.
#[tracing::instrument(skip(config), fields(city = %selection.city, month = %selection.month, day = %selection.day))]
pub fn run_report(config: &CityConfig, selection: &FilterSelection) -> Result<Report, BikeshareError> {
    let city = config.resolve(&selection.city)?;
    let table = load_city(config, city)?;
    let table = apply_filters(table, selection.month, selection.day);
    build_report(&table, selection)
}

/// Builds a selection for `city` under its configured name.
///
/// # Errors
///
/// [`BikeshareError::UnknownCity`] if the city is not configured.
pub fn resolve_selection(
    config: &CityConfig,
    city: &str,
    month: MonthFilter,
    day: DayFilter,
) -> Result<FilterSelection, BikeshareError> {
    let city = config.resolve(city)?;
    Ok(FilterSelection::new(&city.name, month, day))
}
