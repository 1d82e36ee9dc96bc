//! Text rendering of reports for the terminal.
//!
//! Every function returns a `String`; callers decide where it goes.

use std::fmt::{Display, Write};
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::analyzers::types::{CategoryBreakdown, ModeCount, Report};
use crate::selection::{FilterSelection, title_case, weekday_name};

pub const DIVIDER_WIDTH: usize = 80;
const SECTION_DIVIDER_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 28;

pub fn divider(width: usize) -> String {
    "-".repeat(width)
}

/// Banner confirming the active filters.
pub fn render_banner(selection: &FilterSelection) -> String {
    format!(
        "{line}\nData is filtered to city: {}, month: {}, day: {}\n{line}",
        title_case(&selection.city),
        selection.month,
        selection.day,
        line = divider(DIVIDER_WIDTH),
    )
}

/// Message shown when the filters leave no trips.
pub fn render_empty(selection: &FilterSelection) -> String {
    format!(
        "No data matches these filters (city: {}, month: {}, day: {}).",
        title_case(&selection.city),
        selection.month,
        selection.day,
    )
}

fn mode_line<T>(out: &mut String, label: &str, value: impl Display, mode: &ModeCount<T>) {
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{value}  (count: {}, {:.2}%)",
        format!("{label}:"),
        mode.count,
        mode.percent(),
    );
}

fn value_line(out: &mut String, label: &str, value: impl Display) {
    let _ = writeln!(out, "  {:<LABEL_WIDTH$}{value}", format!("{label}:"));
}

fn breakdown_lines(out: &mut String, label: &str, breakdown: &CategoryBreakdown) {
    let _ = writeln!(out, "  {label}:");
    for c in &breakdown.counts {
        let _ = writeln!(
            out,
            "    {:<24}{:>10}  ({:.2}%)",
            c.value,
            c.count,
            c.percent()
        );
    }
    if breakdown.missing > 0 {
        let _ = writeln!(out, "    {:<24}{:>10}", "(blank)", breakdown.missing);
    }
}

fn section_footer(out: &mut String, elapsed: Duration) {
    let _ = writeln!(out, "\nThis took {:.6} seconds.", elapsed.as_secs_f64());
    let _ = writeln!(out, "{}", divider(SECTION_DIVIDER_WIDTH));
}

pub fn render_time(out: &mut String, report: &Report) {
    let time = &report.time;
    let _ = writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n");
    if let Some(month) = &time.popular_month {
        mode_line(out, "Most Popular Month", month.value.name(), month);
    }
    if let Some(day) = &time.popular_day {
        mode_line(out, "Most Popular Day", weekday_name(day.value), day);
    }
    mode_line(
        out,
        "Most Popular Start Hour",
        time.popular_hour.value,
        &time.popular_hour,
    );
    section_footer(out, report.timings.time);
}

pub fn render_stations(out: &mut String, report: &Report) {
    let s = &report.stations;
    let _ = writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n");
    mode_line(out, "Most Popular Start Station", &s.start.value, &s.start);
    mode_line(out, "Most Popular End Station", &s.end.value, &s.end);
    mode_line(out, "Most Popular Trip", &s.trip.value, &s.trip);
    section_footer(out, report.timings.stations);
}

pub fn render_durations(out: &mut String, report: &Report) {
    let d = &report.durations;
    let _ = writeln!(out, "\nCalculating Trip Duration...\n");
    value_line(out, "Total Travel Time", d.total_display());
    value_line(out, "Mean Travel Time", d.mean_display());
    value_line(out, "Trips", d.trips);
    section_footer(out, report.timings.durations);
}

/// Demographics; sub-reports for absent columns are left out entirely.
pub fn render_users(out: &mut String, report: &Report) {
    let u = &report.users;
    let _ = writeln!(out, "\nCalculating User Stats...\n");
    if let Some(types) = &u.user_types {
        breakdown_lines(out, "User Types", types);
    }
    if let Some(genders) = &u.genders {
        breakdown_lines(out, "Gender", genders);
    }
    if let Some(years) = &u.birth_years {
        value_line(out, "Earliest Birth Year", years.earliest);
        value_line(out, "Most Recent Birth Year", years.latest);
        mode_line(
            out,
            "Most Common Birth Year",
            years.most_common.value,
            &years.most_common,
        );
    }
    section_footer(out, report.timings.users);
}

/// All four sections in display order.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    render_time(&mut out, report);
    render_stations(&mut out, report);
    render_durations(&mut out, report);
    render_users(&mut out, report);
    out
}

/// Logs the report as JSON for the structured log file.
pub fn log_json(report: &Report) -> Result<()> {
    debug!(report = %serde_json::to_string(report)?, "Report computed");
    Ok(())
}
