use bikeshare_stats::config::{CityConfig, CitySource};
use bikeshare_stats::error::{BikeshareError, LoadError};
use bikeshare_stats::filter::{apply_filters, filter_by_day, filter_by_month};
use bikeshare_stats::interactive::{Prompter, run_session};
use bikeshare_stats::loader::load_city;
use bikeshare_stats::pipeline::run_report;
use bikeshare_stats::selection::{DayFilter, FilterSelection, MonthFilter};
use chrono::{Month, Weekday};
use std::io::Cursor;
use std::path::PathBuf;

fn fixtures() -> CityConfig {
    CityConfig::default().with_data_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

fn data_rows(file: &str) -> usize {
    let path = fixtures().data_dir.join(file);
    let content = std::fs::read_to_string(path).unwrap();
    content.lines().filter(|l| !l.trim().is_empty()).count() - 1
}

#[test]
fn test_unfiltered_load_keeps_every_row() {
    let config = fixtures();
    for city in &config.cities {
        let table = load_city(&config, city).unwrap();
        let table = apply_filters(table, MonthFilter::All, DayFilter::All);
        assert_eq!(table.len(), data_rows(&city.file), "{}", city.name);
    }
}

#[test]
fn test_filters_keep_only_matching_rows_and_compose() {
    let config = fixtures();
    let city = config.resolve("chicago").unwrap();
    let month = MonthFilter::Only(Month::June);
    let day = DayFilter::Only(Weekday::Mon);

    let by_month = filter_by_month(load_city(&config, city).unwrap(), month);
    assert_eq!(by_month.len(), 3);
    assert!(by_month.trips().iter().all(|t| t.month == 6));

    let by_day = filter_by_day(load_city(&config, city).unwrap(), day);
    assert_eq!(by_day.len(), 4);
    assert!(by_day.trips().iter().all(|t| t.weekday == Weekday::Mon));

    let month_then_day = filter_by_day(by_month, day);
    let day_then_month = filter_by_month(by_day, month);
    assert_eq!(month_then_day, day_then_month);
    assert_eq!(month_then_day.len(), 1);
}

#[test]
fn test_chicago_unfiltered_report() {
    let report = run_report(&fixtures(), &FilterSelection::unfiltered("chicago")).unwrap();

    assert_eq!(report.rows, 10);

    let hour = &report.time.popular_hour;
    assert!(hour.value <= 23);
    assert!(hour.count <= report.rows);
    assert_eq!(hour.value, 8);
    assert_eq!(hour.count, 5);
    assert_eq!(hour.percent(), 50.0);

    assert_eq!(report.time.popular_month.as_ref().unwrap().value, Month::June);
    assert_eq!(report.time.popular_day.as_ref().unwrap().value, Weekday::Mon);

    assert_eq!(report.stations.start.value, "Canal St & Adams St");
    assert_eq!(
        report.stations.trip.value,
        "Canal St & Adams St -to- Clinton St & Madison St"
    );
    assert_eq!(report.stations.trip.count, 5);

    let users = &report.users;
    let types = users.user_types.as_ref().unwrap();
    assert_eq!(types.counts[0].value, "Subscriber");
    assert_eq!(types.counts[0].count, 7);

    let genders = users.genders.as_ref().unwrap();
    assert_eq!(genders.counts[0].value, "Male");
    assert_eq!(genders.counts[0].count, 5);
    assert_eq!(genders.missing, 2);

    let years = users.birth_years.as_ref().unwrap();
    assert_eq!(years.earliest, 1975);
    assert_eq!(years.latest, 2000);
    assert_eq!(years.most_common.value, 1990);
    assert_eq!(years.most_common.count, 4);
}

#[test]
fn test_washington_omits_gender_and_birth_year() {
    let report = run_report(&fixtures(), &FilterSelection::unfiltered("washington")).unwrap();

    assert!(report.users.genders.is_none());
    assert!(report.users.birth_years.is_none());

    let types = report.users.user_types.as_ref().unwrap();
    assert_eq!(types.counts[0].value, "Subscriber");
    assert_eq!(types.counts[0].count, 4);
    assert_eq!(types.counts[1].value, "Customer");
    assert_eq!(types.counts[1].count, 2);

    assert_eq!(report.durations.total_secs, 5942.0);
    assert_eq!(
        report.durations.total_display(),
        "0 years 000 days 01 hrs 39 min 02 sec"
    );
    assert_eq!(report.durations.mean_display(), "00 hrs 16 min 30 sec");
}

#[test]
fn test_new_york_june_mondays_is_empty_result_set() {
    let selection = FilterSelection::new(
        "new york city",
        MonthFilter::Only(Month::June),
        DayFilter::Only(Weekday::Mon),
    );
    let err = run_report(&fixtures(), &selection).unwrap_err();
    assert!(matches!(err, BikeshareError::EmptyResultSet));
}

#[test]
fn test_pinned_axes_skip_their_modes() {
    let selection = FilterSelection::new(
        "new york city",
        MonthFilter::Only(Month::May),
        DayFilter::Only(Weekday::Mon),
    );
    let report = run_report(&fixtures(), &selection).unwrap();

    assert_eq!(report.rows, 1);
    assert!(report.time.popular_month.is_none());
    assert!(report.time.popular_day.is_none());
    assert_eq!(report.time.popular_hour.value, 8);
}

#[test]
fn test_malformed_file_is_data_unavailable() {
    let mut config = fixtures();
    config.cities.push(CitySource {
        name: "broken".to_string(),
        file: "broken.csv".to_string(),
    });

    let err = run_report(&config, &FilterSelection::unfiltered("broken")).unwrap_err();
    match err {
        BikeshareError::DataUnavailable {
            city,
            source: LoadError::InvalidTimestamp { line, .. },
        } => {
            assert_eq!(city, "broken");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_city() {
    let err = run_report(&fixtures(), &FilterSelection::unfiltered("boston")).unwrap_err();
    assert!(matches!(err, BikeshareError::UnknownCity(_)));
}

#[test]
fn test_session_report_then_empty_result_then_exit() {
    let input = "washington\nnone\nyes\nnew york city\nboth\njune\n2\nno\n";
    let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

    run_session(&fixtures(), &mut prompter).unwrap();

    let text = String::from_utf8(prompter.into_output()).unwrap();
    assert!(text.contains("Data is filtered to city: Washington, month: All, day: All"));
    assert!(text.contains("14th & Belmont St NW -to- 15th & K St NW"));
    assert!(!text.contains("Gender"));
    assert!(text.contains("Data is filtered to city: New York City, month: June, day: Monday"));
    assert!(text.contains("No data matches these filters"));
    assert_eq!(text.matches("Would you like to restart?").count(), 2);
}
