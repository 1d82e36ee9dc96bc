//! Interactive prompt loop.
//!
//! [`Prompter`] is generic over its input and output so the whole session can
//! be driven from in-memory buffers.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::CityConfig;
use crate::error::{BikeshareError, SelectionError};
use crate::output::{log_json, render_banner, render_empty, render_report};
use crate::pipeline::run_report;
use crate::selection::{DayFilter, FilterMode, FilterSelection, MonthFilter, title_case};

const MONTH_PROMPT: &str = "Which month? January, February, March, April, May, or June? ";
const DAY_PROMPT: &str = "Which day? Please type your response as an integer (e.g., 1=Sunday)? ";
const FILTER_PROMPT: &str = "Would you like to filter the data by \"month\", \"day\", \"both\" or \"none\"? ";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn read_answer(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Asks `message` until `parse` accepts the answer.
    ///
    /// # Errors
    ///
    /// Fails only on I/O errors, including end of input.
    pub fn ask<T, E: Display>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<T> {
        loop {
            let answer = self.read_answer(message)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(input = %answer, reason = %e, "Invalid entry");
                    writeln!(self.output, "Warning: invalid entry\n")?;
                }
            }
        }
    }

    /// Asks for a city, a filter mode and then the month and/or day it calls for.
    pub fn ask_filters(&mut self, config: &CityConfig) -> io::Result<FilterSelection> {
        let names: Vec<String> = config.city_names().iter().map(|n| title_case(n)).collect();
        let city_prompt = format!("Would you like to see data for {}? ", names.join(", "));

        let city = self.ask(&city_prompt, |s| config.resolve(s).map(|c| c.name.clone()))?;
        let mode: FilterMode = self.ask(FILTER_PROMPT, |s| s.parse::<FilterMode>())?;

        let month = if mode.wants_month() {
            self.ask(MONTH_PROMPT, parse_month)?
        } else {
            MonthFilter::All
        };
        let day = if mode.wants_day() {
            self.ask(DAY_PROMPT, parse_day)?
        } else {
            DayFilter::All
        };

        Ok(FilterSelection::new(&city, month, day))
    }

    /// Only an answer of `yes` restarts.
    pub fn ask_restart(&mut self) -> io::Result<bool> {
        Ok(self.read_answer(RESTART_PROMPT)?.eq_ignore_ascii_case("yes"))
    }
}

fn parse_month(s: &str) -> Result<MonthFilter, SelectionError> {
    match s.parse::<MonthFilter>()? {
        MonthFilter::All => Err(SelectionError::new("month", s, "January through June")),
        month => Ok(month),
    }
}

fn parse_day(s: &str) -> Result<DayFilter, SelectionError> {
    match s.parse::<DayFilter>()? {
        DayFilter::All => Err(SelectionError::new("day", s, "an integer from 1 (Sunday) to 7")),
        day => Ok(day),
    }
}

/// Runs prompt → report → restart until the user declines.
///
/// Unavailable data and empty results are reported and followed by the
/// restart question; other errors end the session.
pub fn run_session<R: BufRead, W: Write>(
    config: &CityConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        prompter.say("Hello! Let's explore some US bikeshare data!")?;
        let selection = prompter.ask_filters(config)?;
        prompter.say(render_banner(&selection))?;
        prompter.say("\nLoading data with selected filters...")?;

        match run_report(config, &selection) {
            Ok(report) => {
                log_json(&report)?;
                prompter.say(render_report(&report))?;
            }
            Err(BikeshareError::EmptyResultSet) => {
                prompter.say(render_empty(&selection))?;
            }
            Err(e @ BikeshareError::DataUnavailable { .. }) => {
                error!(error = %e, "Report failed");
                prompter.say(format!("Error: {e}"))?;
            }
            Err(e) => return Err(e.into()),
        }

        if !prompter.ask_restart()? {
            info!("Session finished");
            return Ok(());
        }
    }
}
