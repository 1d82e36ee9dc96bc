//! Descriptive statistics over bicycle-share trip records.
//!
//! A city's CSV is loaded into a [`table::TripTable`], narrowed by month and
//! weekday in [`filter`], summarized by [`analyzers`] and rendered by
//! [`output`].

pub mod analyzers;
pub mod config;
pub mod error;
pub mod filter;
pub mod interactive;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod selection;
pub mod table;
