//! Trip statistics computed over a filtered table.
//!
//! Four independent sections (time of travel, stations, trip duration and
//! user demographics) are collected into a [`types::Report`]. Every "most
//! frequent" value breaks ties in favour of the smallest value.

pub mod duration;
pub mod report;
pub mod stations;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;
