//! Scouting schedule generator.
//!
//! Assigns lead scouters, camera operators and one scouter per position to
//! every match of an event, in turns delimited by break points, then exposes
//! read-only queries for per-person views and exporters for text, CSV and JSON.

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{Result, SchedulerError};
