//! Core types for calgrid.
//!
//! This crate holds everything that is not presentation:
//! - `grid` builds the week-by-week layout of a month
//! - `store` owns the per-day events with validation and overlap checks
//! - `storage` is the persistence boundary the store writes through

pub mod config;
pub mod constants;
pub mod day_key;
pub mod error;
pub mod event;
pub mod grid;
pub mod month;
pub mod storage;
pub mod store;
pub mod time_of_day;

pub use day_key::DayKey;
pub use error::{CalGridError, CalGridResult, ValidationError};
pub use event::{Event, EventDraft, OverlapRule};
pub use grid::{CalendarGrid, Week, build_grid, days_in_month};
pub use month::YearMonth;
pub use storage::{EventStorage, JsonFileStorage, MemoryStorage};
pub use store::{EventMap, EventStore};
pub use time_of_day::TimeOfDay;
