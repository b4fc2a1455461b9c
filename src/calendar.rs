//! Week arithmetic and grid construction.
//!
//! Everything here is day-granular and timezone-free: dates are plain
//! [`chrono::NaiveDate`]s and a week is the half-open span
//! `[start, start + 7d)`.

pub mod date;
pub mod grid;
