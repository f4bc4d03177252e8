//! Error types for the scheduling engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only malformed input and configuration problems surface as errors; under-
//! coverage, exhausted retry budgets and rejected relaxations are ordinary
//! data in the returned result.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// The main error type for the scheduling engine.
///
/// All fallible operations in the engine return this error type.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::InvalidUnitSize { minutes: 0 };
/// assert_eq!(error.to_string(), "Invalid unit size: 0 minutes");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The atomic unit size is zero or otherwise unusable.
    #[error("Invalid unit size: {minutes} minutes")]
    InvalidUnitSize {
        /// The rejected unit size in minutes.
        minutes: u32,
    },

    /// A time window was empty or inverted.
    #[error("Invalid time range for role '{role}' on {day}: {start}-{end}")]
    InvalidTimeRange {
        /// The day the window belongs to.
        day: NaiveDate,
        /// The role the demand was for.
        role: String,
        /// Window start.
        start: NaiveTime,
        /// Window end.
        end: NaiveTime,
    },

    /// A demand window is not a positive multiple of the unit size.
    #[error(
        "Demand window {start}-{end} for role '{role}' on {day} is not a multiple of {unit_minutes} minutes"
    )]
    UnalignedBlock {
        /// The day the window belongs to.
        day: NaiveDate,
        /// The role the demand was for.
        role: String,
        /// Window start.
        start: NaiveTime,
        /// Window end.
        end: NaiveTime,
        /// The atomic unit size in minutes.
        unit_minutes: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_invalid_unit_size_displays_minutes() {
        let error = EngineError::InvalidUnitSize { minutes: 0 };
        assert_eq!(error.to_string(), "Invalid unit size: 0 minutes");
    }

    #[test]
    fn test_invalid_time_range_displays_window() {
        let error = EngineError::InvalidTimeRange {
            day: date("2025-09-22"),
            role: "sales".to_string(),
            start: time("12:00"),
            end: time("08:00"),
        };
        assert_eq!(
            error.to_string(),
            "Invalid time range for role 'sales' on 2025-09-22: 12:00:00-08:00:00"
        );
    }

    #[test]
    fn test_unaligned_block_displays_unit() {
        let error = EngineError::UnalignedBlock {
            day: date("2025-09-22"),
            role: "cashier".to_string(),
            start: time("09:00"),
            end: time("10:30"),
            unit_minutes: 60,
        };
        assert_eq!(
            error.to_string(),
            "Demand window 09:00:00-10:30:00 for role 'cashier' on 2025-09-22 is not a multiple of 60 minutes"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/constraints.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/constraints.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_unit() -> EngineResult<()> {
            Err(EngineError::InvalidUnitSize { minutes: 0 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_unit()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
