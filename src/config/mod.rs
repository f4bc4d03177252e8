//! Configuration loading and management for the scheduling engine.
//!
//! This module provides the constraint registry, the triage policy, and a
//! loader that reads both from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Daily cap: {}h", config.config().constraints.max_hours_per_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ConstraintSet, RelaxationStep, ScheduleConfig, TriagePolicy};
