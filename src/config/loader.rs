//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the constraint
//! registry and triage policy from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ConstraintSet, ScheduleConfig, TriagePolicy};

/// Loads and provides access to the scheduling configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── constraints.yaml   # Hard-rule registry and fallback chains
/// └── triage.yaml        # Coverage target, retry budget, relaxation ladder
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let config = loader.config();
/// println!("Coverage target: {}", config.triage.target_coverage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if either
    /// file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let constraints: ConstraintSet = read_yaml(&path.join("constraints.yaml"))?;
        let triage: TriagePolicy = read_yaml(&path.join("triage.yaml"))?;

        Ok(Self {
            config: ScheduleConfig { constraints, triage },
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: display.clone(),
    })?;
    serde_yaml::from_str(&contents).map_err(|e| EngineError::ConfigParseError {
        path: display,
        message: e.to_string(),
    })
}
