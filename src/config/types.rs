//! Configuration types for the scheduling engine.
//!
//! The constraint registry and the triage policy are pure data: every rule
//! parameter the engine consults lives here, deserialized from YAML files or
//! built from the `Default` impls.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{Employee, RelaxableField};

/// The hard-rule registry consulted by the candidate ranker.
///
/// Holds no logic beyond cap resolution; every decision that uses these
/// values lives in the scheduling components.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstraintSet {
    /// Maximum hours one employee may work per day.
    pub max_hours_per_day: Decimal,
    /// Default maximum hours per ISO week, used when the employee has no
    /// positive contractual cap of their own.
    pub max_hours_per_week: Decimal,
    /// Minimum rest between the end of one worked day and the start of the
    /// next.
    pub rest_hours_between_days: Decimal,
    /// Length of one atomic demand unit in minutes.
    #[serde(default = "default_unit_minutes")]
    pub unit_minutes: u32,
    /// Ordered substitute roles per demanded role. The demanded role itself
    /// is always tier 0; the first substitute is tier 1, and so on.
    #[serde(default)]
    pub fallbacks: HashMap<String, Vec<String>>,
}

fn default_unit_minutes() -> u32 {
    60
}

impl ConstraintSet {
    /// Resolves the weekly cap that applies to the given employee:
    /// the contractual cap when set and positive, else the default.
    pub fn effective_week_cap(&self, employee: &Employee) -> Decimal {
        match employee.max_hours_week {
            Some(cap) if cap > Decimal::ZERO => cap,
            _ => self.max_hours_per_week,
        }
    }

    /// Returns the fallback chain for a role (empty when none is configured).
    pub fn fallback_chain(&self, role: &str) -> &[String] {
        self.fallbacks.get(role).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        let mut fallbacks = HashMap::new();
        fallbacks.insert(
            "store_manager".to_string(),
            vec!["assistant_store_manager".to_string()],
        );
        fallbacks.insert("checkout".to_string(), vec!["cashier".to_string()]);

        Self {
            max_hours_per_day: Decimal::new(8, 0),
            max_hours_per_week: Decimal::new(375, 1),
            rest_hours_between_days: Decimal::new(11, 0),
            unit_minutes: 60,
            fallbacks,
        }
    }
}

/// One rung of the relaxation ladder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelaxationStep {
    /// The constraint field to relax.
    pub field: RelaxableField,
    /// Signed change applied to the field.
    pub delta: Decimal,
    /// Reason shown to the reviewer at the human gate.
    pub rationale: String,
}

/// The triage controller's policy: when to stop, how often to retry, and
/// which relaxations to propose in which order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriagePolicy {
    /// Coverage rate at or above which the run is considered good enough.
    pub target_coverage: Decimal,
    /// Maximum number of relaxation attempts before the run terminates.
    pub max_retries: u32,
    /// Ordered relaxation candidates, smallest perturbation first.
    #[serde(default)]
    pub ladder: Vec<RelaxationStep>,
}

impl Default for TriagePolicy {
    fn default() -> Self {
        Self {
            target_coverage: Decimal::new(95, 2),
            max_retries: 3,
            ladder: vec![
                RelaxationStep {
                    field: RelaxableField::MaxHoursPerDay,
                    delta: Decimal::new(5, 1),
                    rationale: "Allow half an hour more per day to absorb staffing peaks".to_string(),
                },
                RelaxationStep {
                    field: RelaxableField::RestHoursBetweenDays,
                    delta: Decimal::new(-1, 0),
                    rationale: "Shorten the rest window by one hour to free early shifts".to_string(),
                },
                RelaxationStep {
                    field: RelaxableField::MaxHoursPerWeek,
                    delta: Decimal::new(25, 1),
                    rationale: "Raise the default weekly cap to cover remaining gaps".to_string(),
                },
            ],
        }
    }
}

/// The complete configuration for a scheduling run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleConfig {
    /// Hard-rule registry.
    pub constraints: ConstraintSet,
    /// Triage policy.
    pub triage: TriagePolicy,
}
