//! Audit, KPI and triage outcome models.
//!
//! Everything in this module is plain data produced by a scheduling run:
//! coverage findings, summary KPIs, and the record of each proposed and
//! reviewed constraint relaxation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A coverage shortfall for one original demand block.
///
/// Findings are advisory: the engine itself never self-corrects, the triage
/// controller decides what (if anything) to do about them.
///
/// # Example
///
/// ```
/// use roster_engine::models::AuditFinding;
/// use chrono::NaiveDate;
///
/// let finding = AuditFinding {
///     day: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
///     block: 0,
///     role: "store_manager".to_string(),
///     required: 1,
///     fulfilled: 0,
///     deviation: 1,
/// };
/// assert_eq!(finding.deviation, finding.required - finding.fulfilled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFinding {
    /// The day of the under-covered block.
    pub day: NaiveDate,
    /// Index of the block in the caller's original demand list.
    pub block: usize,
    /// The role that is short.
    pub role: String,
    /// Required concurrent headcount.
    pub required: u32,
    /// Headcount actually achieved across every unit of the block.
    /// Never exceeds `required`.
    pub fulfilled: u32,
    /// `required - fulfilled`; always positive, fully covered blocks
    /// produce no finding.
    pub deviation: u32,
}

/// Summary metrics for one schedule generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    /// Total cost over all assignments.
    pub total_cost: Decimal,
    /// Fraction of demanded person-hours actually covered, in [0, 1].
    pub coverage_rate: Decimal,
    /// Number of distinct employees with at least one assignment.
    pub employees_used: usize,
    /// Number of atomic assignments.
    pub total_assignments: usize,
}

/// A constraint field the triage controller may propose to relax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxableField {
    /// Daily working-hour cap.
    MaxHoursPerDay,
    /// Default weekly working-hour cap.
    MaxHoursPerWeek,
    /// Minimum rest between two worked days.
    RestHoursBetweenDays,
}

/// A proposed minimal change to one constraint field.
///
/// Proposals are ephemeral: each one is reviewed once and either applied to
/// the next generation or discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageProposal {
    /// The field to relax.
    pub field: RelaxableField,
    /// Signed change to the field (negative deltas reduce rest hours).
    pub delta: Decimal,
    /// Human-readable reason the relaxation is expected to help.
    pub rationale: String,
}

/// The verdict of the human gate on one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// A reviewer approved the relaxation.
    Approve,
    /// A reviewer rejected the relaxation; the run terminates with the
    /// last computed findings.
    Reject,
    /// The relaxation was approved by policy, without a reviewer.
    AutoApprove,
}

impl GateDecision {
    /// Returns true if the proposal may be applied.
    pub fn is_approved(&self) -> bool {
        matches!(self, GateDecision::Approve | GateDecision::AutoApprove)
    }
}

/// The retained audit trail of one triage attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRecord {
    /// 1-based attempt number.
    pub attempt: u32,
    /// The proposal that was reviewed.
    pub proposal: TriageProposal,
    /// The gate's verdict.
    pub decision: GateDecision,
    /// Coverage rate before the attempt.
    pub coverage_before: Decimal,
    /// Coverage rate of the re-solved generation; absent when the proposal
    /// was rejected and no re-solve happened.
    pub coverage_after: Option<Decimal>,
    /// Whether the re-solved generation replaced the incumbent result.
    pub adopted: bool,
}

/// Why a run reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// Every block was fully covered on the first pass; triage never ran.
    FullyCovered,
    /// The coverage target was met.
    TargetReached,
    /// The human gate rejected a proposal; the last findings stand.
    ApprovalRejected,
    /// The bounded retry budget was exhausted.
    RetryBudgetExceeded,
    /// The relaxation ladder ran out of rungs below the retry budget.
    NoRelaxationLeft,
}
