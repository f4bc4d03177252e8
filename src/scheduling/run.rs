//! Run orchestration.
//!
//! Wires the pipeline together: decompose -> assign -> consolidate -> audit
//! -> KPI, then drives the triage state machine until it reaches `Done`.
//! Only malformed input aborts a run; every other condition degrades into
//! an inspectable result.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{ConstraintSet, ScheduleConfig};
use crate::error::EngineResult;
use crate::models::{
    Absence, Assignment, AtomicDemand, AuditFinding, DemandBlock, Employee, Kpi, Shift,
    TerminalReason, TriageRecord,
};

use super::audit::audit;
use super::consolidate::consolidate;
use super::decompose::decompose;
use super::engine::assign;
use super::kpi::aggregate_kpi;
use super::triage::{HumanGate, TriageState, apply_relaxation, propose};

/// The complete result of one scheduling run.
///
/// Returned by [`run_schedule`]; serialization of any part of it is the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Consolidated, human-readable shifts.
    pub shifts: Vec<Shift>,
    /// The atomic assignments the shifts were merged from.
    pub assignments: Vec<Assignment>,
    /// Coverage shortfalls of the adopted generation.
    pub findings: Vec<AuditFinding>,
    /// Summary metrics of the adopted generation.
    pub kpi: Kpi,
    /// One record per triage attempt, in order.
    pub triage_history: Vec<TriageRecord>,
    /// The constraint set in effect for the adopted generation, including
    /// every applied relaxation.
    pub constraints: ConstraintSet,
    /// Why the run terminated.
    pub terminal_reason: TerminalReason,
}

/// One solved generation of the pipeline.
struct Generation {
    assignments: Vec<Assignment>,
    shifts: Vec<Shift>,
    findings: Vec<AuditFinding>,
    kpi: Kpi,
}

fn solve_once(
    atomic: &[AtomicDemand],
    employees: &[Employee],
    absences: &[Absence],
    blocks: &[DemandBlock],
    constraints: &ConstraintSet,
    seed: u64,
) -> EngineResult<Generation> {
    let assignments = assign(atomic, employees, absences, constraints, seed);
    let shifts = consolidate(&assignments);
    let findings = audit(&assignments, blocks, constraints.unit_minutes)?;
    let kpi = aggregate_kpi(&assignments, &findings, blocks);
    Ok(Generation {
        assignments,
        shifts,
        findings,
        kpi,
    })
}

/// Runs a complete schedule: greedy construction plus the bounded
/// relaxation loop.
///
/// A run is deterministic for fixed inputs and seed (only the `run_id` is
/// freshly generated). Applying one new absence is simply another call with
/// the absence list extended; the engine never diffs a prior run.
///
/// # Errors
///
/// Fails only on malformed input: a demand window that is empty, inverted,
/// or not a positive multiple of the unit size, or a unit size of zero.
/// Under-coverage, rejected proposals and exhausted retry budgets are
/// reported through the returned [`ScheduleOutcome`].
pub fn run_schedule<G: HumanGate>(
    employees: &[Employee],
    absences: &[Absence],
    blocks: &[DemandBlock],
    config: &ScheduleConfig,
    seed: u64,
    gate: &G,
) -> EngineResult<ScheduleOutcome> {
    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        employees = employees.len(),
        blocks = blocks.len(),
        "starting schedule run"
    );

    // The only fatal path: malformed demand is rejected before any
    // assignment starts.
    let atomic = decompose(blocks, config.constraints.unit_minutes)?;

    let mut constraints = config.constraints.clone();
    let mut current = solve_once(&atomic, employees, absences, blocks, &constraints, seed)?;
    let mut history: Vec<TriageRecord> = Vec::new();
    let mut attempt: u32 = 0;

    let mut state = TriageState::Evaluate;
    let terminal_reason = loop {
        state = match state {
            TriageState::Evaluate => {
                if current.findings.is_empty() {
                    TriageState::Done(TerminalReason::FullyCovered)
                } else if current.kpi.coverage_rate >= config.triage.target_coverage {
                    TriageState::Done(TerminalReason::TargetReached)
                } else if attempt >= config.triage.max_retries {
                    warn!(%run_id, attempt, "retry budget exhausted");
                    TriageState::Done(TerminalReason::RetryBudgetExceeded)
                } else {
                    TriageState::ProposeRelaxation
                }
            }
            TriageState::ProposeRelaxation => match propose(&config.triage, attempt) {
                Some(proposal) => TriageState::AwaitApproval(proposal),
                None => TriageState::Done(TerminalReason::NoRelaxationLeft),
            },
            TriageState::AwaitApproval(proposal) => {
                let decision = gate.review(&proposal);
                debug!(?decision, field = ?proposal.field, "gate reviewed proposal");
                if decision.is_approved() {
                    TriageState::Reassign(proposal, decision)
                } else {
                    history.push(TriageRecord {
                        attempt: attempt + 1,
                        proposal,
                        decision,
                        coverage_before: current.kpi.coverage_rate,
                        coverage_after: None,
                        adopted: false,
                    });
                    TriageState::Done(TerminalReason::ApprovalRejected)
                }
            }
            TriageState::Reassign(proposal, decision) => {
                attempt += 1;
                let relaxed = apply_relaxation(&constraints, &proposal);
                let candidate =
                    solve_once(&atomic, employees, absences, blocks, &relaxed, seed)?;

                // A greedy re-solve is not provably monotone, so a worse
                // generation is recorded but never adopted; the reported
                // coverage can only go up.
                let adopted = candidate.kpi.coverage_rate >= current.kpi.coverage_rate;
                history.push(TriageRecord {
                    attempt,
                    proposal,
                    decision,
                    coverage_before: current.kpi.coverage_rate,
                    coverage_after: Some(candidate.kpi.coverage_rate),
                    adopted,
                });
                if adopted {
                    constraints = relaxed;
                    current = candidate;
                }
                TriageState::Evaluate
            }
            TriageState::Done(reason) => break reason,
        };
    };

    info!(
        %run_id,
        coverage = %current.kpi.coverage_rate,
        cost = %current.kpi.total_cost,
        ?terminal_reason,
        "schedule run finished"
    );

    Ok(ScheduleOutcome {
        run_id,
        shifts: current.shifts,
        assignments: current.assignments,
        findings: current.findings,
        kpi: current.kpi,
        triage_history: history,
        constraints,
        terminal_reason,
    })
}
