//! Triage: bounded constraint relaxation.
//!
//! When coverage falls short of the target, the controller proposes the
//! smallest configured perturbation, asks the human gate for approval, and
//! re-solves under the relaxed constraints. The loop is bounded by the
//! policy's retry budget, so it always terminates.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ConstraintSet, TriagePolicy};
use crate::models::{GateDecision, RelaxableField, TerminalReason, TriageProposal};

/// The states of the relaxation loop.
///
/// The orchestration drives these transitions explicitly:
/// Evaluate -> ProposeRelaxation -> AwaitApproval -> Reassign -> Evaluate,
/// with Done terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageState {
    /// Decide whether the current generation is good enough.
    Evaluate,
    /// Pick the next relaxation candidate.
    ProposeRelaxation,
    /// A proposal is waiting at the human gate.
    AwaitApproval(TriageProposal),
    /// An approved proposal is being applied and re-solved.
    Reassign(TriageProposal, GateDecision),
    /// Terminal.
    Done(TerminalReason),
}

/// The approval checkpoint gating application of a relaxation.
///
/// Implemented by closures for interactive callers and by [`AutoApprove`]
/// for unattended runs.
pub trait HumanGate {
    /// Reviews one proposal and returns a verdict.
    fn review(&self, proposal: &TriageProposal) -> GateDecision;
}

impl<F> HumanGate for F
where
    F: Fn(&TriageProposal) -> GateDecision,
{
    fn review(&self, proposal: &TriageProposal) -> GateDecision {
        self(proposal)
    }
}

/// A gate policy that approves every proposal without review.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl HumanGate for AutoApprove {
    fn review(&self, _proposal: &TriageProposal) -> GateDecision {
        GateDecision::AutoApprove
    }
}

/// Returns the relaxation candidate for the given attempt, or `None` when
/// the ladder is exhausted. The ladder is ordered smallest perturbation
/// first, so earlier attempts always propose milder changes.
pub fn propose(policy: &TriagePolicy, attempt: u32) -> Option<TriageProposal> {
    policy.ladder.get(attempt as usize).map(|step| TriageProposal {
        field: step.field,
        delta: step.delta,
        rationale: step.rationale.clone(),
    })
}

/// Applies one approved proposal to a copy of the constraint set.
///
/// Rest hours saturate at zero; the caps have no upper bound here, the
/// ladder itself is the limit on how far they can drift.
pub fn apply_relaxation(constraints: &ConstraintSet, proposal: &TriageProposal) -> ConstraintSet {
    let mut relaxed = constraints.clone();
    match proposal.field {
        RelaxableField::MaxHoursPerDay => {
            relaxed.max_hours_per_day += proposal.delta;
        }
        RelaxableField::MaxHoursPerWeek => {
            relaxed.max_hours_per_week += proposal.delta;
        }
        RelaxableField::RestHoursBetweenDays => {
            relaxed.rest_hours_between_days =
                (relaxed.rest_hours_between_days + proposal.delta).max(Decimal::ZERO);
        }
    }
    debug!(
        field = ?proposal.field,
        delta = %proposal.delta,
        "applied relaxation"
    );
    relaxed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelaxationStep;

    fn proposal(field: RelaxableField, delta: Decimal) -> TriageProposal {
        TriageProposal {
            field,
            delta,
            rationale: "test".to_string(),
        }
    }

    #[test]
    fn test_propose_walks_the_ladder_in_order() {
        let policy = TriagePolicy::default();

        let first = propose(&policy, 0).unwrap();
        assert_eq!(first.field, RelaxableField::MaxHoursPerDay);
        assert_eq!(first.delta, Decimal::new(5, 1));

        let second = propose(&policy, 1).unwrap();
        assert_eq!(second.field, RelaxableField::RestHoursBetweenDays);

        assert!(propose(&policy, policy.ladder.len() as u32).is_none());
    }

    #[test]
    fn test_propose_carries_the_step_rationale() {
        let policy = TriagePolicy {
            target_coverage: Decimal::new(95, 2),
            max_retries: 1,
            ladder: vec![RelaxationStep {
                field: RelaxableField::MaxHoursPerWeek,
                delta: Decimal::new(25, 1),
                rationale: "cover the weekend peak".to_string(),
            }],
        };
        assert_eq!(propose(&policy, 0).unwrap().rationale, "cover the weekend peak");
    }

    #[test]
    fn test_apply_relaxation_raises_daily_cap() {
        let constraints = ConstraintSet::default();
        let relaxed = apply_relaxation(
            &constraints,
            &proposal(RelaxableField::MaxHoursPerDay, Decimal::new(5, 1)),
        );
        assert_eq!(relaxed.max_hours_per_day, Decimal::new(85, 1));
        // The original registry is untouched.
        assert_eq!(constraints.max_hours_per_day, Decimal::new(8, 0));
    }

    #[test]
    fn test_apply_relaxation_raises_weekly_cap() {
        let relaxed = apply_relaxation(
            &ConstraintSet::default(),
            &proposal(RelaxableField::MaxHoursPerWeek, Decimal::new(25, 1)),
        );
        assert_eq!(relaxed.max_hours_per_week, Decimal::new(40, 0));
    }

    #[test]
    fn test_rest_hours_saturate_at_zero() {
        let relaxed = apply_relaxation(
            &ConstraintSet::default(),
            &proposal(RelaxableField::RestHoursBetweenDays, Decimal::new(-20, 0)),
        );
        assert_eq!(relaxed.rest_hours_between_days, Decimal::ZERO);
    }

    #[test]
    fn test_auto_approve_gate() {
        let gate = AutoApprove;
        let decision = gate.review(&proposal(RelaxableField::MaxHoursPerDay, Decimal::ONE));
        assert_eq!(decision, GateDecision::AutoApprove);
        assert!(decision.is_approved());
    }

    #[test]
    fn test_closure_gate() {
        let gate = |p: &TriageProposal| {
            if p.delta > Decimal::ONE {
                GateDecision::Reject
            } else {
                GateDecision::Approve
            }
        };
        assert_eq!(
            gate.review(&proposal(RelaxableField::MaxHoursPerDay, Decimal::new(5, 1))),
            GateDecision::Approve
        );
        assert_eq!(
            gate.review(&proposal(RelaxableField::MaxHoursPerDay, Decimal::from(2))),
            GateDecision::Reject
        );
    }
}
