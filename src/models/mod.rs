//! Core data models for the scheduling engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod demand;
mod employee;
mod outcome;

pub use assignment::{Assignment, Shift};
pub use demand::{AtomicDemand, DemandBlock};
pub use employee::{Absence, AbsenceType, Employee};
pub use outcome::{
    AuditFinding, GateDecision, Kpi, RelaxableField, TerminalReason, TriageProposal, TriageRecord,
};
