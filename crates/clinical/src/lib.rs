//! MedSecure clinical reference logic
//!
//! Keyword triage, the medication interaction table, and the sample cases
//! used to seed a demo store. All data lives in an immutable
//! [`ClinicalReference`] built once at startup.

mod interactions;
mod reference;
mod samples;
mod triage;

pub use interactions::{
    check_interactions, parse_medications, InteractionEntry, InteractionReport, InteractionTable,
    PairInteraction, Severity, Verdict,
};
pub use reference::ClinicalReference;
pub use samples::{seed_urgency, Urgency};
pub use triage::{triage, TriageLevel, TriageResult};
