//! MedSecure PHI redaction
//!
//! Strips personal identifiers from free-text clinical notes before they are
//! embedded, stored, or searched.

mod redactor;

pub use redactor::{placeholder, Finding, Redaction, Redactor};
