use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reference::ClinicalReference;

/// Urgency classification of a symptom description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    Emergency,
    Urgent,
    NonUrgent,
}

impl TriageLevel {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Emergency => "CALL 911 IMMEDIATELY - Life-threatening condition suspected",
            Self::Urgent => "Visit urgent care within 24 hours",
            Self::NonUrgent => "Schedule with primary care doctor",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Self::Emergency => "Do not delay. Seek emergency medical care now.",
            Self::Urgent => "Condition requires prompt medical attention.",
            Self::NonUrgent => "Monitor symptoms and seek care if they worsen.",
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Emergency => "EMERGENCY",
            Self::Urgent => "URGENT",
            Self::NonUrgent => "NON-URGENT",
        };
        write!(f, "{}", s)
    }
}

/// Triage outcome with the keyword that decided it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageResult {
    pub level: TriageLevel,
    pub matched_keyword: Option<String>,
    pub action: String,
    pub instructions: String,
}

impl TriageResult {
    fn new(level: TriageLevel, matched_keyword: Option<&str>) -> Self {
        Self {
            level,
            matched_keyword: matched_keyword.map(str::to_string),
            action: level.action().to_string(),
            instructions: level.instructions().to_string(),
        }
    }
}

fn first_match<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .find(|k| text.contains(k.as_str()))
        .map(String::as_str)
}

/// Classify symptoms by keyword containment: emergency list first, then urgent
pub fn triage(symptoms: &str, reference: &ClinicalReference) -> TriageResult {
    let symptoms = symptoms.to_lowercase();

    if let Some(keyword) = first_match(&symptoms, &reference.emergency_keywords) {
        return TriageResult::new(TriageLevel::Emergency, Some(keyword));
    }

    if let Some(keyword) = first_match(&symptoms, &reference.urgent_keywords) {
        return TriageResult::new(TriageLevel::Urgent, Some(keyword));
    }

    TriageResult::new(TriageLevel::NonUrgent, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ClinicalReference {
        ClinicalReference::default()
    }

    #[test]
    fn test_emergency() {
        let result = triage("Sudden CHEST PAIN radiating to the arm", &reference());
        assert_eq!(result.level, TriageLevel::Emergency);
        assert_eq!(result.matched_keyword.as_deref(), Some("chest pain"));
        assert!(result.action.starts_with("CALL 911"));
    }

    #[test]
    fn test_emergency_checked_before_urgent() {
        let result = triage("high fever and a seizure this morning", &reference());
        assert_eq!(result.level, TriageLevel::Emergency);
        assert_eq!(result.matched_keyword.as_deref(), Some("seizure"));
    }

    #[test]
    fn test_urgent() {
        let result = triage("Child with high fever for two days", &reference());
        assert_eq!(result.level, TriageLevel::Urgent);
        assert_eq!(result.instructions, "Condition requires prompt medical attention.");
    }

    #[test]
    fn test_non_urgent_default() {
        let result = triage("mild cough and runny nose", &reference());
        assert_eq!(result.level, TriageLevel::NonUrgent);
        assert!(result.matched_keyword.is_none());
        assert_eq!(triage("", &reference()).level, TriageLevel::NonUrgent);
    }

    #[test]
    fn test_display() {
        assert_eq!(TriageLevel::NonUrgent.to_string(), "NON-URGENT");
    }
}
