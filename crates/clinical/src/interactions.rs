use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Interaction severity for a medication pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Dangerous,
    Caution,
    Safe,
    /// Pair not present in the table
    None,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dangerous => "DANGEROUS",
            Self::Caution => "CAUTION",
            Self::Safe => "SAFE",
            Self::None => "NONE",
        }
    }
}

/// One row of the interaction table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub drugs: [String; 2],
    pub severity: Severity,
    pub description: String,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Order-independent key for a medication pair
fn pair_key(a: &str, b: &str) -> (String, String) {
    let (a, b) = (normalize(a), normalize(b));
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Unordered medication-pair lookup table
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    entries: HashMap<(String, String), InteractionEntry>,
}

impl InteractionTable {
    /// Build from entries; a later entry for the same pair replaces an earlier one
    pub fn new(entries: Vec<InteractionEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (pair_key(&e.drugs[0], &e.drugs[1]), e))
            .collect();
        Self { entries }
    }

    /// Find the entry for a pair, in either order, ignoring case
    pub fn lookup(&self, a: &str, b: &str) -> Option<&InteractionEntry> {
        self.entries.get(&pair_key(a, b))
    }

    /// Severity of a pair; `Severity::None` when unknown
    pub fn severity(&self, a: &str, b: &str) -> Severity {
        self.lookup(a, b).map(|e| e.severity).unwrap_or(Severity::None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Interaction result for one pair of medications
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairInteraction {
    pub first: String,
    pub second: String,
    pub severity: Severity,
    pub description: String,
}

/// Overall outcome of a medication list check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Dangerous,
    Caution,
    NoDangerousInteractions,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Dangerous => "DANGEROUS INTERACTIONS DETECTED! Consult your doctor immediately.",
            Self::Caution => "Consult your doctor about these medication combinations.",
            Self::NoDangerousInteractions => {
                "No dangerous interactions found between these medications!"
            }
        }
    }
}

/// Full interaction analysis of a medication list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionReport {
    pub medications: Vec<String>,
    pub pairs: Vec<PairInteraction>,
    pub dangerous: Vec<PairInteraction>,
    pub caution: Vec<PairInteraction>,
    pub verdict: Verdict,
    pub message: String,
}

/// Parse a comma-separated medication list: trimmed, lower-cased, blanks dropped
pub fn parse_medications(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(normalize)
        .filter(|m| !m.is_empty())
        .collect()
}

/// Check every unordered pair `(i, j)`, `i < j`, of the medication list
pub fn check_interactions(input: &str, table: &InteractionTable) -> InteractionReport {
    let medications = parse_medications(input);

    let mut pairs = Vec::new();
    for (i, first) in medications.iter().enumerate() {
        for second in &medications[i + 1..] {
            let (severity, description) = match table.lookup(first, second) {
                Some(entry) => (entry.severity, entry.description.clone()),
                None => (Severity::None, "No known interactions".to_string()),
            };
            pairs.push(PairInteraction {
                first: first.clone(),
                second: second.clone(),
                severity,
                description,
            });
        }
    }

    let of = |severity: Severity| -> Vec<PairInteraction> {
        pairs.iter().filter(|p| p.severity == severity).cloned().collect()
    };
    let dangerous = of(Severity::Dangerous);
    let caution = of(Severity::Caution);

    let verdict = if !dangerous.is_empty() {
        Verdict::Dangerous
    } else if !caution.is_empty() {
        Verdict::Caution
    } else {
        Verdict::NoDangerousInteractions
    };

    InteractionReport {
        medications,
        pairs,
        dangerous,
        caution,
        verdict,
        message: verdict.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClinicalReference;

    fn table() -> InteractionTable {
        ClinicalReference::default().interactions
    }

    #[test]
    fn test_lookup_is_unordered() {
        let table = table();
        assert_eq!(table.severity("warfarin", "aspirin"), Severity::Dangerous);
        assert_eq!(table.severity("aspirin", "warfarin"), Severity::Dangerous);
        assert_eq!(table.severity(" Aspirin ", "WARFARIN"), Severity::Dangerous);
    }

    #[test]
    fn test_lookup_unknown_pair() {
        let table = table();
        assert!(table.lookup("aspirin", "metformin").is_none());
        assert_eq!(table.severity("aspirin", "metformin"), Severity::None);
    }

    #[test]
    fn test_parse_medications() {
        assert_eq!(
            parse_medications(" Aspirin, ,Vitamin C ,calcium,"),
            vec!["aspirin".to_string(), "vitamin c".to_string(), "calcium".to_string()]
        );
        assert!(parse_medications("  ").is_empty());
    }

    #[test]
    fn test_dangerous_combination() {
        let report = check_interactions("Warfarin, Aspirin, Ibuprofen", &table());
        assert_eq!(report.pairs.len(), 3);
        assert_eq!(report.dangerous.len(), 2);
        assert!(report.caution.is_empty());
        assert_eq!(report.verdict, Verdict::Dangerous);
        // aspirin + ibuprofen is not in the table
        assert_eq!(report.pairs[2].severity, Severity::None);
    }

    #[test]
    fn test_caution_combination() {
        let report = check_interactions("Lisinopril, Ibuprofen, Metformin", &table());
        assert_eq!(report.caution.len(), 1);
        assert_eq!(report.caution[0].description, "Kidney damage risk");
        assert_eq!(report.verdict, Verdict::Caution);
    }

    #[test]
    fn test_safe_combination() {
        let report = check_interactions("Aspirin, Vitamin C, Calcium", &table());
        assert!(report.pairs.iter().all(|p| p.severity == Severity::Safe));
        assert_eq!(report.verdict, Verdict::NoDangerousInteractions);
    }

    #[test]
    fn test_single_medication_has_no_pairs() {
        let report = check_interactions("aspirin", &table());
        assert!(report.pairs.is_empty());
        assert_eq!(report.verdict, Verdict::NoDangerousInteractions);
    }
}
