use medsecure_common::{MedSecureError, Result};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// PHI detection rules, applied in this order to the cumulative output
///
/// Each entry is `(label, pattern)`; matches become `[<label>_REDACTED]`.
const PHI_RULES: &[(&str, &str)] = &[
    ("patient_name", r"Patient:\s*[A-Z][a-z]+ [A-Z][a-z]+"),
    ("doctor_name", r"Dr\.\s*[A-Z][a-z]+"),
    ("ssn", r"\d{3}-\d{2}-\d{4}"),
    ("phone", r"\(\d{3}\) \d{3}-\d{4}"),
    ("email", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b"),
    ("date", r"\d{1,2}/\d{1,2}/\d{4}"),
    ("medical_record", r"MRN:\s*\d+"),
    ("address", r"\d+\s+[A-Za-z\s]+,?\s*[A-Za-z\s]+,?\s*[A-Z]{2}\s*\d{5}"),
    ("name_standalone", r"\b(?:Mr|Ms|Mrs|Dr)\.?\s+[A-Z][a-z]+ [A-Z][a-z]+\b"),
];

/// Build the placeholder token for a rule label
pub fn placeholder(label: &str) -> String {
    format!("[{}_REDACTED]", label)
}

/// A compiled redaction rule
#[derive(Debug, Clone)]
struct PhiRule {
    label: &'static str,
    pattern: Regex,
    token: String,
}

/// How many spans a single rule replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub label: String,
    pub count: usize,
}

/// Redacted text together with the rules that fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redaction {
    pub text: String,
    pub findings: Vec<Finding>,
}

impl Redaction {
    /// Total number of replaced spans
    pub fn total_redacted(&self) -> usize {
        self.findings.iter().map(|f| f.count).sum()
    }
}

/// Regex-based PHI redactor
#[derive(Debug, Clone)]
pub struct Redactor {
    rules: Vec<PhiRule>,
}

impl Redactor {
    /// Compile the built-in rule set
    pub fn new() -> Result<Self> {
        let rules = PHI_RULES
            .iter()
            .map(|&(label, pattern)| -> Result<PhiRule> {
                let pattern = Regex::new(pattern).map_err(|e| {
                    MedSecureError::redaction(format!("Invalid pattern for {}: {}", label, e))
                })?;
                Ok(PhiRule {
                    label,
                    pattern,
                    token: placeholder(label),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("PHI redactor initialized with {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Rule labels in application order
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|r| r.label)
    }

    /// Replace every PHI match with its placeholder token
    pub fn redact(&self, text: &str) -> String {
        self.redact_with_report(text).text
    }

    /// Redact and report how many spans each rule replaced
    ///
    /// Rules run sequentially over the output of the previous rule, so a
    /// later pattern sees tokens inserted by an earlier one.
    pub fn redact_with_report(&self, text: &str) -> Redaction {
        if text.is_empty() {
            return Redaction {
                text: String::new(),
                findings: Vec::new(),
            };
        }

        let mut masked = text.to_string();
        let mut findings = Vec::new();

        for rule in &self.rules {
            let count = rule.pattern.find_iter(&masked).count();
            if count == 0 {
                continue;
            }
            masked = rule
                .pattern
                .replace_all(&masked, rule.token.as_str())
                .into_owned();
            findings.push(Finding {
                label: rule.label.to_string(),
                count,
            });
        }

        debug!(
            "Redaction complete - {} span(s) across {} rule(s)",
            findings.iter().map(|f| f.count).sum::<usize>(),
            findings.len()
        );

        Redaction {
            text: masked,
            findings,
        }
    }

    /// Whether any rule matches the input
    pub fn contains_phi(&self, text: &str) -> bool {
        self.rules.iter().any(|r| r.pattern.is_match(text))
    }
}
