use medsecure_common::{MedSecureError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::interactions::{InteractionEntry, InteractionTable, Severity};

/// Immutable clinical reference data injected at startup
#[derive(Debug, Clone)]
pub struct ClinicalReference {
    pub interactions: InteractionTable,
    /// Lower-cased; checked before `urgent_keywords`
    pub emergency_keywords: Vec<String>,
    /// Lower-cased
    pub urgent_keywords: Vec<String>,
    pub sample_cases: Vec<String>,
    pub demo_cases: Vec<String>,
}

/// On-disk shape; every section is optional and falls back to the built-in data
#[derive(Debug, Default, Deserialize, Serialize)]
struct ReferenceFile {
    interactions: Option<Vec<InteractionEntry>>,
    emergency_keywords: Option<Vec<String>>,
    urgent_keywords: Option<Vec<String>>,
    sample_cases: Option<Vec<String>>,
    demo_cases: Option<Vec<String>>,
}

fn entry(a: &str, b: &str, severity: Severity, description: &str) -> InteractionEntry {
    InteractionEntry {
        drugs: [a.to_string(), b.to_string()],
        severity,
        description: description.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn lowercase_all(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_interactions() -> Vec<InteractionEntry> {
    use Severity::*;
    vec![
        entry("warfarin", "aspirin", Dangerous, "Increased bleeding risk"),
        entry("warfarin", "ibuprofen", Dangerous, "Increased bleeding risk"),
        entry("warfarin", "naproxen", Dangerous, "Increased bleeding risk"),
        entry("lisinopril", "ibuprofen", Caution, "Kidney damage risk"),
        entry("metformin", "alcohol", Caution, "Lactic acidosis risk"),
        entry("simvastatin", "grapefruit", Caution, "Increased side effects"),
        entry("aspirin", "vitamin c", Safe, "No known interactions"),
        entry("aspirin", "calcium", Safe, "No known interactions"),
        entry("vitamin c", "calcium", Safe, "No known interactions"),
        entry("metformin", "vitamin b12", Safe, "No known interactions"),
        entry("lisinopril", "calcium", Safe, "No known interactions"),
    ]
}

fn default_emergency_keywords() -> Vec<String> {
    strings(&[
        "chest pain",
        "shortness of breath",
        "severe bleeding",
        "unconscious",
        "stroke",
        "heart attack",
        "suicidal",
        "seizure",
        "choking",
    ])
}

fn default_urgent_keywords() -> Vec<String> {
    strings(&[
        "high fever",
        "head injury",
        "abdominal pain",
        "severe burn",
        "broken bone",
        "eye injury",
        "severe headache",
    ])
}

fn default_sample_cases() -> Vec<String> {
    strings(&[
        "Patient with migraine headache and sensitivity to light",
        "Upper respiratory infection with cough and congestion",
        "Hypertension management and medication review",
        "Emergency: Chest pain with shortness of breath",
    ])
}

fn default_demo_cases() -> Vec<String> {
    strings(&[
        "Patient with migraine and light sensitivity",
        "Upper respiratory infection with cough",
        "Hypertension management visit",
        "Emergency chest pain case",
    ])
}

impl Default for ClinicalReference {
    fn default() -> Self {
        Self::from_parts(ReferenceFile::default())
    }
}

impl ClinicalReference {
    fn from_parts(file: ReferenceFile) -> Self {
        Self {
            interactions: InteractionTable::new(
                file.interactions.unwrap_or_else(default_interactions),
            ),
            emergency_keywords: lowercase_all(
                file.emergency_keywords.unwrap_or_else(default_emergency_keywords),
            ),
            urgent_keywords: lowercase_all(
                file.urgent_keywords.unwrap_or_else(default_urgent_keywords),
            ),
            sample_cases: file.sample_cases.unwrap_or_else(default_sample_cases),
            demo_cases: file.demo_cases.unwrap_or_else(default_demo_cases),
        }
    }

    /// Load reference data from a TOML/JSON/YAML file (format from the extension)
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: ReferenceFile = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                MedSecureError::config(format!(
                    "Failed to load clinical reference {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let reference = Self::from_parts(file);
        info!(
            "Clinical reference loaded from {} - {} interaction pairs, {} emergency / {} urgent keywords",
            path.display(),
            reference.interactions.len(),
            reference.emergency_keywords.len(),
            reference.urgent_keywords.len()
        );
        Ok(reference)
    }

    /// Built-in data, or the file at `path` when one is configured
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let reference = ClinicalReference::default();
        assert_eq!(reference.interactions.len(), 11);
        assert_eq!(reference.emergency_keywords.len(), 9);
        assert_eq!(reference.urgent_keywords.len(), 7);
        assert_eq!(reference.sample_cases.len(), 4);
        assert_eq!(reference.demo_cases.len(), 4);
    }

    #[test]
    fn test_load_without_path() {
        let reference = ClinicalReference::load(None).unwrap();
        assert_eq!(reference.emergency_keywords[0], "chest pain");
    }

    #[test]
    fn test_from_toml_file_overrides_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
emergency_keywords = ["Anaphylaxis", "  "]

[[interactions]]
drugs = ["Clopidogrel", "Omeprazole"]
severity = "caution"
description = "Reduced antiplatelet effect"
"#
        )
        .unwrap();

        let reference = ClinicalReference::from_file(file.path()).unwrap();
        assert_eq!(reference.emergency_keywords, vec!["anaphylaxis".to_string()]);
        assert_eq!(reference.interactions.len(), 1);
        assert_eq!(
            reference.interactions.lookup("omeprazole", "clopidogrel").map(|e| e.severity),
            Some(Severity::Caution)
        );
        // untouched sections keep the built-in data
        assert_eq!(reference.urgent_keywords.len(), 7);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ClinicalReference::from_file(Path::new("/nonexistent/clinical.toml")).unwrap_err();
        assert!(matches!(err, MedSecureError::Config(_)));
    }
}
