use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open string-to-string record metadata
pub type Metadata = BTreeMap<String, String>;

/// Metadata key holding the insertion time (RFC 3339, UTC)
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Metadata key marking that the text went through PHI redaction
pub const PHI_REMOVED_KEY: &str = "phi_removed";

/// Placeholder shown for metadata fields a record does not carry
pub const MISSING_FIELD: &str = "N/A";

/// Status reported by a live store
pub const STORE_STATUS_ACTIVE: &str = "active";

/// Stored record; immutable once inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned unique identifier
    pub id: String,

    /// Redacted record text
    pub text: String,

    /// Caller metadata plus store-stamped fields
    pub metadata: Metadata,
}

/// Search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Record ID
    pub id: String,

    /// Record text
    pub text: String,

    /// Record metadata
    pub metadata: Metadata,

    /// Number of query words found in the text
    pub score: usize,
}

/// Display row for record listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub id: String,
    pub text: String,
    pub diagnosis: String,
    pub urgency: String,
    pub category: String,
    pub timestamp: String,
    pub phi_removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        let field = |key: &str| {
            record
                .metadata
                .get(key)
                .cloned()
                .unwrap_or_else(|| MISSING_FIELD.to_string())
        };

        Self {
            id: record.id.clone(),
            text: record.text.clone(),
            diagnosis: field("diagnosis"),
            urgency: field("urgency"),
            category: field("category"),
            timestamp: field(TIMESTAMP_KEY),
            phi_removed: record
                .metadata
                .get(PHI_REMOVED_KEY)
                .map(|v| v != "false")
                .unwrap_or(true),
            original_text: record.metadata.get("original_text").cloned(),
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreInfo {
    pub total_records: usize,
    pub collection_name: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_defaults() {
        let record = Record {
            id: "abc".to_string(),
            text: "cough".to_string(),
            metadata: Metadata::new(),
        };
        let row = RecordRow::from(&record);
        assert_eq!(row.diagnosis, MISSING_FIELD);
        assert_eq!(row.urgency, MISSING_FIELD);
        assert_eq!(row.category, MISSING_FIELD);
        assert_eq!(row.timestamp, MISSING_FIELD);
        assert!(row.phi_removed);
        assert!(row.original_text.is_none());
    }

    #[test]
    fn test_row_from_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("diagnosis".to_string(), "Migraine".to_string());
        metadata.insert("urgency".to_string(), "low".to_string());
        metadata.insert("original_text".to_string(), "Patient: John Smith".to_string());
        metadata.insert(PHI_REMOVED_KEY.to_string(), "false".to_string());
        let record = Record {
            id: "abc".to_string(),
            text: "[patient_name_REDACTED]".to_string(),
            metadata,
        };

        let row = RecordRow::from(&record);
        assert_eq!(row.diagnosis, "Migraine");
        assert_eq!(row.urgency, "low");
        assert!(!row.phi_removed);
        assert_eq!(row.original_text.as_deref(), Some("Patient: John Smith"));

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["original_text"], "Patient: John Smith");
    }
}
