use chrono::{SecondsFormat, Utc};
use medsecure_common::{MedSecureError, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::{
    Metadata, Record, RecordRow, SearchHit, StoreInfo, PHI_REMOVED_KEY, STORE_STATUS_ACTIVE,
    TIMESTAMP_KEY,
};

/// Lower-case and whitespace-split a query; duplicates are kept
pub fn tokenize_query(query: &str) -> Vec<String> {
    query.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Count query words occurring as substrings of the (lower-cased) text
pub fn keyword_score(query_words: &[String], text_lower: &str) -> usize {
    query_words
        .iter()
        .filter(|word| text_lower.contains(word.as_str()))
        .count()
}

/// In-memory record collection with keyword-overlap search
///
/// Records keep insertion order. The store itself is not synchronized;
/// shared callers wrap it in a lock.
#[derive(Debug)]
pub struct RecordStore {
    collection_name: String,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new(collection_name: impl Into<String>) -> Result<Self> {
        let collection_name = collection_name.into();
        if collection_name.trim().is_empty() {
            return Err(MedSecureError::store_unavailable(
                "Collection name cannot be empty",
            ));
        }

        info!("Record store initialized - collection: {}", collection_name);
        Ok(Self {
            collection_name,
            records: Vec::new(),
        })
    }

    /// Insert a record and return its generated ID
    ///
    /// `timestamp` is set to the insertion time and `phi_removed` to `"true"`,
    /// replacing any caller-supplied values.
    pub fn store(&mut self, text: impl Into<String>, metadata: Metadata) -> String {
        let id = Uuid::new_v4().to_string();

        let mut metadata = metadata;
        metadata.insert(
            TIMESTAMP_KEY.to_string(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        );
        metadata.insert(PHI_REMOVED_KEY.to_string(), "true".to_string());

        self.records.push(Record {
            id: id.clone(),
            text: text.into(),
            metadata,
        });

        debug!("Stored record {} ({} total)", id, self.records.len());
        id
    }

    /// Keyword-overlap search
    ///
    /// Scores every record by the number of query words contained in its text,
    /// drops zero scores, orders by descending score with insertion order
    /// breaking ties, and keeps at most `top_k` hits.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let query_words = tokenize_query(query);
        if query_words.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let mut matches: Vec<(usize, &Record)> = self
            .records
            .iter()
            .map(|r| (keyword_score(&query_words, &r.text.to_lowercase()), r))
            .filter(|(score, _)| *score > 0)
            .collect();

        // stable: equal scores stay in insertion order
        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.truncate(top_k);

        debug!(
            "Search over {} records - {} query words, {} hits",
            self.records.len(),
            query_words.len(),
            matches.len()
        );

        matches
            .into_iter()
            .map(|(score, r)| SearchHit {
                id: r.id.clone(),
                text: r.text.clone(),
                metadata: r.metadata.clone(),
                score,
            })
            .collect()
    }

    /// All records in insertion order
    pub fn list_all(&self) -> &[Record] {
        &self.records
    }

    /// Records as display rows, with missing fields filled in
    pub fn records_list(&self) -> Vec<RecordRow> {
        self.records.iter().map(RecordRow::from).collect()
    }

    /// Look up a record by ID
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Discard every record
    pub fn reset(&mut self) {
        let removed = self.records.len();
        self.records = Vec::new();
        info!("Record store reset - {} records removed", removed);
    }

    /// Current statistics
    pub fn info(&self) -> StoreInfo {
        StoreInfo {
            total_records: self.records.len(),
            collection_name: self.collection_name.clone(),
            status: STORE_STATUS_ACTIVE.to_string(),
        }
    }

    /// Human-readable listing with short IDs
    pub fn summary(&self) -> String {
        if self.records.is_empty() {
            return "Database is empty".to_string();
        }

        let mut out = format!("Database has {} records:\n", self.records.len());
        for record in &self.records {
            let short_id: String = record.id.chars().take(8).collect();
            out.push_str(&format!("\n- {}...: {}\n", short_id, record.text));
        }
        out
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn store() -> RecordStore {
        RecordStore::new("medical_records").unwrap()
    }

    #[test]
    fn test_empty_collection_name_unavailable() {
        let err = RecordStore::new(" ").unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_store_assigns_unique_ids_and_stamps() {
        let mut db = store();
        let a = db.store("headache", Metadata::new());
        let b = db.store("headache", Metadata::new());
        assert_ne!(a, b);

        let record = db.get(&a).unwrap();
        assert_eq!(record.text, "headache");
        assert!(record.metadata.contains_key(TIMESTAMP_KEY));
        assert_eq!(record.metadata.get(PHI_REMOVED_KEY).map(String::as_str), Some("true"));
    }

    #[test]
    fn test_store_overrides_caller_timestamp() {
        let mut db = store();
        let id = db.store("cough", meta(&[("timestamp", "yesterday"), ("urgency", "low")]));
        let record = db.get(&id).unwrap();
        assert_ne!(record.metadata["timestamp"], "yesterday");
        assert!(chrono::DateTime::parse_from_rfc3339(&record.metadata["timestamp"]).is_ok());
        assert_eq!(record.metadata["urgency"], "low");
    }

    #[test]
    fn test_search_example() {
        let mut db = store();
        db.store("headache and fever", meta(&[("urgency", "low")]));
        db.store("chest pain and breathing difficulty", meta(&[("urgency", "high")]));

        let hits = db.search("headache fever", 2);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "headache and fever");
        assert_eq!(hits[0].score, 2);
        assert_eq!(hits[0].metadata["urgency"], "low");
    }

    #[test]
    fn test_search_substring_and_case() {
        let mut db = store();
        db.store("Patient is FEVERISH", Metadata::new());
        let hits = db.search("Fever", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 1);
    }

    #[test]
    fn test_duplicate_query_words_count_twice() {
        let mut db = store();
        db.store("fever", Metadata::new());
        assert_eq!(db.search("fever fever", 1)[0].score, 2);
    }

    #[test]
    fn test_search_orders_by_score_then_insertion() {
        let mut db = store();
        let first = db.store("cough", Metadata::new());
        let best = db.store("cough and fever", Metadata::new());
        let second = db.store("dry cough", Metadata::new());

        let hits = db.search("cough fever", 10);
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec![best.as_str(), first.as_str(), second.as_str()]);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_top_k_truncates() {
        let mut db = store();
        for _ in 0..5 {
            db.store("nausea", Metadata::new());
        }
        assert_eq!(db.search("nausea", 3).len(), 3);
        assert!(db.search("nausea", 0).is_empty());
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let mut db = store();
        db.store("headache", Metadata::new());
        assert!(db.search("", 5).is_empty());
        assert!(db.search(" \t\n ", 5).is_empty());
    }

    #[test]
    fn test_no_match_returns_empty() {
        let mut db = store();
        db.store("headache", Metadata::new());
        assert!(db.search("fracture", 5).is_empty());
    }

    #[test]
    fn test_reset_empties_everything() {
        let mut db = store();
        db.store("headache and fever", Metadata::new());
        db.store("cough", Metadata::new());
        assert_eq!(db.info().total_records, 2);

        db.reset();
        assert!(db.list_all().is_empty());
        assert!(db.search("headache", 5).is_empty());
        assert_eq!(db.info().total_records, 0);
        assert_eq!(db.summary(), "Database is empty");
    }

    #[test]
    fn test_list_all_insertion_order() {
        let mut db = store();
        let a = db.store("one", Metadata::new());
        let b = db.store("two", Metadata::new());
        let ids: Vec<&str> = db.list_all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), b.as_str()]);
        assert_eq!(db.records_list()[1].text, "two");
    }

    #[test]
    fn test_info_and_summary() {
        let mut db = store();
        let id = db.store("migraine with aura", Metadata::new());
        let info = db.info();
        assert_eq!(info.total_records, 1);
        assert_eq!(info.collection_name, "medical_records");
        assert_eq!(info.status, STORE_STATUS_ACTIVE);

        let summary = db.summary();
        assert!(summary.starts_with("Database has 1 records:"));
        assert!(summary.contains(&id[..8]));
        assert!(summary.contains("migraine with aura"));
    }

    #[test]
    fn test_tokenize_and_score() {
        let words = tokenize_query("  Headache   FEVER ");
        assert_eq!(words, vec!["headache".to_string(), "fever".to_string()]);
        assert_eq!(keyword_score(&words, "headache and fever"), 2);
        assert_eq!(keyword_score(&words, "cough"), 0);
    }
}
