//! MedSecure record store
//!
//! In-memory collection of redacted clinical notes with keyword-overlap search.

mod store;
mod types;

pub use store::{keyword_score, tokenize_query, RecordStore};
pub use types::{
    Metadata, Record, RecordRow, SearchHit, StoreInfo, MISSING_FIELD, PHI_REMOVED_KEY,
    STORE_STATUS_ACTIVE, TIMESTAMP_KEY,
};
