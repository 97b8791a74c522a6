use medsecure_clinical::ClinicalReference;
use medsecure_common::{AppConfig, MedSecureError, Result};
use medsecure_embed::{create_embedder, Embedder};
use medsecure_phi::Redactor;
use medsecure_vector::RecordStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// PHI redactor
    pub redactor: Redactor,

    /// Embedder, built once at startup
    pub embedder: Arc<dyn Embedder>,

    /// Drug table, triage keywords, sample cases
    pub clinical: Arc<ClinicalReference>,

    /// Record store; `None` when it failed to initialize
    store: Option<Arc<RwLock<RecordStore>>>,
}

impl AppState {
    /// Create new application state
    ///
    /// A store that fails to initialize does not abort startup; store-backed
    /// endpoints report it as unavailable instead.
    pub fn new(config: AppConfig) -> Result<Self> {
        let redactor = Redactor::new()?;
        let embedder = create_embedder(&config)?;
        let clinical = Arc::new(ClinicalReference::load(config.clinical_data_path.as_deref())?);

        let store = match RecordStore::new(config.collection_name.clone()) {
            Ok(store) => Some(store),
            Err(e) => {
                error!("Record store failed to initialize: {}", e);
                None
            }
        };

        Ok(Self::from_parts(config, redactor, embedder, clinical, store))
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        config: AppConfig,
        redactor: Redactor,
        embedder: Arc<dyn Embedder>,
        clinical: Arc<ClinicalReference>,
        store: Option<RecordStore>,
    ) -> Self {
        Self {
            config,
            redactor,
            embedder,
            clinical,
            store: store.map(|s| Arc::new(RwLock::new(s))),
        }
    }

    /// The record store, or `StoreUnavailable`
    pub fn store(&self) -> Result<&Arc<RwLock<RecordStore>>> {
        self.store.as_ref().ok_or_else(|| {
            MedSecureError::store_unavailable("record store is not initialized")
        })
    }
}
