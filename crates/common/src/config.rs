use crate::error::MedSecureError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which backend produces text embeddings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Ollama `/api/embed` endpoint
    Ollama,
    /// Deterministic in-process projection, no model download
    Local,
}

impl EmbeddingBackend {
    /// Parse backend name, case-insensitive
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// Parse an optional setting; an unparsable value is a config error
fn parse_setting<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, MedSecureError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| {
            MedSecureError::config(format!("Invalid value for {}: {}", key, raw))
        }),
        None => Ok(default),
    }
}

/// MedSecure application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Embedding backend
    pub embedding_backend: EmbeddingBackend,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Embedding vector dimension
    pub embedding_dim: usize,

    /// Record store collection name
    pub collection_name: String,

    /// Optional clinical reference data file (TOML/JSON)
    pub clinical_data_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./db/log"),
            log_level: "info".to_string(),
            embedding_backend: EmbeddingBackend::Local,
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "all-minilm".to_string(),
            embedding_dim: 384,
            collection_name: "medical_records".to_string(),
            clinical_data_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, MedSecureError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let embedding_backend = match std::env::var("EMBEDDING_BACKEND") {
            Ok(value) => EmbeddingBackend::parse(&value).ok_or_else(|| {
                MedSecureError::config(format!("Unknown embedding backend: {}", value))
            })?,
            Err(_) => defaults.embedding_backend,
        };

        let config = Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_setting(
                "SERVER_PORT",
                std::env::var("SERVER_PORT").ok(),
                defaults.server_port,
            )?,
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            embedding_backend,
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            embedding_dim: parse_setting(
                "EMBEDDING_DIM",
                std::env::var("EMBEDDING_DIM").ok(),
                defaults.embedding_dim,
            )?,
            collection_name: std::env::var("COLLECTION_NAME")
                .unwrap_or(defaults.collection_name),
            clinical_data_path: Self::get_env_path("CLINICAL_DATA_PATH"),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), MedSecureError> {
        if self.embedding_model.is_empty() {
            return Err(MedSecureError::config("Embedding model name cannot be empty"));
        }

        if self.embedding_dim == 0 {
            return Err(MedSecureError::config("Embedding dimension cannot be 0"));
        }

        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://") {
            return Err(MedSecureError::config(
                "Ollama base URL must start with http:// or https://"
            ));
        }

        if self.server_port == 0 {
            return Err(MedSecureError::config("Server port cannot be 0"));
        }

        if self.collection_name.trim().is_empty() {
            return Err(MedSecureError::config("Collection name cannot be empty"));
        }

        Ok(())
    }
}
