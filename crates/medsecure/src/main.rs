use anyhow::Result;
use clap::{Parser, Subcommand};
use medsecure_clinical::{check_interactions, triage, ClinicalReference};
use medsecure_common::{logger, AppConfig};
use medsecure_phi::Redactor;
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "medsecure")]
#[command(about = "MedSecure - PHI-safe clinical note redaction, search and triage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Clinical reference data file (TOML/JSON/YAML)
        #[arg(long)]
        clinical_data: Option<PathBuf>,
    },

    /// Redact PHI from a text and print the result
    Redact {
        text: String,
    },

    /// Classify a symptom description
    Triage {
        symptoms: String,
    },

    /// Check a comma-separated medication list for interactions
    Interactions {
        medications: String,
    },
}

async fn serve(config: AppConfig) -> Result<()> {
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("MedSecure starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Embedding: {} ({:?})", config.embedding_model, config.embedding_backend);
    tracing::info!("  Collection: {}", config.collection_name);

    println!("Server listening on http://{}", config.server_bind_address());
    medsecure_server::start_server(config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port, clinical_data }) => {
            if let Some(host) = &host {
                std::env::set_var("SERVER_HOST", host);
            }
            if let Some(port) = port {
                std::env::set_var("SERVER_PORT", port.to_string());
            }
            if let Some(path) = &clinical_data {
                std::env::set_var("CLINICAL_DATA_PATH", path);
            }

            serve(AppConfig::from_env()?).await?;
        }
        Some(Commands::Redact { text }) => {
            let config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;

            let redaction = Redactor::new()?.redact_with_report(&text);
            println!("{}", redaction.text);
            for finding in &redaction.findings {
                eprintln!("  {}: {}", finding.label, finding.count);
            }
        }
        Some(Commands::Triage { symptoms }) => {
            let config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;

            let reference = ClinicalReference::load(config.clinical_data_path.as_deref())?;
            let result = triage(&symptoms, &reference);
            println!("{}", result.level);
            println!("{}", result.action);
            println!("{}", result.instructions);
        }
        Some(Commands::Interactions { medications }) => {
            let config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;

            let reference = ClinicalReference::load(config.clinical_data_path.as_deref())?;
            let report = check_interactions(&medications, &reference.interactions);
            for pair in &report.pairs {
                println!(
                    "{} + {}: {} - {}",
                    pair.first,
                    pair.second,
                    pair.severity.label(),
                    pair.description
                );
            }
            println!("{}", report.message);
        }
        None => {
            serve(AppConfig::from_env()?).await?;
        }
    }

    Ok(())
}
