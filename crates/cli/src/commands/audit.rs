use anyhow::{Context, Result};
use beets_audit_auditor::{StdFilesystem, perform_audit};
use beets_audit_core::{AuditConfig, load_config};
use beets_audit_library::BeetsLibrary;
use std::path::PathBuf;
use tracing::debug;

/// Audit the library and print the report as one line of JSON
pub fn run(config_path: Option<PathBuf>, library: Option<PathBuf>, query: Vec<String>) -> Result<()> {
    debug!("audit called");

    let mut config = load_config(config_path.as_deref()).context("Failed to load config")?;
    if let Some(library) = library {
        config.library = library;
    }

    // TODO: filter albums by query once the beets query syntax is supported
    if !query.is_empty() {
        debug!("Query ignored, auditing the whole library: {}", query.join(" "));
    }

    let report = audit_to_json(&config)?;
    println!("{}", report);

    Ok(())
}

/// Build the full report before anything is printed
fn audit_to_json(config: &AuditConfig) -> Result<String> {
    let library = BeetsLibrary::open(&config.library, &config.art_filename)
        .with_context(|| format!("Failed to open library {}", config.library.display()))?;

    let report = perform_audit(&library, &StdFilesystem).context("Audit failed")?;

    serde_json::to_string(&report).context("Failed to serialize report")
}
