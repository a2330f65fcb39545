//! # NewsML Extract
//!
//! Walks a directory tree of NewsML 1.2 news-agency files and flattens each
//! document into one table row: headline, topic, tags, author or provider,
//! creation date, location, and body text.
//!
//! ## Usage
//!
//! ```sh
//! newsml_extract ./afp -o parsed_xml.csv
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Discovery**: Breadth-first walk of the root for `.xml` files
//! 2. **Extraction**: Parse each document and run the field rules (concurrent, order-preserving)
//! 3. **Output**: Write every record, failed documents included, as one CSV or JSON table
//!
//! Extraction never aborts the run: malformed documents, unreadable files and
//! unlistable directories are logged and reflected in the table instead.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod extract;
mod models;
mod newsml;
mod outputs;
mod pipeline;
mod traversal;
mod utils;

use cli::Cli;
use config::{load_config, FileConfig, Settings};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsml_extract starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let file_config = match &args.config {
        Some(path) => load_config(path).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to load configuration");
        })?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config);
    debug!(?settings, "Resolved settings");

    if !settings.root.is_dir() {
        error!(root = %settings.root.display(), "Root is not a readable directory");
        return Err(format!("not a directory: {}", settings.root.display()).into());
    }

    // Early check: ensure the output location is writable
    let output_dir = settings
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Discover and extract ----
    let discovery = traversal::discover(&settings.root).await;
    let records = pipeline::extract_all(discovery.files, settings.pipeline).await;

    for (dir, count) in &discovery.per_directory {
        println!("Processed {} files in {}", count, dir.display());
    }

    // ---- Output ----
    if let Err(e) = outputs::write_records(
        &records,
        &settings.output,
        settings.format,
        !settings.omit_path,
    )
    .await
    {
        error!(path = %settings.output.display(), error = %e, "Failed to write record table");
        return Err(e);
    }

    let failed = records.iter().filter(|r| r.is_failed()).count();
    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        documents = records.len(),
        failed,
        skipped_directories = discovery.skipped.len(),
        output = %settings.output.display(),
        "Execution complete"
    );

    Ok(())
}
