//! Run configuration: defaults, an optional YAML file, and CLI flags.
//!
//! Precedence is CLI over file over defaults. A config file looks like:
//!
//! ```yaml
//! output: tables/afp.csv
//! format: csv
//! concurrency: 8
//! parse_timeout_secs: 10
//! omit_path: false
//! ```

use crate::cli::Cli;
use crate::outputs::OutputFormat;
use crate::pipeline::PipelineOptions;
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_OUTPUT: &str = "parsed_xml.csv";

/// Optional settings read from a YAML config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub concurrency: Option<usize>,
    pub parse_timeout_secs: Option<u64>,
    pub omit_path: Option<bool>,
}

/// Load a [`FileConfig`] from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid config YAML.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<FileConfig, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let config: FileConfig = serde_yaml::from_str(&text)?;
    info!(?config, "Loaded configuration");
    Ok(config)
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub pipeline: PipelineOptions,
    pub omit_path: bool,
}

impl Settings {
    /// Layer CLI flags over `file` over built-in defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let defaults = PipelineOptions::default();
        let concurrency = cli
            .concurrency
            .or(file.concurrency)
            .unwrap_or(defaults.concurrency)
            .max(1);
        let parse_timeout = cli
            .parse_timeout_secs
            .or(file.parse_timeout_secs)
            .map_or(defaults.parse_timeout, Duration::from_secs);

        Self {
            root: cli.root.clone(),
            output: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            format: cli.format.or(file.format).unwrap_or_default(),
            pipeline: PipelineOptions {
                concurrency,
                parse_timeout,
            },
            omit_path: cli.omit_path || file.omit_path.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("newsml_extract").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&cli(&["afp"]), FileConfig::default());
        assert_eq!(settings.root, PathBuf::from("afp"));
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.pipeline, PipelineOptions::default());
        assert!(!settings.omit_path);
    }

    #[test]
    fn test_file_overrides_defaults_and_cli_overrides_file() {
        let file = FileConfig {
            output: Some("from_file.json".into()),
            format: Some(OutputFormat::Json),
            concurrency: Some(2),
            parse_timeout_secs: Some(7),
            omit_path: Some(true),
        };
        let settings = Settings::resolve(&cli(&["afp", "--concurrency", "9"]), file);
        assert_eq!(settings.output, PathBuf::from("from_file.json"));
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.pipeline.concurrency, 9);
        assert_eq!(settings.pipeline.parse_timeout, Duration::from_secs(7));
        assert!(settings.omit_path);
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let settings = Settings::resolve(&cli(&["afp", "--concurrency", "0"]), FileConfig::default());
        assert_eq!(settings.pipeline.concurrency, 1);
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "format: json\nconcurrency: 4\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.output, None);
    }

    #[test]
    fn test_load_config_rejects_unknown_keys() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "json_output_dir: ./json\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
