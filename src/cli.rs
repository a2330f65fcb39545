//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option except the root directory may also come from a YAML config
//! file (see [`crate::config`]); flags given here take precedence.

use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Extract article fields from a tree of NewsML 1.2 files into one table.
///
/// # Examples
///
/// ```sh
/// # Walk ./afp and write parsed_xml.csv in the current directory
/// newsml_extract ./afp
///
/// # JSON output, reference CSV columns, custom location
/// newsml_extract ./afp -f json -o out/afp.json
/// newsml_extract ./afp --omit-path -o parsed_xml.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root directory searched recursively for `.xml` files
    pub root: PathBuf,

    /// Output table path [default: parsed_xml.csv]
    #[arg(short, long, env = "NEWSML_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output table format [default: csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of documents extracted concurrently [default: 12]
    #[arg(long, env = "NEWSML_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Per-document parse time limit in seconds [default: 30]
    #[arg(long)]
    pub parse_timeout_secs: Option<u64>,

    /// Leave the source path column out of the table
    #[arg(long)]
    pub omit_path: bool,
}
