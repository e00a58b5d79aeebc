//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Parse the XML declaration of a document and print its version
#[derive(Parser, Debug)]
#[command(name = "xmldoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// XML document to parse (default: `source_file` from settings)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Render the document tree after the version
    #[arg(short, long)]
    pub tree: bool,

    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Print settings as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions and exit
    #[arg(long = "generator", value_enum)]
    pub generator: Option<clap_complete::Shell>,
}
