use std::path::PathBuf;

use arena_core::EngineId;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "arena",
    version,
    about = "Run several PDF parsing engines on one document and compare the results side by side"
)]
pub struct Cli {
    /// Document to parse.
    pub file: PathBuf,

    /// Engine to run (docling, pdfminer, pymupdf, pypdf2). Repeat for several.
    /// Defaults to the engines listed in the config file.
    #[arg(short, long = "engine", value_name = "ENGINE")]
    pub engines: Vec<EngineId>,

    /// Base URL of the parsing service.
    #[arg(long, env = "ARENA_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// First page to parse.
    #[arg(long, value_name = "N")]
    pub start_page: Option<u32>,

    /// Maximum number of pages to parse.
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Write successful results to this directory.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Export format. Exports are only written when this or --export-dir is given.
    #[arg(long, value_enum)]
    pub format: Option<ExportChoice>,

    /// RON config file [default: .arena.ron]. A missing default file means
    /// built-in defaults; a missing explicit file is warned about.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write logs to ./arena.log.
    #[arg(long)]
    pub log_file: bool,

    #[arg(short, long)]
    pub verbose: bool,

    /// Print the full extracted content instead of a preview.
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportChoice {
    Md,
    Json,
    Both,
}
