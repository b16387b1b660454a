//! Command-line arguments for `docquery`.

use clap::Parser;
use std::path::PathBuf;

/// Upload a PDF to a document service and ask questions about it.
#[derive(Parser, Debug, Clone)]
#[command(name = "docquery")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// PDF file to select at startup
    pub file: Option<PathBuf>,

    /// Ask a question and exit; repeat for several questions (requires FILE)
    #[arg(short = 'a', long = "ask", requires = "file")]
    pub ask: Vec<String>,

    /// Base address of the document service (overrides DOCQUERY_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (overrides DOCQUERY_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Show debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// One-shot mode: upload, answer every `--ask`, exit.
    pub fn is_one_shot(&self) -> bool {
        self.file.is_some() && !self.ask.is_empty()
    }
}
