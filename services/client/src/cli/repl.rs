//! Interactive REPL for `docquery`.
//!
//! Commands:
//! - `/open <path>` - select a PDF
//! - `/clear` - clear the selection
//! - `/upload` - upload the selected file
//! - `/status` - show the session
//! - `/new` - forget the current document and upload another
//! - `/help` - list commands
//! - `/quit`, `/exit`, `/q` - exit
//!
//! Any other input is a question about the uploaded document.

use std::io::Write;
use std::path::PathBuf;

use docquery_core::SessionController;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use super::{describe_outcome, describe_status, load_pdf};
use crate::error::ClientError;

const HELP: &str = "Commands: /open <path>, /clear, /upload, /status, /new, /help, /quit";

/// REPL command variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Open(PathBuf),
    Clear,
    Upload,
    Status,
    New,
    Help,
    Quit,
    /// Unknown or malformed command (will show help)
    Unknown(String),
    /// Anything that is not a command
    Question(String),
    /// Empty input (skip)
    Empty,
}

impl ReplCommand {
    /// Parse user input into a REPL command.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return ReplCommand::Empty;
        }

        if !trimmed.starts_with('/') {
            return ReplCommand::Question(trimmed.to_string());
        }

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        match (command.to_lowercase().as_str(), rest) {
            ("/open", "") => ReplCommand::Unknown(trimmed.to_string()),
            ("/open", path) => ReplCommand::Open(PathBuf::from(path)),
            ("/clear", "") => ReplCommand::Clear,
            ("/upload", "") => ReplCommand::Upload,
            ("/status", "") => ReplCommand::Status,
            ("/new", "") => ReplCommand::New,
            ("/help", "") => ReplCommand::Help,
            ("/quit" | "/exit" | "/q", "") => ReplCommand::Quit,
            _ => ReplCommand::Unknown(trimmed.to_string()),
        }
    }
}

fn print_lines<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Run an interactive session until `/quit` or end of input.
///
/// Lines are read from `input` and everything the user should see goes to
/// `out`. Failed actions are reported and the loop carries on.
pub async fn run_repl<R, W>(
    controller: &mut SessionController,
    input: R,
    out: &mut W,
) -> Result<(), ClientError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    writeln!(out, "docquery interactive mode")?;
    writeln!(out, "{}", HELP)?;

    loop {
        let prompt = if controller.session().is_some() { "ask> " } else { "upload> " };
        write!(out, "{}", prompt)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => writeln!(out, "{}", HELP)?,
            ReplCommand::Unknown(cmd) => {
                writeln!(out, "Unknown command: {}", cmd)?;
                writeln!(out, "{}", HELP)?;
            }
            ReplCommand::Open(path) => match load_pdf(&path).await {
                Ok(upload) => {
                    writeln!(out, "Selected {} ({} bytes)", upload.file_name(), upload.len())?;
                    controller.select_file(upload);
                }
                Err(e) => {
                    warn!(path = %path.display(), "Could not select file: {}", e);
                    writeln!(out, "Could not open {}: {}", path.display(), e)?;
                }
            },
            ReplCommand::Clear => {
                controller.clear_selection();
                writeln!(out, "Selection cleared")?;
            }
            ReplCommand::Upload => {
                if !controller.can_upload() {
                    writeln!(out, "A document is already loaded. Use /new to upload another.")?;
                    continue;
                }
                writeln!(out, "Uploading...")?;
                controller.upload().await;
                print_lines(out, &describe_outcome(controller))?;
            }
            ReplCommand::Status => print_lines(out, &describe_status(controller))?,
            ReplCommand::New => {
                controller.reset();
                writeln!(out, "Ready for a new upload")?;
            }
            ReplCommand::Question(question) => {
                if controller.session().is_none() {
                    writeln!(out, "Upload a document first (/open <path>, then /upload)")?;
                    continue;
                }
                controller.ask(&question).await;
                print_lines(out, &describe_outcome(controller))?;
            }
        }
    }

    Ok(())
}
