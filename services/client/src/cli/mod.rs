//! Terminal front end: argument parsing, the interactive REPL and the
//! one-shot runner. Everything here goes through the `SessionController`;
//! nothing talks to the network directly.

pub mod args;
pub mod repl;
pub mod runner;

pub use args::Args;
pub use repl::{run_repl, ReplCommand};
pub use runner::run_once;

use crate::error::ClientError;
use docquery_core::{InteractionState, PdfUpload, SessionController};
use std::path::Path;

/// Reads a file from disk into a `PdfUpload`.
///
/// The bytes are not inspected; the service decides whether they are a PDF.
pub async fn load_pdf(path: &Path) -> Result<PdfUpload, ClientError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    Ok(PdfUpload::new(file_name, bytes)?)
}

/// The lines to show the user after an action, based on where it left the session.
pub fn describe_outcome(controller: &SessionController) -> Vec<String> {
    let state = controller.state();
    match controller.interaction_state() {
        InteractionState::Ready => controller
            .session()
            .map(|s| vec![format!("Document ID: {}", s.document_id)])
            .unwrap_or_default(),
        InteractionState::QuerySucceeded => {
            let answer = state.answer().unwrap_or_default();
            vec!["Answer:".to_string(), answer.to_string()]
        }
        InteractionState::AwaitingUpload
        | InteractionState::UploadFailed
        | InteractionState::QueryFailed => state.message().into_iter().collect(),
        InteractionState::UploadInFlight | InteractionState::QueryInFlight => Vec::new(),
    }
}

/// A multi-line summary for `/status`.
pub fn describe_status(controller: &SessionController) -> Vec<String> {
    let mut lines = vec![format!("State: {}", controller.interaction_state())];
    match controller.selected_file() {
        Some(file) => lines.push(format!("Selected: {} ({} bytes)", file.file_name(), file.len())),
        None => lines.push("Selected: none".to_string()),
    }
    if let Some(session) = controller.session() {
        lines.push(format!("Document: {}", session.file_name));
        lines.push(format!("Document ID: {}", session.document_id));
        lines.push(format!(
            "Registered: {}",
            session.registered_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    if let Some(message) = controller.state().message() {
        lines.push(format!("Message: {}", message));
    }
    lines
}
