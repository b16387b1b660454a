//! One-shot execution: upload the selected file, ask each question, exit.

use std::io::Write;

use docquery_core::{InteractionState, SessionController};
use tracing::info;

use super::describe_outcome;
use crate::error::ClientError;

/// Uploads the already-selected file and asks `questions` in order.
///
/// Answers and per-question failures are written to `out`. A failed upload
/// stops the run; failed queries do not, but make the run return an error
/// once every question has been tried.
pub async fn run_once<W: Write>(
    controller: &mut SessionController,
    questions: &[String],
    out: &mut W,
) -> Result<(), ClientError> {
    let state = controller.upload().await;
    if !state.has_session() {
        let message = controller
            .state()
            .message()
            .unwrap_or_else(|| format!("upload ended in state '{}'", state));
        return Err(ClientError::Internal(message));
    }
    for line in describe_outcome(controller) {
        writeln!(out, "{}", line)?;
    }

    let mut failed = 0usize;
    for question in questions {
        writeln!(out)?;
        writeln!(out, "Q: {}", question.trim())?;
        if !controller.can_ask(question) {
            writeln!(out, "(skipped empty question)")?;
            continue;
        }
        let state = controller.ask(question).await;
        for line in describe_outcome(controller) {
            writeln!(out, "{}", line)?;
        }
        if state == InteractionState::QueryFailed {
            failed += 1;
        }
    }

    info!(asked = questions.len(), failed, "One-shot run finished");
    if failed > 0 {
        return Err(ClientError::Internal(format!(
            "{} of {} questions failed",
            failed,
            questions.len()
        )));
    }
    Ok(())
}
