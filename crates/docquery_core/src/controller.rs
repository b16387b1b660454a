//! crates/docquery_core/src/controller.rs
//!
//! The session controller: owns the [`SessionState`], runs the two user
//! actions (upload, ask) against a [`DocumentService`] and turns every outcome
//! into a state transition. Errors stop here; callers only ever see the
//! resulting [`InteractionState`].

use crate::domain::{DocumentSession, PdfUpload, Question, QueryRequest, ValidationError};
use crate::ports::DocumentService;
use crate::state::{InteractionState, QueryActivity, SessionEvent, SessionState};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub struct SessionController {
    transport: Arc<dyn DocumentService>,
    state: SessionState,
    selected: Option<PdfUpload>,
    observer: watch::Sender<InteractionState>,
}

impl SessionController {
    /// Creates a controller in `AwaitingUpload` with nothing selected.
    pub fn new(transport: Arc<dyn DocumentService>) -> Self {
        let (observer, _) = watch::channel(InteractionState::AwaitingUpload);
        Self {
            transport,
            state: SessionState::default(),
            selected: None,
            observer,
        }
    }

    //=====================================================================================
    // Read-only views
    //=====================================================================================

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.state.interaction()
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        self.state.session()
    }

    pub fn selected_file(&self) -> Option<&PdfUpload> {
        self.selected.as_ref()
    }

    /// Receives every state change, including the in-flight ones that are
    /// otherwise only visible while an action is awaiting the network.
    pub fn subscribe(&self) -> watch::Receiver<InteractionState> {
        self.observer.subscribe()
    }

    /// Whether the upload action is enabled.
    pub fn can_upload(&self) -> bool {
        matches!(
            self.state,
            SessionState::AwaitingUpload { .. } | SessionState::UploadFailed { .. }
        )
    }

    /// Whether submitting `question_text` would issue a query.
    pub fn can_ask(&self, question_text: &str) -> bool {
        match &self.state {
            SessionState::Ready { activity, .. } => {
                *activity != QueryActivity::InFlight && Question::new(question_text).is_ok()
            }
            _ => false,
        }
    }

    //=====================================================================================
    // File selection
    //=====================================================================================

    /// Replaces the current selection. The selection survives failed uploads
    /// so a retry does not need to pick the file again.
    pub fn select_file(&mut self, upload: PdfUpload) {
        debug!(file = upload.file_name(), bytes = upload.len(), "File selected");
        self.selected = Some(upload);
    }

    pub fn clear_selection(&mut self) {
        debug!("File selection cleared");
        self.selected = None;
    }

    //=====================================================================================
    // Actions
    //=====================================================================================

    /// The upload action.
    ///
    /// Inert unless the upload surface is active. With nothing selected no
    /// request is made and a validation notice is surfaced instead.
    pub async fn upload(&mut self) -> InteractionState {
        if !self.can_upload() {
            warn!(state = %self.interaction_state(), "Upload action ignored");
            return self.interaction_state();
        }

        let Some(upload) = self.selected.clone() else {
            info!("Upload requested with no file selected");
            self.apply(SessionEvent::UploadRejected(ValidationError::NoFileSelected));
            return self.interaction_state();
        };

        self.apply(SessionEvent::UploadStarted);
        info!(file = upload.file_name(), bytes = upload.len(), "Uploading document");

        match self.transport.register_document(&upload).await {
            Ok(document_id) => {
                let session = DocumentSession::new(document_id, upload.file_name());
                info!(
                    session = %session.local_id,
                    document_id = %session.document_id,
                    "Document registered"
                );
                self.apply(SessionEvent::UploadSucceeded(session));
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.apply(SessionEvent::UploadFailed);
            }
        }

        self.interaction_state()
    }

    /// The query action.
    ///
    /// Only reachable with a registered document. Blank questions are dropped
    /// without touching the network or the current state.
    pub async fn ask(&mut self, question_text: &str) -> InteractionState {
        let request = match &self.state {
            SessionState::Ready { session, activity } if *activity != QueryActivity::InFlight => {
                match Question::new(question_text) {
                    Ok(question) => QueryRequest::new(session, question),
                    Err(_) => {
                        debug!("Ignoring empty question");
                        return self.interaction_state();
                    }
                }
            }
            _ => {
                warn!(state = %self.interaction_state(), "Query action ignored");
                return self.interaction_state();
            }
        };

        self.apply(SessionEvent::QueryStarted);
        info!(
            document_id = %request.document_id(),
            question = request.question().as_str(),
            "Submitting query"
        );

        match self.transport.submit_query(&request).await {
            Ok(answer) => {
                info!(chars = answer.len(), "Answer received");
                self.apply(SessionEvent::QuerySucceeded(answer));
            }
            Err(e) => {
                error!("Query failed: {}", e);
                self.apply(SessionEvent::QueryFailed);
            }
        }

        self.interaction_state()
    }

    /// Drops the registered document (if any) and shows the upload surface again.
    /// The file selection is kept.
    pub fn reset(&mut self) -> InteractionState {
        if let Some(session) = self.session() {
            info!(session = %session.local_id, "Closing document session");
        }
        self.apply(SessionEvent::Reset);
        self.interaction_state()
    }

    /// Runs one transition and notifies observers. Invalid events leave the
    /// state as it was.
    fn apply(&mut self, event: SessionEvent) {
        match self.state.transition(event) {
            Ok(next) => {
                let from = self.state.interaction();
                self.state = next;
                let to = self.state.interaction();
                debug!(%from, %to, "Session transition");
                self.observer.send_replace(to);
            }
            Err(e) => warn!("{}", e),
        }
    }
}
