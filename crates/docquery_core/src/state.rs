//! crates/docquery_core/src/state.rs
//!
//! The document session state machine: an enumerated state, the events that
//! drive it and a pure transition function. No I/O happens here.

use crate::domain::{DocumentSession, QueryResult, ValidationError};
use std::fmt;

/// Shown after any failed upload, whatever the underlying cause.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";
/// Shown after any failed query, whatever the underlying cause.
pub const QUERY_FAILED_MESSAGE: &str = "Query failed. Try again.";

//=========================================================================================
// InteractionState (what the front end renders)
//=========================================================================================

/// The user-visible mode. Always derived from a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionState {
    AwaitingUpload,
    UploadInFlight,
    UploadFailed,
    Ready,
    QueryInFlight,
    QueryFailed,
    QuerySucceeded,
}

impl InteractionState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::UploadInFlight | Self::QueryInFlight)
    }

    /// True for `Ready` and its sub-states, i.e. whenever a document is registered.
    pub fn has_session(self) -> bool {
        matches!(
            self,
            Self::Ready | Self::QueryInFlight | Self::QueryFailed | Self::QuerySucceeded
        )
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AwaitingUpload => "awaiting upload",
            Self::UploadInFlight => "uploading",
            Self::UploadFailed => "upload failed",
            Self::Ready => "ready",
            Self::QueryInFlight => "querying",
            Self::QueryFailed => "query failed",
            Self::QuerySucceeded => "answered",
        };
        f.write_str(label)
    }
}

//=========================================================================================
// SessionState (the tagged union the controller owns)
//=========================================================================================

/// What is happening on the query surface once a document is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryActivity {
    Idle,
    InFlight,
    Finished(QueryResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state. `notice` holds the last local validation failure, if any.
    AwaitingUpload { notice: Option<ValidationError> },
    UploadInFlight,
    UploadFailed { message: String },
    Ready {
        session: DocumentSession,
        activity: QueryActivity,
    },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::AwaitingUpload { notice: None }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An upload was requested but failed local validation.
    UploadRejected(ValidationError),
    UploadStarted,
    UploadSucceeded(DocumentSession),
    UploadFailed,
    QueryStarted,
    QuerySucceeded(String),
    QueryFailed,
    /// Drop the current document and go back to the upload surface.
    Reset,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UploadRejected(_) => "upload_rejected",
            Self::UploadStarted => "upload_started",
            Self::UploadSucceeded(_) => "upload_succeeded",
            Self::UploadFailed => "upload_failed",
            Self::QueryStarted => "query_started",
            Self::QuerySucceeded(_) => "query_succeeded",
            Self::QueryFailed => "query_failed",
            Self::Reset => "reset",
        }
    }
}

/// An event that has no edge out of the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("event '{event}' is not valid while {from}")]
pub struct InvalidTransition {
    pub from: InteractionState,
    pub event: &'static str,
}

impl SessionState {
    pub fn interaction(&self) -> InteractionState {
        match self {
            Self::AwaitingUpload { .. } => InteractionState::AwaitingUpload,
            Self::UploadInFlight => InteractionState::UploadInFlight,
            Self::UploadFailed { .. } => InteractionState::UploadFailed,
            Self::Ready { activity, .. } => match activity {
                QueryActivity::Idle => InteractionState::Ready,
                QueryActivity::InFlight => InteractionState::QueryInFlight,
                QueryActivity::Finished(QueryResult::Answered { .. }) => {
                    InteractionState::QuerySucceeded
                }
                QueryActivity::Finished(QueryResult::Failed { .. }) => {
                    InteractionState::QueryFailed
                }
            },
        }
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        match self {
            Self::Ready { session, .. } => Some(session),
            _ => None,
        }
    }

    /// The answer to the last query, while it is still on screen.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Ready {
                activity: QueryActivity::Finished(QueryResult::Answered { answer }),
                ..
            } => Some(answer),
            _ => None,
        }
    }

    /// The message the user should currently see, if any: a validation notice
    /// or one of the coarse failure messages.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::AwaitingUpload { notice } => notice.as_ref().map(ToString::to_string),
            Self::UploadFailed { message } => Some(message.clone()),
            Self::Ready {
                activity: QueryActivity::Finished(QueryResult::Failed { message }),
                ..
            } => Some(message.clone()),
            _ => None,
        }
    }

    /// Computes the state that follows `event`, leaving `self` untouched.
    pub fn transition(&self, event: SessionEvent) -> Result<SessionState, InvalidTransition> {
        use SessionEvent as E;

        let next = match (self, event) {
            (Self::AwaitingUpload { .. } | Self::UploadFailed { .. }, E::UploadRejected(notice)) => {
                Self::AwaitingUpload {
                    notice: Some(notice),
                }
            }
            (Self::AwaitingUpload { .. } | Self::UploadFailed { .. }, E::UploadStarted) => {
                Self::UploadInFlight
            }
            (Self::UploadInFlight, E::UploadSucceeded(session)) => Self::Ready {
                session,
                activity: QueryActivity::Idle,
            },
            (Self::UploadInFlight, E::UploadFailed) => Self::UploadFailed {
                message: UPLOAD_FAILED_MESSAGE.to_string(),
            },
            (Self::Ready { session, activity }, E::QueryStarted)
                if *activity != QueryActivity::InFlight =>
            {
                Self::Ready {
                    session: session.clone(),
                    activity: QueryActivity::InFlight,
                }
            }
            (
                Self::Ready {
                    session,
                    activity: QueryActivity::InFlight,
                },
                E::QuerySucceeded(answer),
            ) => Self::Ready {
                session: session.clone(),
                activity: QueryActivity::Finished(QueryResult::Answered { answer }),
            },
            (
                Self::Ready {
                    session,
                    activity: QueryActivity::InFlight,
                },
                E::QueryFailed,
            ) => Self::Ready {
                session: session.clone(),
                activity: QueryActivity::Finished(QueryResult::Failed {
                    message: QUERY_FAILED_MESSAGE.to_string(),
                }),
            },
            (state, E::Reset) if !state.interaction().is_in_flight() => Self::default(),
            (state, event) => {
                return Err(InvalidTransition {
                    from: state.interaction(),
                    event: event.name(),
                })
            }
        };

        Ok(next)
    }
}
