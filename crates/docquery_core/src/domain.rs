//! crates/docquery_core/src/domain.rs
//!
//! Defines the pure, core data structures for the document session workflow.
//! These types are independent of any transport or serialization format.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Problems detected locally, before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No file selected. Please select a PDF file.")]
    NoFileSelected,
    #[error("The selected file is empty.")]
    EmptyFile,
    #[error("Please enter a question.")]
    EmptyQuestion,
    #[error("The service returned an empty document identifier.")]
    EmptyDocumentId,
}

/// Opaque identifier the remote service issues for an uploaded document.
///
/// Never empty: the only way to build one is through [`DocumentId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyDocumentId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A question the user typed, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The file the user picked for upload.
///
/// Only emptiness is checked here. Whether the bytes really are a PDF is for
/// the remote service to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    file_name: String,
    bytes: Bytes,
}

impl PdfUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self, ValidationError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ValidationError::EmptyFile);
        }
        Ok(Self {
            file_name: file_name.into(),
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Cheap to call repeatedly; `Bytes` clones share the same buffer.
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Represents a document the remote service has accepted.
///
/// Created only from a successful upload and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSession {
    /// Local key used to correlate log lines for this session.
    pub local_id: Uuid,
    pub document_id: DocumentId,
    pub file_name: String,
    pub registered_at: DateTime<Utc>,
}

impl DocumentSession {
    pub(crate) fn new(document_id: DocumentId, file_name: &str) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            document_id,
            file_name: file_name.to_string(),
            registered_at: Utc::now(),
        }
    }
}

/// One question bound to an existing [`DocumentSession`].
///
/// The constructor is private to this crate and borrows a session, so a
/// request cannot exist before an upload has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    document_id: DocumentId,
    question: Question,
}

impl QueryRequest {
    pub(crate) fn new(session: &DocumentSession, question: Question) -> Self {
        Self {
            document_id: session.document_id.clone(),
            question,
        }
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn question(&self) -> &Question {
        &self.question
    }
}

/// The outcome of the most recent query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Answered { answer: String },
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_rejects_blank_values() {
        assert_eq!(DocumentId::new(""), Err(ValidationError::EmptyDocumentId));
        assert_eq!(DocumentId::new("   "), Err(ValidationError::EmptyDocumentId));
        assert_eq!(DocumentId::new("abc123").unwrap().as_str(), "abc123");
    }

    #[test]
    fn question_is_trimmed() {
        let q = Question::new("  What is the summary?\n").unwrap();
        assert_eq!(q.as_str(), "What is the summary?");
        assert_eq!(Question::new(" \t "), Err(ValidationError::EmptyQuestion));
    }

    #[test]
    fn empty_upload_is_rejected() {
        assert_eq!(
            PdfUpload::new("doc.pdf", Vec::<u8>::new()),
            Err(ValidationError::EmptyFile)
        );
        let upload = PdfUpload::new("doc.pdf", b"%PDF-1.4".to_vec()).unwrap();
        assert_eq!(upload.file_name(), "doc.pdf");
        assert_eq!(upload.len(), 8);
    }

    #[test]
    fn query_request_takes_document_id_from_session() {
        let session = DocumentSession::new(DocumentId::new("abc123").unwrap(), "doc.pdf");
        let request = QueryRequest::new(&session, Question::new("Why?").unwrap());
        assert_eq!(request.document_id().as_str(), "abc123");
        assert_eq!(request.question().as_str(), "Why?");
    }
}
