//! crates/docquery_core/src/ports.rs
//!
//! Defines the service contract (trait) the session controller talks to.
//! The trait is the boundary of the hexagonal architecture: the core never
//! sees HTTP, only this port.

use async_trait::async_trait;
use crate::domain::{DocumentId, PdfUpload, QueryRequest};

//=========================================================================================
// Transport Error and Result Types
//=========================================================================================

/// Everything that can go wrong between issuing a request and reading its answer.
///
/// The variants exist for logging only. Users see one coarse message per
/// operation regardless of the variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("The service answered with status {0}")]
    Status(u16),
    #[error("Malformed response body: {0}")]
    MalformedResponse(String),
    #[error("Refusing to send an empty question")]
    EmptyQuestion,
}

/// A convenience type alias for `Result<T, TransportError>`.
pub type TransportResult<T> = Result<T, TransportError>;

//=========================================================================================
// Service Port (Trait)
//=========================================================================================

/// The two remote operations of the document service.
///
/// Implementations hold no state between calls and never retry. Neither call
/// is idempotent: registering the same bytes twice may yield two identifiers.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Uploads a document and returns the identifier the service assigned to it.
    async fn register_document(&self, upload: &PdfUpload) -> TransportResult<DocumentId>;

    /// Asks a question about a previously registered document.
    async fn submit_query(&self, request: &QueryRequest) -> TransportResult<String>;
}
