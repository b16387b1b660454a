//! services/client/src/adapters/http.rs
//!
//! This module contains the adapter for the remote document service.
//! It implements the `DocumentService` port from the `core` crate over HTTP
//! multipart requests.

use async_trait::async_trait;
use docquery_core::{
    DocumentId, DocumentService, PdfUpload, QueryRequest, TransportError, TransportResult,
};
use reqwest::{multipart, Client, Response, Url};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::{debug, warn};

const UPLOAD_PATH: &str = "upload_pdf/";
const QUERY_PATH: &str = "query_doc/";

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Debug, Deserialize)]
struct UploadResponse {
    doc_id: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    answer: String,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `DocumentService` against the `/upload_pdf/`
/// and `/query_doc/` endpoints.
#[derive(Clone)]
pub struct HttpDocumentService {
    client: Client,
    upload_url: String,
    query_url: String,
}

impl HttpDocumentService {
    /// Creates a new `HttpDocumentService` rooted at `base_url`.
    pub fn new(base_url: &Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &Url) -> Self {
        let base = base_url.as_str().trim_end_matches('/');
        Self {
            client,
            upload_url: format!("{}/{}", base, UPLOAD_PATH),
            query_url: format!("{}/{}", base, QUERY_PATH),
        }
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    /// Posts a multipart form and decodes a successful JSON body.
    async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        form: multipart::Form,
    ) -> TransportResult<T> {
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        decode(response).await
    }
}

/// Turns a response into `T`, treating any non-2xx status as a failure.
async fn decode<T: DeserializeOwned>(response: Response) -> TransportResult<T> {
    let status = response.status();
    if !status.is_success() {
        warn!(%status, url = %response.url(), "Document service returned an error status");
        return Err(TransportError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    serde_json::from_str(&body).map_err(|e| {
        debug!(body = %body, "Undecodable response body");
        TransportError::MalformedResponse(e.to_string())
    })
}

//=========================================================================================
// `DocumentService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DocumentService for HttpDocumentService {
    /// Sends the file as the single `file` part of a multipart form.
    async fn register_document(&self, upload: &PdfUpload) -> TransportResult<DocumentId> {
        let part = multipart::Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str("application/pdf")
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        debug!(url = %self.upload_url, "POST upload");
        let body: UploadResponse = self.post_form(&self.upload_url, form).await?;

        DocumentId::new(body.doc_id)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }

    /// Sends `doc_id` and `query` as text parts of a multipart form.
    async fn submit_query(&self, request: &QueryRequest) -> TransportResult<String> {
        let question = request.question().as_str();
        if question.trim().is_empty() {
            return Err(TransportError::EmptyQuestion);
        }

        let form = multipart::Form::new()
            .text("doc_id", request.document_id().as_str().to_string())
            .text("query", question.to_string());

        debug!(url = %self.query_url, "POST query");
        let body: QueryResponse = self.post_form(&self.query_url, form).await?;
        Ok(body.answer)
    }
}
