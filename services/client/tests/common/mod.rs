#![allow(dead_code)]

//! A throwaway document service for integration tests. It speaks the same
//! multipart contract as the real one, answers from a script and records
//! everything it receives.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use reqwest::Url;
use tempfile::TempDir;

pub type Canned = (StatusCode, String);

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedQuery {
    pub doc_id: Option<String>,
    pub query: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    upload_script: Mutex<VecDeque<Canned>>,
    query_script: Mutex<VecDeque<Canned>>,
    delay: Mutex<Option<Duration>>,
    pub uploads: Mutex<Vec<ReceivedUpload>>,
    pub queries: Mutex<Vec<ReceivedQuery>>,
}

pub struct MockService {
    pub base_url: Url,
    pub state: Arc<MockState>,
}

impl MockService {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/upload_pdf/", post(upload_pdf))
            .route("/query_doc/", post(query_doc))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock service");
        let addr = listener.local_addr().expect("mock service address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock service crashed");
        });

        Self {
            base_url: base_url(addr),
            state,
        }
    }

    pub fn upload_responds(&self, status: StatusCode, body: &str) -> &Self {
        self.state
            .upload_script
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
        self
    }

    pub fn query_responds(&self, status: StatusCode, body: &str) -> &Self {
        self.state
            .query_script
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
        self
    }

    /// Makes every handler sleep before answering.
    pub fn delay_responses(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = Some(delay);
    }

    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.state.uploads.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<ReceivedQuery> {
        self.state.queries.lock().unwrap().clone()
    }
}

pub fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{}", addr)).expect("valid mock url")
}

/// An address nothing is listening on.
pub async fn closed_port_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    base_url(addr)
}

/// Writes `contents` to `name` inside a fresh temp dir.
pub fn write_temp_file(name: &str, contents: &[u8]) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write temp file");
    (dir, path)
}

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n";

//=================
// Handlers
//=================

async fn pause(state: &MockState) {
    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

fn next(script: &Mutex<VecDeque<Canned>>) -> Canned {
    script.lock().unwrap().pop_front().unwrap_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "script exhausted".to_string(),
    ))
}

async fn upload_pdf(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Canned {
    pause(&state).await;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.uploads.lock().unwrap().push(ReceivedUpload {
            file_name,
            content_type,
            bytes,
        });
    }
    next(&state.upload_script)
}

async fn query_doc(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Canned {
    pause(&state).await;
    let mut received = ReceivedQuery {
        doc_id: None,
        query: None,
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        let value = field.text().await.ok();
        match name.as_deref() {
            Some("doc_id") => received.doc_id = value,
            Some("query") => received.query = value,
            _ => {}
        }
    }
    state.queries.lock().unwrap().push(received);
    next(&state.query_script)
}
