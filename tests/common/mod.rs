//! Fake question-answering service for integration tests.
//!
//! Mounted under `/api` so clients must keep the base path when building
//! endpoint URLs.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use serde_json::{Value, json};

/// A file as received by the fake `/upload`.
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub field: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything the fake service has been sent.
#[derive(Debug, Default)]
pub struct Upstream {
    pub uploads: Mutex<Vec<ReceivedFile>>,
    pub asks: Mutex<Vec<Value>>,
}

impl Upstream {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn ask_bodies(&self) -> Vec<Value> {
        self.asks.lock().unwrap().clone()
    }
}

/// Start the fake service on an ephemeral port; returns its base URL.
///
/// `/upload` echoes the filename, except `reject.txt` (500) and
/// `nameless.txt` (`{}`). `/ask` answers `life?` with `42`, fails `fail`
/// with 500, answers `silent` with `{}`, delays `slow`, and echoes
/// anything else.
pub async fn spawn_upstream() -> (String, Arc<Upstream>) {
    let upstream = Arc::new(Upstream::default());

    let api = Router::new()
        .route("/upload", post(upload))
        .route("/ask", post(ask))
        .with_state(Arc::clone(&upstream));
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), upstream)
}

async fn upload(
    State(upstream): State<Arc<Upstream>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut received = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let file = ReceivedFile {
            field: field.name().unwrap_or_default().to_string(),
            filename: field.file_name().unwrap_or_default().to_string(),
            content_type: field.content_type().map(str::to_string),
            bytes: Vec::new(),
        };
        let bytes = field.bytes().await.unwrap().to_vec();
        received = Some(ReceivedFile { bytes, ..file });
    }

    let Some(file) = received else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "no file" })));
    };
    upstream.uploads.lock().unwrap().push(file.clone());

    match file.filename.as_str() {
        "reject.txt" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "disk full" })),
        ),
        "nameless.txt" => (StatusCode::OK, Json(json!({}))),
        name => (StatusCode::OK, Json(json!({ "filename": name }))),
    }
}

async fn ask(
    State(upstream): State<Arc<Upstream>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.asks.lock().unwrap().push(body.clone());

    let text = body["text"].as_str().unwrap_or_default().to_string();
    match text.as_str() {
        "life?" => (StatusCode::OK, Json(json!({ "answer": "42" }))),
        "fail" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "model unavailable" })),
        ),
        "silent" => (StatusCode::OK, Json(json!({}))),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(200)).await;
            (StatusCode::OK, Json(json!({ "answer": "slow answer" })))
        }
        other => (StatusCode::OK, Json(json!({ "answer": format!("echo: {other}") }))),
    }
}
