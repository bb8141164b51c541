use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Form, Multipart, State, multipart::MultipartError},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api::{HttpQaApi, PendingFile, QaApi};
use crate::chat::ChatPage;
use crate::config::AppConfig;
use crate::ui::{html_shell, nav_bar, render_chat_page};

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let api = HttpQaApi::new(&config.api.base_url)?;
    info!(
        name: "api.config.loaded",
        base_url = %api.base_url(),
        "Question-answering API configured"
    );

    let page = ChatPage::new(Arc::new(api) as Arc<dyn QaApi>);
    let state = AppState {
        page: page.clone(),
        config: Arc::clone(&config),
    };
    let app = build_router(state);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal(page))
        .await?;
    Ok(())
}

/// Build the router for the chat page.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        // HTML pages and form targets
        .route("/", get(index_handler))
        .route("/upload", post(upload_handler))
        .route("/ask", post(ask_handler))
        .route("/clear", post(clear_handler))
        // JSON
        .route("/api/transcript", get(transcript_handler))
        // Static assets
        .nest_service("/static", ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal(page: ChatPage) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!(name: "server.stopping", "Shutting down, cancelling in-flight questions");
    page.shutdown();
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - The chat page.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let notice = state.page.take_notice();
    let view = state.page.view();
    let body = render_chat_page(&view, notice.as_ref());
    Html(html_shell(nav_bar::TITLE, &body, view.loading))
}

/// POST /upload - Select the submitted file (if any) and upload it.
///
/// Always redirects back to the page; the outcome is shown as a notice.
async fn upload_handler(State(state): State<AppState>, multipart: Multipart) -> Redirect {
    match read_upload(multipart).await {
        Ok(Some(file)) => state.page.select_file(file),
        Ok(None) => {}
        Err(e) => {
            state.page.reject_upload(e.body_text());
            return Redirect::to("/");
        }
    }

    let _ = state.page.upload_file().await;
    Redirect::to("/")
}

/// Read the `file` part of an upload form.
///
/// Browsers send an empty part when no file was chosen; that yields `None`.
async fn read_upload(mut multipart: Multipart) -> Result<Option<PendingFile>, MultipartError> {
    let mut selected = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        let mut file = PendingFile::new(filename, data.to_vec());
        if let Some(content_type) = content_type {
            file = file.with_content_type(content_type);
        }
        selected = Some(file);
    }
    Ok(selected)
}

/// Form body for POST /ask.
#[derive(Debug, Deserialize)]
struct AskForm {
    #[serde(default)]
    question: String,
}

/// POST /ask - Record the question and fetch its answer in the background.
async fn ask_handler(State(state): State<AppState>, Form(form): Form<AskForm>) -> Redirect {
    if state.page.submit_question(&form.question).is_none() {
        tracing::debug!("Ignoring blank question");
    }
    Redirect::to("/")
}

/// POST /clear - Empty the transcript.
async fn clear_handler(State(state): State<AppState>) -> Redirect {
    state.page.clear_transcript();
    Redirect::to("/")
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON
// ─────────────────────────────────────────────────────────────────────────────

/// Exchange DTO for API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExchangeDto {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub pending: bool,
}

/// Transcript DTO for API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptDto {
    pub loading: bool,
    pub uploaded_file: Option<String>,
    pub exchanges: Vec<ExchangeDto>,
}

/// GET /api/transcript - Current transcript as JSON.
async fn transcript_handler(State(state): State<AppState>) -> Json<TranscriptDto> {
    let view = state.page.view();
    let exchanges = view
        .exchanges
        .iter()
        .map(|e| ExchangeDto {
            id: e.id.to_string(),
            question: e.question.clone(),
            answer: e.answer.text().to_string(),
            pending: e.answer.is_pending(),
        })
        .collect();

    Json(TranscriptDto {
        loading: view.loading,
        uploaded_file: view.uploaded_file,
        exchanges,
    })
}
