//! Async driver for the chat page.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::state::{ChatState, ChatView, ExchangeId, Notice, PendingAsk, UploadFailure};
use crate::api::{ApiError, AskResponse, PendingFile, QaApi};

/// The chat page: shared [`ChatState`] plus the client that talks to the
/// question-answering service.
///
/// Cloning is cheap; clones share the same state.
#[derive(Debug, Clone)]
pub struct ChatPage {
    inner: Arc<PageInner>,
}

#[derive(Debug)]
struct PageInner {
    state: Mutex<ChatState>,
    api: Arc<dyn QaApi>,
    shutdown: CancellationToken,
}

/// Handle to a submitted question whose answer is being fetched.
#[derive(Debug)]
pub struct Submission {
    id: ExchangeId,
    handle: JoinHandle<()>,
}

impl Submission {
    pub fn id(&self) -> ExchangeId {
        self.id
    }

    /// Wait until the answer (or error) has been written to the transcript.
    pub async fn finished(self) -> Result<(), JoinError> {
        self.handle.await
    }
}

impl ChatPage {
    pub fn new(api: Arc<dyn QaApi>) -> Self {
        Self {
            inner: Arc::new(PageInner {
                state: Mutex::new(ChatState::new()),
                api,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Current state for rendering.
    pub fn view(&self) -> ChatView {
        self.inner.state.lock().view()
    }

    /// Take the pending notice, if any. Each notice is shown once.
    pub fn take_notice(&self) -> Option<Notice> {
        self.inner.state.lock().take_notice()
    }

    pub fn select_file(&self, file: PendingFile) {
        info!(
            name: "chat.file.selected",
            filename = %file.name,
            size = file.bytes.len(),
            "File selected"
        );
        self.inner.state.lock().select_file(file);
    }

    /// Upload the selected file and remember the name the service returns.
    ///
    /// With no file selected this queues a warning notice and makes no request.
    pub async fn upload_file(&self) -> Result<String, UploadFailure> {
        let selected = self.inner.state.lock().pending_upload();

        let result = match selected {
            Ok(file) => {
                info!(
                    name: "chat.upload.started",
                    filename = %file.name,
                    size = file.bytes.len(),
                    "Uploading file"
                );
                run_cancellable(&self.inner.shutdown, self.inner.api.upload(&file))
                    .await
                    .map_err(UploadFailure::from)
            }
            Err(e) => Err(e),
        };

        let outcome = self.inner.state.lock().finish_upload(result);
        match &outcome {
            Ok(filename) => {
                info!(name: "chat.upload.succeeded", filename = %filename, "File uploaded");
            }
            Err(e) => {
                warn!(name: "chat.upload.failed", error = %e, "File upload failed");
            }
        }
        outcome
    }

    /// Record an upload that never reached the service because the browser's
    /// request could not be read.
    pub fn reject_upload(&self, reason: impl Into<String>) {
        let failure = UploadFailure::Unreadable(reason.into());
        warn!(name: "chat.upload.failed", error = %failure, "File upload failed");
        let _ = self.inner.state.lock().finish_upload(Err(failure));
    }

    /// Record the question and fetch its answer in the background.
    ///
    /// Returns `None` (and does nothing) for blank input. Must be called from
    /// within a Tokio runtime.
    pub fn submit_question(&self, text: &str) -> Option<Submission> {
        let PendingAsk { id, request } = self.inner.state.lock().begin_submit(text)?;

        info!(
            name: "chat.ask.started",
            exchange_id = %id,
            has_file = request.file.is_some(),
            "Question submitted"
        );

        let page = self.clone();
        let token = self.inner.shutdown.child_token();
        let handle = tokio::spawn(async move {
            let result = run_cancellable(&token, page.inner.api.ask(&request)).await;
            page.complete(id, result);
        });

        Some(Submission { id, handle })
    }

    fn complete(&self, id: ExchangeId, result: Result<AskResponse, ApiError>) {
        if let Err(e) = &result {
            warn!(name: "chat.ask.failed", exchange_id = %id, error = %e, "Question failed");
        }
        let ok = result.is_ok();

        let applied = self.inner.state.lock().complete_submit(id, result);
        if applied {
            info!(name: "chat.ask.completed", exchange_id = %id, success = ok, "Answer recorded");
        } else {
            info!(
                name: "chat.ask.discarded",
                exchange_id = %id,
                "Answer arrived after transcript was cleared"
            );
        }
    }

    pub fn clear_transcript(&self) {
        self.inner.state.lock().clear_transcript();
        info!(name: "chat.transcript.cleared", "Transcript cleared");
    }

    /// Abandon every in-flight request. Their exchanges end up failed.
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
    }
}

async fn run_cancellable<T>(
    token: &CancellationToken,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        () = token.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}
