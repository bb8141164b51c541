//! Chat page state and its update functions.
//!
//! [`ChatState`] owns everything the page shows. Each user action and each
//! network completion maps to one method here; the methods never perform
//! I/O, so the async side in [`super::ChatPage`] only has to call them in
//! the right order.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::api::{ApiError, AskRequest, AskResponse, PendingFile, UploadResponse};

/// Placeholder answer while a question is in flight.
pub const PENDING_ANSWER: &str = "...";

/// Answer shown when `/ask` fails.
pub const ERROR_ANSWER: &str = "Error occurred, please try again";

/// Notice for an upload attempt with nothing selected.
pub const NO_FILE_WARNING: &str = "Please select a file to upload";

/// Notice after a successful upload.
pub const UPLOAD_SUCCEEDED: &str = "File uploaded successfully";

/// Notice after a failed upload.
pub const UPLOAD_FAILED: &str = "Error uploading file";

/// Identifier assigned to an [`Exchange`] when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeId(Uuid);

impl ExchangeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The answer half of an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Request in flight; rendered as [`PENDING_ANSWER`].
    Pending,
    /// Text returned by the service.
    Received(String),
    /// The request failed; rendered as [`ERROR_ANSWER`].
    Failed,
}

impl Answer {
    pub fn text(&self) -> &str {
        match self {
            Self::Pending => PENDING_ANSWER,
            Self::Received(text) => text,
            Self::Failed => ERROR_ANSWER,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One question/answer pair in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub id: ExchangeId,
    pub question: String,
    pub answer: Answer,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// One-shot message for the user, shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Why an upload did not produce a file reference.
#[derive(Error, Debug)]
pub enum UploadFailure {
    #[error("no file selected")]
    NoFileSelected,

    /// The browser's upload could not be read, e.g. it exceeded the size limit.
    #[error("unreadable upload: {0}")]
    Unreadable(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A submission that has been recorded and still needs its `/ask` call.
#[derive(Debug, Clone)]
pub struct PendingAsk {
    pub id: ExchangeId,
    pub request: AskRequest,
}

/// Read-only copy of the state used for rendering.
#[derive(Debug, Clone, Default)]
pub struct ChatView {
    pub question: String,
    pub exchanges: Vec<Exchange>,
    pub loading: bool,
    pub pending_file: Option<String>,
    pub uploaded_file: Option<String>,
}

/// All state behind the chat page.
#[derive(Debug, Default)]
pub struct ChatState {
    question: String,
    transcript: Vec<Exchange>,
    in_flight: HashSet<ExchangeId>,
    pending_file: Option<PendingFile>,
    uploaded_file: Option<String>,
    notice: Option<Notice>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    pub fn exchange(&self, id: ExchangeId) -> Option<&Exchange> {
        self.transcript.iter().find(|e| e.id == id)
    }

    /// True while at least one submission awaits its response.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn pending_file(&self) -> Option<&PendingFile> {
        self.pending_file.as_ref()
    }

    pub fn uploaded_file(&self) -> Option<&str> {
        self.uploaded_file.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn view(&self) -> ChatView {
        ChatView {
            question: self.question.clone(),
            exchanges: self.transcript.clone(),
            loading: self.is_loading(),
            pending_file: self.pending_file.as_ref().map(|f| f.name.clone()),
            uploaded_file: self.uploaded_file.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    /// Remember the user's file choice. Replaces any earlier choice.
    pub fn select_file(&mut self, file: PendingFile) {
        self.pending_file = Some(file);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Upload
    // ─────────────────────────────────────────────────────────────────────────

    /// The file to upload, if one is selected.
    ///
    /// The selection is kept after the upload, so uploading twice sends the
    /// same file again.
    pub fn pending_upload(&self) -> Result<PendingFile, UploadFailure> {
        self.pending_file
            .clone()
            .ok_or(UploadFailure::NoFileSelected)
    }

    /// Apply the outcome of an upload attempt and queue the matching notice.
    ///
    /// Only a 2xx response carrying a filename replaces the stored reference.
    pub fn finish_upload(
        &mut self,
        result: Result<UploadResponse, UploadFailure>,
    ) -> Result<String, UploadFailure> {
        let outcome = result.and_then(|resp| {
            resp.filename
                .ok_or(UploadFailure::Api(ApiError::MissingField("filename")))
        });

        match &outcome {
            Ok(filename) => {
                self.uploaded_file = Some(filename.clone());
                self.notice = Some(Notice::info(UPLOAD_SUCCEEDED));
            }
            Err(UploadFailure::NoFileSelected) => {
                self.notice = Some(Notice::warning(NO_FILE_WARNING));
            }
            Err(UploadFailure::Api(_) | UploadFailure::Unreadable(_)) => {
                self.notice = Some(Notice::warning(UPLOAD_FAILED));
            }
        }
        outcome
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ask
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a new question with a placeholder answer.
    ///
    /// The text stays in the question input until the answer arrives.
    /// Returns `None` for blank input; nothing is recorded in that case.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingAsk> {
        if text.trim().is_empty() {
            return None;
        }

        self.question = text.to_string();
        let id = ExchangeId::new();
        self.transcript.push(Exchange {
            id,
            question: text.to_string(),
            answer: Answer::Pending,
        });
        self.in_flight.insert(id);

        Some(PendingAsk {
            id,
            request: AskRequest {
                text: text.to_string(),
                file: self.uploaded_file.clone(),
            },
        })
    }

    /// Apply the `/ask` outcome to the exchange created for it.
    ///
    /// Returns `false` when that exchange no longer exists (the transcript
    /// was cleared in the meantime); the outcome is dropped.
    pub fn complete_submit(
        &mut self,
        id: ExchangeId,
        result: Result<AskResponse, ApiError>,
    ) -> bool {
        self.in_flight.remove(&id);
        self.question.clear();

        let Some(exchange) = self.transcript.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        exchange.answer = match result {
            Ok(resp) => Answer::Received(resp.into_answer()),
            Err(_) => Answer::Failed,
        };
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clear
    // ─────────────────────────────────────────────────────────────────────────

    /// Drop every exchange. File state and in-flight tracking are untouched.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }
}
