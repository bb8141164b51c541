//! Client for the remote question-answering service.
//!
//! The service exposes two endpoints under a configured base URL:
//!
//! - `POST {apiBase}/upload`: multipart upload, answers `{"filename": ...}`
//! - `POST {apiBase}/ask`: JSON `{"text": ..., "file": ...}`, answers `{"answer": ...}`
//!
//! # Modules
//!
//! - [`client`]: the [`QaApi`] trait and its reqwest implementation
//! - [`error`]: [`ApiError`]
//! - [`types`]: request and response bodies

pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpQaApi, QaApi, parse_base_url};
pub use error::ApiError;
pub use types::{AskRequest, AskResponse, NO_RESPONSE_ANSWER, PendingFile, UploadResponse};
