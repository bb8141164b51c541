//! Chat Us
//!
//! A small web chat for asking questions about an uploaded document. The
//! server renders the page, keeps the transcript, and forwards uploads and
//! questions to a separate question-answering API.
//!
//! # Architecture
//!
//! - **Server**: Axum router serving the page and its form endpoints
//! - **Chat**: transcript state machine and the async driver around it
//! - **API client**: typed reqwest client for the remote `/upload` and `/ask`
//! - **UI**: server-rendered HTML, no client-side script required
//!
//! # Modules
//!
//! - [`api`]: remote question-answering API client
//! - [`chat`]: chat state and operations
//! - [`config`]: CLI, environment, and file configuration
//! - [`server`]: HTTP routes
//! - [`ui`]: HTML rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod chat;
pub mod config;
pub mod server;
pub mod ui;

use std::sync::Arc;

use crate::chat::ChatPage;
use crate::config::AppConfig;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single chat page.
    pub page: ChatPage,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
