//! Chat page logic.
//!
//! # Architecture
//!
//! - [`ChatState`]: plain state with one update function per user action
//!   or network completion
//! - [`ChatPage`]: shares the state between request handlers and runs the
//!   upstream calls, applying their results through [`ChatState`]
//!
//! # Example
//!
//! ```rust
//! use chat_us::chat::ChatState;
//!
//! let mut state = ChatState::new();
//! let pending = state.begin_submit("What is this about?").unwrap();
//! assert!(state.is_loading());
//!
//! state.complete_submit(pending.id, Ok(Default::default()));
//! assert_eq!(state.transcript()[0].answer.text(), "No response received");
//! ```

mod page;
mod state;

pub use page::{ChatPage, Submission};
pub use state::{
    Answer, ChatState, ChatView, ERROR_ANSWER, Exchange, ExchangeId, NO_FILE_WARNING, Notice,
    NoticeLevel, PENDING_ANSWER, PendingAsk, UPLOAD_FAILED, UPLOAD_SUCCEEDED, UploadFailure,
};
