//! Server-rendered HTML.
//!
//! Pages are plain HTML with ordinary forms, so the chat works without any
//! client-side script.
//!
//! # Structure
//!
//! - [`shell`]: document skeleton shared by all pages
//! - [`nav_bar`]: static site header
//! - [`chat_page`]: upload form, transcript, and question form

pub mod chat_page;
pub mod nav_bar;
pub mod shell;

pub use chat_page::render_chat_page;
pub use nav_bar::render_nav_bar;
pub use shell::html_shell;

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
