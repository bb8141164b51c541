//! Chat page body.

use std::fmt::Write as _;

use super::{escape_html, render_nav_bar};
use crate::chat::{ChatView, Notice, NoticeLevel};

/// Shown when the transcript is empty.
pub const EMPTY_TRANSCRIPT: &str = "No messages yet. Start your conversation.";

/// Shown below the transcript while answers are outstanding.
pub const TYPING_INDICATOR: &str = "AI is typing ....";

/// Render the page body: header, notice, upload form, transcript, question form.
pub fn render_chat_page(view: &ChatView, notice: Option<&Notice>) -> String {
    let mut html = render_nav_bar();
    html.push('\n');

    if let Some(notice) = notice {
        html.push_str(&render_notice(notice));
    }
    html.push_str(&render_upload(view));
    html.push_str(&render_transcript(view));
    html.push_str(&render_question_form(view));
    html
}

fn render_notice(notice: &Notice) -> String {
    let class = match notice.level {
        NoticeLevel::Info => "notice notice_info",
        NoticeLevel::Warning => "notice notice_warning",
    };
    format!(
        "<div class=\"{class}\" role=\"alert\">{}</div>\n",
        escape_html(&notice.message)
    )
}

fn render_upload(view: &ChatView) -> String {
    let mut status = String::new();
    if let Some(name) = &view.pending_file {
        let _ = write!(
            status,
            "<span class=\"file_selected\">Selected: {}</span>",
            escape_html(name)
        );
    }
    if let Some(name) = &view.uploaded_file {
        let _ = write!(
            status,
            "<span class=\"file_uploaded\">Using: {}</span>",
            escape_html(name)
        );
    }

    format!(
        r#"<div class="upload_file">
    <form action="/upload" method="post" enctype="multipart/form-data">
        <input type="file" name="file">
        <button type="submit">Upload File</button>
    </form>
    {status}
</div>
"#
    )
}

fn render_transcript(view: &ChatView) -> String {
    let mut body = String::new();

    if view.exchanges.is_empty() {
        let _ = write!(body, "<div class=\"chat_st\">{EMPTY_TRANSCRIPT}</div>");
    } else {
        for exchange in &view.exchanges {
            let pending = if exchange.answer.is_pending() {
                " pending"
            } else {
                ""
            };
            let _ = write!(
                body,
                r#"<div class="exchange" id="exchange-{id}">
    <div class="chat_you">You: {question}</div>
    <div class="chat_ai{pending}">AI: {answer}</div>
</div>"#,
                id = exchange.id,
                question = escape_html(&exchange.question),
                answer = escape_html(exchange.answer.text()),
            );
        }
    }

    if view.loading {
        let _ = write!(body, "<div class=\"typing\">{TYPING_INDICATOR}</div>");
    }

    format!("<div class=\"conversion_box\" aria-live=\"polite\">\n{body}\n</div>\n")
}

fn render_question_form(view: &ChatView) -> String {
    let (disabled, label) = if view.loading {
        (" disabled", "Submitting...")
    } else {
        ("", "Submit")
    };

    format!(
        r#"<div class="chatbox">
    <form action="/ask" method="post">
        <input type="text" name="question" placeholder="Ask anything..." value="{question}" required>
        <button type="submit"{disabled}>{label}</button>
        <button type="submit" formaction="/clear" formnovalidate>Clear Chat</button>
    </form>
</div>
"#,
        question = escape_html(&view.question),
    )
}
