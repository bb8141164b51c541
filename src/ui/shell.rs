//! Document skeleton.

use super::escape_html;

/// Wrap page content in the full HTML document.
///
/// `auto_refresh` adds a one-second meta refresh; the chat page sets it while
/// answers are outstanding so they appear without client-side script.
pub fn html_shell(title: &str, content: &str, auto_refresh: bool) -> String {
    let title = escape_html(title);
    let refresh = if auto_refresh {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Ask questions about your documents">
    {refresh}
    <title>{title}</title>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
{content}
</body>
</html>"#
    )
}
