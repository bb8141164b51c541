//! Site header.

/// Header title.
pub const TITLE: &str = "Chat Us";

/// Navigation entries, in display order.
pub const NAV_ITEMS: [&str; 3] = ["Home", "About", "Contact Us"];

/// Render the header: title plus the fixed navigation list.
pub fn render_nav_bar() -> String {
    let items: String = NAV_ITEMS
        .iter()
        .map(|item| format!("<li>{item}</li>"))
        .collect();

    format!(
        r#"<nav class="navbar">
    <div class="title"><h1>{TITLE}</h1></div>
    <div class="list"><ul>{items}</ul></div>
</nav>"#
    )
}
