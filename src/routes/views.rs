//! Server-rendered admin pages. Each page is the same SPA shell; the client
//! bundle reads `data-page` (and `data-id` on edit pages) to pick its screen.

use axum::{
    extract::{Path, State},
    response::Html,
    routing::{get, MethodRouter},
};

use crate::AppState;

/// Page name to URL path, in the order the admin menu lists them.
pub const PAGES: &[(&str, &str)] = &[
    ("/", "welcome"),
    ("/dashboard", "welcome"),
    ("/privacy", "privacy"),
    ("/claim-reward", "claim-reward"),
    ("/referral-reward", "referral-reward"),
    ("/contents", "contents"),
    ("/contents/new", "new"),
    ("/devices", "devices"),
    ("/livesports", "live-sport"),
    ("/suggestions", "suggestion"),
    ("/sport", "sports"),
    ("/announces", "announces"),
];

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Render the shell for `page`.
pub fn render_shell(title: &str, page: &str, id: Option<&str>) -> String {
    let id_attr = id
        .map(|id| format!(" data-id=\"{}\"", escape_html(id)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <link rel="preconnect" href="https://fonts.bunny.net">
        <title>{title}</title>
        <link rel="stylesheet" href="/assets/style.css">
    </head>
    <body>
        <div id="root" data-page="{page}"{id_attr}></div>
        <script src="/assets/scripts.js"></script>
    </body>
</html>
"#,
        title = escape_html(title),
        page = escape_html(page),
    )
}

/// GET handler serving the shell for a fixed page.
pub fn page(name: &'static str) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>| async move {
        Html(render_shell(&state.config.app_title, name, None))
    })
}

/// GET /contents/edit/{id}
pub async fn content_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Html<String> {
    Html(render_shell(&state.config.app_title, "content-edit", Some(&id)))
}
