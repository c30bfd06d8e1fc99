//! HTML rendering of the viewer state.

use quick_xml::escape::escape;

use super::ViewState;

const PAGE_CSS: &str = "
body { margin: 0; font-family: system-ui, sans-serif; background: #fffaf0; }
main { max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
form { display: flex; gap: .5rem; margin-bottom: 1rem; }
form input { flex: 1; padding: .4rem; }
.kolam-viewer { width: 100%; aspect-ratio: 1; display: flex; align-items: center; justify-content: center; }
.kolam-viewer svg { width: 100%; height: 100%; }
.spinner { width: 3rem; height: 3rem; border: .3rem solid #e0d6c2; border-top-color: #b5562b; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
";

/// Render the viewer container for `state`.
///
/// - `Loading`: a spinner
/// - `Ready`: the markup, embedded as is
/// - `Empty`: an empty container
pub fn fragment(state: &ViewState) -> String {
    match state {
        ViewState::Loading => {
            r#"<div class="kolam-viewer" aria-busy="true"><div class="spinner"></div></div>"#
                .to_string()
        }
        ViewState::Ready(markup) => format!(r#"<div class="kolam-viewer">{markup}</div>"#),
        ViewState::Empty => r#"<div class="kolam-viewer"></div>"#.to_string(),
    }
}

/// Wrap `body` in a standalone HTML document.
///
/// With `refresh`, the page reloads itself after that many seconds.
pub fn page(title: &str, body: &str, refresh: Option<u32>) -> String {
    let title = escape(title);
    let refresh = refresh
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{secs}">"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}<title>{title}</title>
<style>{PAGE_CSS}</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#
    )
}

/// The source form shown above the viewer.
pub fn source_form(src: Option<&str>) -> String {
    let value = escape(src.unwrap_or_default());
    format!(
        r#"<form action="/preview" method="get"><input name="src" value="{value}" placeholder="kolam URL or path"><button type="submit">Show</button></form>"#
    )
}
