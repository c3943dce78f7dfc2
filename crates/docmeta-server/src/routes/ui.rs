//! Single-page upload UI.

use axum::{extract::State, response::Html};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Render the upload page with the configured formats and limits.
pub fn render_index(
    extensions: &[&str],
    max_file_size_mb: u64,
    summaries_enabled: bool,
) -> String {
    let formats = extensions
        .iter()
        .map(|ext| ext.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ");
    let accept = extensions
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");
    let summaries = if summaries_enabled {
        "AI summary enabled"
    } else {
        "AI summary disabled"
    };

    INDEX_HTML
        .replace("{{FORMATS}}", &formats)
        .replace("{{ACCEPT}}", &accept)
        .replace("{{MAX_SIZE_MB}}", &max_file_size_mb.to_string())
        .replace("{{SUMMARIES}}", summaries)
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(
        state.processor().supported_extensions(),
        state.config().upload.max_file_size_mb,
        state.processor().has_summarizer(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_fills_placeholders() {
        let html = render_index(&["pdf", "docx"], 300, false);
        assert!(!html.contains("{{"));
        assert!(html.contains("300 MB"));
        assert!(html.contains("Supported formats: PDF, DOCX."));
        assert!(html.contains("accept=\".pdf,.docx\""));
        assert!(!html.contains(".png"));
        assert!(html.contains("AI summary disabled"));
    }
}
