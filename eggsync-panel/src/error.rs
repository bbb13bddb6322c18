/// How much of an error response body is kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 200;

/// Errors from talking to the panel API.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Panel returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PanelError {
    /// Build an API error from a non-success response, truncating the body.
    pub fn api(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            body: body.chars().take(BODY_SNIPPET_LEN).collect(),
        }
    }
}
