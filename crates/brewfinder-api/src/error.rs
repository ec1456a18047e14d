use thiserror::Error;

/// Top-level error type for the `brewfinder-api` crate.
///
/// Covers every failure mode across the request pipeline: URL resolution,
/// the HTTP round trip, protocol-level rejections, and payload decoding.
/// Callers (the UI layer) map these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing or base-URL resolution error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value could not be encoded onto the wire.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The server answered with a non-success status. Carries the status
    /// code and the raw response body for diagnosis.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The HTTP status code behind this error, if one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the call for auth reasons
    /// (missing, expired, or invalid token).
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
