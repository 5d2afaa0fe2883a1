use axum::http::StatusCode;
use thiserror::Error;

/// Terminal failures of a card request. Each kind maps to exactly one
/// rendered error card; none are retried.
///
/// Avatar fetch failures are deliberately not represented here: the card
/// still renders with a placeholder glyph, so they never reach the caller.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Missing GITHUB_TOKEN. Use /demo to preview or add a GitHub token.")]
    MissingToken,

    #[error("GitHub user not found.")]
    UserNotFound,

    /// Non-success transport status or an explicit `errors` payload from
    /// the GraphQL endpoint, carrying the upstream message for display.
    #[error("{0}")]
    Upstream(String),
}

impl CardError {
    pub fn status(&self) -> StatusCode {
        match self {
            CardError::MissingToken => StatusCode::INTERNAL_SERVER_ERROR,
            CardError::UserNotFound => StatusCode::NOT_FOUND,
            CardError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
