use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Partners service error taxonomy.
///
/// `StateConflict` and `AlreadyProcessed` mean the caller's view is stale;
/// clients refresh instead of retrying. Only `TransientNetwork` is a
/// candidate for a manual retry.
#[derive(Debug, thiserror::Error)]
pub enum PartnersServiceError {
    /// Missing or malformed identity headers. The extractor rejects these
    /// requests with a bare 401 before any handler runs; the variant keeps
    /// the wire taxonomy complete for clients mapping `kind` strings.
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("invitation not found")]
    NotFound,
    #[error("invalid request data")]
    InvalidInput,
    #[error("conflicts with current connection state")]
    StateConflict,
    #[error("invitation already processed")]
    AlreadyProcessed,
    #[error("backing store unavailable or misconfigured")]
    NotConfigured,
    #[error("transient network error")]
    TransientNetwork,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PartnersServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidInput => "INVALID_INPUT",
            Self::StateConflict => "STATE_CONFLICT",
            Self::AlreadyProcessed => "ALREADY_PROCESSED",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::TransientNetwork => "TRANSIENT_NETWORK",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for PartnersServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::StateConflict | Self::AlreadyProcessed => StatusCode::CONFLICT,
            Self::NotConfigured | Self::TransientNetwork => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
