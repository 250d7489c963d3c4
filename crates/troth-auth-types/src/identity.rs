//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

/// User identity injected by the gateway via `x-troth-user-id` and
/// `x-troth-user-email` headers.
///
/// Returns 401 if either header is absent or `x-troth-user-id` cannot be
/// parsed as UUID. Email is required because invitation addressing is by
/// email, not user id.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_email: String,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get("x-troth-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_email = parts
            .headers
            .get("x-troth-user-email")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase());

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let user_email = user_email.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id,
                user_email,
            })
        }
    }
}
