use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::models::UserIdentitySnapshot;
use crate::error::ApiError;
use crate::state::AppState;

/// Identity recovered from the bearer token.
///
/// A point-in-time snapshot: only `id` should be trusted for lookups.
#[derive(Clone, Debug)]
pub struct AuthUser(pub UserIdentitySnapshot);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

/// Bearer token middleware that authenticates the request and injects [`AuthUser`]
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = authorization_header(request.headers());

    let snapshot: UserIdentitySnapshot = state.envelope.authenticate(header).map_err(|failure| {
        tracing::debug!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            failure.code()
        );
        ApiError::from(failure)
    })?;

    tracing::debug!("Authenticated user id={}", snapshot.id);
    request.extensions_mut().insert(AuthUser(snapshot));

    Ok(next.run(request).await)
}

/// Raw `Authorization` value; absent or non-UTF-8 headers read as empty.
fn authorization_header(headers: &HeaderMap) -> &str {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_reads_as_empty() {
        assert_eq!(authorization_header(&HeaderMap::new()), "");
    }

    #[test]
    fn header_value_is_passed_through_untrimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(authorization_header(&headers), "Bearer abc");
    }
}
