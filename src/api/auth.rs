// Session Gate
// Redirects unauthenticated requests for protected routes to the sign-in page

use std::collections::HashSet;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::AppState;

pub const SESSION_COOKIE: &str = "__session";

/// Decides whether a session token belongs to a signed-in user.
///
/// The identity provider lives outside this service; implementations wrap
/// whatever it exposes.
pub trait SessionVerifier: Send + Sync {
    /// The user id behind `token`, if the session is valid.
    fn verify(&self, token: &str) -> Option<String>;
}

/// Accepts a fixed set of tokens from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashSet<String>,
}

impl StaticTokenVerifier {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }
}

impl SessionVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Option<String> {
        self.tokens
            .contains(token)
            .then(|| format!("user_{}", token.chars().take(8).collect::<String>()))
    }
}

/// Parse a specific cookie from the Cookie header string.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|part| part.trim().strip_prefix(name))
        .find_map(|rest| rest.strip_prefix('='))
}

/// Session token from the `__session` cookie or an `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|cookies| parse_cookie(cookies, SESSION_COOKIE))
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

fn see_other(location: &str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())]).into_response()
}

pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.config.auth.enabled {
        return next.run(request).await;
    }

    let user = session_token(request.headers()).and_then(|t| state.verifier.verify(&t));
    match user {
        Some(user) => {
            debug!("[auth] {} -> {}", user, request.uri().path());
            next.run(request).await
        }
        None => {
            debug!("[auth] No session for {}, redirecting", request.uri().path());
            see_other(&state.config.auth.sign_in_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_cookie() {
        assert_eq!(parse_cookie("__session=abc; theme=dark", SESSION_COOKIE), Some("abc"));
        assert_eq!(parse_cookie("theme=dark; __session=xyz", SESSION_COOKIE), Some("xyz"));
        assert_eq!(parse_cookie("theme=dark", SESSION_COOKIE), None);
        assert_eq!(parse_cookie("__session_id=1", SESSION_COOKIE), None);
    }

    #[test]
    fn test_session_token_sources() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok-1"));
        assert_eq!(session_token(&headers).as_deref(), Some("tok-1"));

        headers.insert(header::COOKIE, HeaderValue::from_static("__session=tok-2"));
        assert_eq!(session_token(&headers).as_deref(), Some("tok-2"));

        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_static_verifier() {
        let verifier = StaticTokenVerifier::new(["sess_123456789", ""]);
        assert_eq!(verifier.verify("sess_123456789").as_deref(), Some("user_sess_123"));
        assert!(verifier.verify("").is_none());
        assert!(verifier.verify("other").is_none());
    }
}
