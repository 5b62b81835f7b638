/**
 * CSRF Guard
 *
 * Every session carries one anti-forgery token. Pages that render a form
 * embed the token in a hidden `csrf_token` field; state-changing requests
 * (POST, PUT, PATCH, DELETE) must post it back unchanged.
 *
 * - Tokens are 32 bytes from the thread-local CSPRNG, URL-safe base64 encoded.
 * - A token is issued lazily by `token_for`, i.e. on the GET that renders the
 *   first form of a brand-new session.
 * - Login and logout rotate the token so a pre-authentication token cannot
 *   be replayed.
 * - Comparison is constant-time.
 *
 * The middleware buffers the urlencoded body to read the token and hands the
 * same bytes on to the handler, which never runs when verification fails.
 */

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::backend::auth::sessions::AppSession;
use crate::backend::error::{AppError, AppResult};

pub const CSRF_FIELD_NAME: &str = "csrf_token";
pub const TOKEN_BYTES: usize = 32;
pub const MAX_FORM_BYTES: usize = 1024 * 1024;

#[derive(Debug, Deserialize)]
struct CsrfSubmission {
    csrf_token: Option<String>,
}

pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The session's current token, issuing one if the session has none yet.
pub async fn token_for(session: &AppSession) -> AppResult<String> {
    if let Some(token) = session.csrf_token().await? {
        return Ok(token);
    }
    rotate_token(session).await
}

/// Replace the session's token with a fresh one.
pub async fn rotate_token(session: &AppSession) -> AppResult<String> {
    let token = generate_token();
    session.set_csrf_token(&token).await?;
    Ok(token)
}

/// Check a submitted token against the session's token.
///
/// A session without a token never verifies, whatever was submitted.
pub async fn verify(session: &AppSession, submitted: Option<&str>) -> AppResult<bool> {
    let (Some(expected), Some(submitted)) = (session.csrf_token().await?, submitted) else {
        return Ok(false);
    };
    Ok(tokens_match(submitted, &expected))
}

fn tokens_match(submitted: &str, expected: &str) -> bool {
    if submitted.len() != expected.len() {
        return false;
    }
    submitted.as_bytes().ct_eq(expected.as_bytes()).into()
}

pub fn requires_verification(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Reject unsafe requests whose posted `csrf_token` does not match the session.
pub async fn csrf_guard(session: AppSession, request: Request, next: Next) -> AppResult<Response> {
    if !requires_verification(request.method()) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES).await.map_err(|e| {
        tracing::warn!("Unreadable form body on {}: {}", parts.uri.path(), e);
        AppError::handler(StatusCode::PAYLOAD_TOO_LARGE, "Form body too large")
    })?;

    let submitted = serde_urlencoded::from_bytes::<CsrfSubmission>(&bytes)
        .ok()
        .and_then(|submission| submission.csrf_token);

    if !verify(&session, submitted.as_deref()).await? {
        tracing::warn!(
            method = %parts.method,
            path = %parts.uri.path(),
            "CSRF token missing or mismatched"
        );
        return Err(AppError::Csrf);
    }

    tracing::debug!("CSRF token verified for {} {}", parts.method, parts.uri.path());
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
