/**
 * Authentication Middleware
 *
 * Two layers cooperate:
 *
 * - `authenticate` runs for every request. It resolves the session's user
 *   through `auth::service::current_user` and attaches `AuthenticatedUser`
 *   to the request extensions.
 * - `require_authentication` guards protected routes. Without an
 *   `AuthenticatedUser` it answers with a redirect to the login page,
 *   remembering the requested page for GETs; otherwise the response is
 *   marked `Cache-Control: no-store`.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use std::convert::Infallible;
use uuid::Uuid;

use crate::backend::auth::sessions::AppSession;
use crate::backend::auth::service::current_user;
use crate::backend::error::{AppError, AppResult};

/// The logged-in user, attached to request extensions by `authenticate`.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

/// Resolve the session's user id and attach the user to the request.
pub async fn authenticate(
    State(pool): State<SqlitePool>,
    session: AppSession,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    if let Some(user) = current_user(&pool, &session).await? {
        request.extensions_mut().insert(AuthenticatedUser {
            user_id: user.id,
            name: user.name,
            email: user.email,
        });
    }

    Ok(next.run(request).await)
}

/// Redirect anonymous visitors of protected routes to the login page.
pub async fn require_authentication(
    session: AppSession,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    if extract_authenticated_user(&request).is_none() {
        if request.method() == Method::GET {
            session
                .set_redirect_after_login(request.uri().path())
                .await?;
        }
        tracing::debug!("Anonymous request to protected route {}", request.uri().path());
        return Err(AppError::AuthenticationRequired);
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

pub fn extract_authenticated_user(request: &Request) -> Option<AuthenticatedUser> {
    request.extensions().get::<AuthenticatedUser>().cloned()
}

/// Axum extractor for the optional logged-in user.
#[derive(Clone, Debug, Default)]
pub struct CurrentUser(pub Option<AuthenticatedUser>);

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}
