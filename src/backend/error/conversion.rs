/**
 * Error Conversion
 *
 * `AppError` implements `IntoResponse`, so handlers and middleware can return
 * it directly. This is the single boundary where error kinds become HTTP
 * responses.
 *
 * # Response Format
 *
 * - `AuthenticationRequired` becomes a `303 See Other` to `/user/login`
 * - every other error becomes a plain-text body holding the public message
 * - server errors are logged here with their full cause
 */

use axum::{
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use crate::backend::error::types::AppError;
use crate::backend::routes::LOGIN_PATH;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::AuthenticationRequired = self {
            return Redirect::to(LOGIN_PATH).into_response();
        }

        let status = self.status_code();
        if self.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}
