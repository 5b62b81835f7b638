/**
 * Application Error Types
 *
 * Every failure a request can run into is an `AppError`. Form validation
 * problems are not errors: handlers resolve them locally by re-rendering the
 * form. Everything here propagates to the single boundary in
 * `conversion.rs`, which maps the kind to a status code and a safe message.
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * - `Csrf` - missing or mismatched anti-forgery token (400)
 * - `NotFound` - unknown route, unknown or expired snippet (404)
 * - `Handler` - any other request problem with an explicit status
 *
 * ## Flow control
 *
 * - `AuthenticationRequired` - protected route without a session user;
 *   answered with a redirect to the login page, not an error page
 * - `DuplicateEmail` / `InvalidCredentials` - raised by the persistence and
 *   authentication layers, normally turned into form errors by the handler
 *
 * ## Server errors
 *
 * Session store, database, migration and password hashing failures. These
 * are logged and reported to the client as a bare 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request-level failure with an explicit status, e.g. an unreadable body.
    #[error("Handler error: {message}")]
    Handler {
        status: StatusCode,
        message: String,
    },

    #[error("CSRF token missing or mismatched")]
    Csrf,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Record not found")]
    NotFound,

    #[error("Email address is already in use")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Handler` - the status carried by the error
    /// - `Csrf` - 400 Bad Request
    /// - `AuthenticationRequired` - 303 See Other
    /// - `NotFound` - 404 Not Found
    /// - `DuplicateEmail`, `InvalidCredentials` - 422 Unprocessable Entity
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Handler { status, .. } => *status,
            Self::Csrf => StatusCode::BAD_REQUEST,
            Self::AuthenticationRequired => StatusCode::SEE_OTHER,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DuplicateEmail | Self::InvalidCredentials => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Session(_)
            | Self::Database(_)
            | Self::Migration(_)
            | Self::PasswordHash(_)
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message that may be shown to the client.
    ///
    /// Server-side failures never expose their cause; the detail only goes to
    /// the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Handler { message, .. } => message.clone(),
            Self::DuplicateEmail | Self::InvalidCredentials => self.to_string(),
            _ => self
                .status_code()
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
