//! Middleware Module
//!
//! Request processing that runs before route handlers.
//!
//! - **`csrf`** - anti-forgery token issuance and verification
//! - **`auth`** - session user resolution and the login-required gate
//! - **`headers`** - security response headers
//!
//! The order in which these are layered is fixed in
//! `routes::router::create_router`.

pub mod auth;
pub mod csrf;
pub mod headers;

pub use auth::{authenticate, require_authentication, AuthenticatedUser, CurrentUser};
pub use csrf::csrf_guard;
pub use headers::SecureHeaders;
