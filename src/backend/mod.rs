//! Backend Module
//!
//! All server-side code: an Axum HTTP server that renders HTML pages,
//! authenticates users with server-side sessions and guards every form
//! submission against cross-site request forgery.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route groups and the middleware chain
//! - **`middleware`** - CSRF guard, authentication gate, security headers
//! - **`auth`** - Users, sessions, signup/login/logout
//! - **`snippets`** - Snippet storage and pages
//! - **`views`** - HTML rendering
//! - **`error`** - `AppError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! ├── auth/           - Authentication
//! ├── snippets/       - Snippets
//! ├── views/          - HTML views
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the SQLite pool and the loaded
//! configuration. Per-visitor state lives in the session, reached through
//! the `AppSession` extractor.
//!
//! # Error Handling
//!
//! Handlers and middleware return `AppResult<T>`. `AppError` maps each
//! failure to a status code and logs server-side failures; internal details
//! never reach the response body.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Middleware for request processing
pub mod middleware;

/// Authentication and user management
pub mod auth;

/// Snippet storage and handlers
pub mod snippets;

/// HTML views
pub mod views;

/// Backend error types
pub mod error;

pub use error::{AppError, AppResult};
pub use server::{create_app, AppState, Config};
