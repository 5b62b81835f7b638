//! Authentication Module
//!
//! User accounts, sessions and the login flow.
//!
//! # Architecture
//!
//! - **`users`** - User model, password hashing and database operations
//! - **`sessions`** - Session layer and typed session access
//! - **`types`** - Signup and login form fields
//! - **`service`** - Signup, login, logout and the authenticated check
//! - **`handlers`** - HTTP handlers for the `/user/*` pages
//!
//! # Authentication Flow
//!
//! 1. **Signup**: form validated → password hashed with bcrypt → user stored → redirect to login
//! 2. **Login**: credentials checked → session id renewed → user id stored → CSRF token rotated
//! 3. **Logout**: user id removed → session id renewed → CSRF token rotated
//!
//! Failed logins never reveal whether the email is registered.

/// User data model and database operations
pub mod users;

/// Session layer and typed session access
pub mod sessions;

/// Signup and login form fields
pub mod types;

/// Authentication service
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use service::{current_user, is_authenticated, login, logout, signup, LoginOutcome, SignupOutcome};
pub use sessions::{session_layer, AppSession};
