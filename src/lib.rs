//! Snippetbox - Main Library
//!
//! A server-rendered application for sharing text snippets. Visitors browse
//! and view snippets; registered users log in and create new ones.
//!
//! # Module Structure
//!
//! - **`shared`** - Code independent of the HTTP server
//!   - The generic form validation engine
//!
//! - **`backend`** - The Axum server
//!   - Session-backed authentication (signup, login, logout)
//!   - CSRF protection for every state-changing request
//!   - Snippet storage in SQLite and HTML pages
//!
//! # Usage
//!
//! ```rust,no_run
//! use snippetbox::backend::server::{create_app, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
