//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Environment configuration and database loading
//! └── init.rs   - Server initialization and app creation
//! ```

pub mod state;

pub mod config;

pub mod init;

pub use config::{Config, ConfigError};
pub use init::create_app;
pub use state::AppState;
