//! Authentication Handlers Module
//!
//! HTTP handlers for the `/user/*` pages. The handlers only translate between
//! HTTP and [`crate::backend::auth::service`]; they render the form views and
//! set flash messages.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── signup.rs   - GET/POST /user/signup
//! ├── login.rs    - GET/POST /user/login
//! └── logout.rs   - POST /user/logout
//! ```

/// Signup handlers
pub mod signup;

/// Login handlers
pub mod login;

/// Logout handler
pub mod logout;

pub use login::{login, login_form};
pub use logout::logout;
pub use signup::{signup, signup_form};
pub use crate::backend::auth::types::{LoginField, SignupField};
