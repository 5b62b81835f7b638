//! Route Configuration Module
//!
//! This module configures all HTTP routes for the server. Routes are grouped
//! by area into focused submodules; `router` assembles them and installs the
//! middleware chain.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs             - Module exports and shared paths
//! ├── router.rs          - Router assembly and middleware order
//! ├── site_routes.rs     - Home, about and liveness routes
//! ├── user_routes.rs     - Signup, login and logout
//! └── snippet_routes.rs  - Viewing and creating snippets
//! ```
//!
//! # Routes
//!
//! | Method | Path              | Access        |
//! |--------|-------------------|---------------|
//! | GET    | `/`               | public        |
//! | GET    | `/about`          | public        |
//! | GET    | `/ping`           | public        |
//! | GET    | `/snippet/{id}`   | public        |
//! | GET    | `/user/signup`    | public        |
//! | POST   | `/user/signup`    | public        |
//! | GET    | `/user/login`     | public        |
//! | POST   | `/user/login`     | public        |
//! | POST   | `/user/logout`    | authenticated |
//! | GET    | `/snippet/create` | authenticated |
//! | POST   | `/snippet/create` | authenticated |
//!
//! Every POST additionally passes the CSRF guard. Unknown paths are 404.

/// Main router creation
pub mod router;

/// Home, about and ping
pub mod site_routes;

/// Signup, login and logout
pub mod user_routes;

/// Snippet view and creation
pub mod snippet_routes;

/// Where anonymous visitors of protected pages are sent.
pub const LOGIN_PATH: &str = "/user/login";

pub use router::create_router;
