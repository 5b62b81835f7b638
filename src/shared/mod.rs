//! Shared Module
//!
//! Building blocks that are independent of the HTTP server: the generic form
//! validation engine used by every form the application accepts.

/// Form validation engine
pub mod form;

pub use form::{Form, FormField, EMAIL_PATTERN};
