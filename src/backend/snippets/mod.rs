//! Snippets Module
//!
//! Storage and pages for text snippets.
//!
//! - **`types`** - Snippet record and create-form fields
//! - **`db`** - Snippet database operations
//! - **`handlers`** - Home, view and create handlers

pub mod types;
pub mod db;
pub mod handlers;

pub use handlers::{create_snippet, create_snippet_form, home, show_snippet};
pub use types::{Snippet, SnippetField};
