/**
 * Snippet Types
 *
 * The stored snippet record and the field set of the create-snippet form.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::form::FormField;

/// Lifetimes a new snippet may be given, in days.
pub const PERMITTED_EXPIRY_DAYS: &[&str] = &["365", "7", "1"];

pub const TITLE_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetField {
    Title,
    Content,
    Expires,
}

impl FormField for SnippetField {
    const ALL: &'static [Self] = &[SnippetField::Title, SnippetField::Content, SnippetField::Expires];

    fn name(self) -> &'static str {
        match self {
            SnippetField::Title => "title",
            SnippetField::Content => "content",
            SnippetField::Expires => "expires",
        }
    }
}
