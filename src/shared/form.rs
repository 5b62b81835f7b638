//! Form Validation Engine
//!
//! A submitted HTML form is held as a [`Form`]: the raw string value of every
//! field the form declares, plus an accumulating list of error messages per
//! field. Each rule appends to the error list and never short-circuits, so a
//! single round-trip surfaces every problem with a submission.
//!
//! The set of fields a form accepts is declared statically through the
//! [`FormField`] trait, usually implemented by a small enum:
//!
//! ```rust
//! use snippetbox::shared::form::{Form, FormField};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum NoteField { Title }
//!
//! impl FormField for NoteField {
//!     const ALL: &'static [Self] = &[NoteField::Title];
//!     fn name(self) -> &'static str { "title" }
//! }
//!
//! let raw = HashMap::from([("title".to_string(), "  ".to_string())]);
//! let mut form = Form::<NoteField>::new(&raw);
//! form.required(&[NoteField::Title]);
//! assert!(!form.valid());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub const BLANK_MESSAGE: &str = "This field cannot be blank";
pub const INVALID_MESSAGE: &str = "This field is invalid";

/// Local part, `@`, then at least two dot-separated domain labels.
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// The fixed set of fields a particular form accepts.
pub trait FormField: Copy + Eq + Hash + Debug + 'static {
    /// Every field of the form, in display order.
    const ALL: &'static [Self];

    /// The `name` attribute the field is posted under.
    fn name(self) -> &'static str;
}

/// A posted form: declared field values plus per-field validation errors.
#[derive(Debug, Clone)]
pub struct Form<F: FormField> {
    values: HashMap<F, String>,
    errors: HashMap<F, Vec<String>>,
    non_field_errors: Vec<String>,
}

impl<F: FormField> Form<F> {
    /// Build a form from raw posted pairs.
    ///
    /// Only the fields in [`FormField::ALL`] are kept; a declared field that was
    /// not posted reads as the empty string.
    pub fn new(raw: &HashMap<String, String>) -> Self {
        let values = F::ALL
            .iter()
            .map(|field| {
                let value = raw.get(field.name()).cloned().unwrap_or_default();
                (*field, value)
            })
            .collect();

        Self {
            values,
            errors: HashMap::new(),
            non_field_errors: Vec::new(),
        }
    }

    /// An empty form, as rendered on the first GET of a page.
    pub fn empty() -> Self {
        Self::new(&HashMap::new())
    }

    pub fn get(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Append an error message to `field`.
    pub fn add_error(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// Record an error that belongs to the submission as a whole.
    pub fn add_non_field_error(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    pub fn errors(&self, field: F) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field_errors(&self) -> &[String] {
        &self.non_field_errors
    }

    /// Every named field must contain something other than whitespace.
    pub fn required(&mut self, fields: &[F]) {
        for &field in fields {
            if self.get(field).trim().is_empty() {
                self.add_error(field, BLANK_MESSAGE);
            }
        }
    }

    /// The value must not exceed `max` characters.
    pub fn max_length(&mut self, field: F, max: usize) {
        if self.get(field).chars().count() > max {
            self.add_error(
                field,
                format!("This field is too long (maximum is {} characters)", max),
            );
        }
    }

    /// The value must contain at least `min` characters.
    pub fn min_length(&mut self, field: F, min: usize) {
        if self.get(field).chars().count() < min {
            self.add_error(
                field,
                format!("This field is too short (minimum is {} characters)", min),
            );
        }
    }

    /// A non-empty value must match `pattern`. Blank values are left to
    /// [`Form::required`].
    pub fn matches_pattern(&mut self, field: F, pattern: &Regex) {
        let value = self.get(field);
        if !value.is_empty() && !pattern.is_match(value) {
            self.add_error(field, INVALID_MESSAGE);
        }
    }

    /// The value must be exactly one of `allowed`.
    pub fn permitted_values(&mut self, field: F, allowed: &[&str]) {
        if !allowed.contains(&self.get(field)) {
            self.add_error(field, INVALID_MESSAGE);
        }
    }

    /// True iff no field has collected an error.
    pub fn valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }
}
