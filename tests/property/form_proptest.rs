//! Property-based tests for the form validation engine
//!
//! Uses proptest to generate random inputs and verify properties

use proptest::prelude::*;
use std::collections::HashMap;

use snippetbox::shared::form::{Form, FormField, BLANK_MESSAGE, EMAIL_PATTERN, INVALID_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Text,
    Choice,
}

impl FormField for Field {
    const ALL: &'static [Self] = &[Field::Text, Field::Choice];

    fn name(self) -> &'static str {
        match self {
            Field::Text => "text",
            Field::Choice => "choice",
        }
    }
}

fn form(text: &str, choice: &str) -> Form<Field> {
    let raw = HashMap::from([
        ("text".to_string(), text.to_string()),
        ("choice".to_string(), choice.to_string()),
    ]);
    Form::new(&raw)
}

proptest! {
    #[test]
    fn test_required_iff_blank(text in "\\PC*") {
        let mut form = form(&text, "");
        form.required(&[Field::Text]);

        let blank = text.trim().is_empty();
        prop_assert_eq!(form.valid(), !blank);
        if blank {
            prop_assert_eq!(form.errors(Field::Text), &[BLANK_MESSAGE.to_string()]);
        }
    }

    #[test]
    fn test_length_rules_count_characters(text in "\\PC{0,40}", limit in 0usize..40) {
        let chars = text.chars().count();

        let mut max = form(&text, "");
        max.max_length(Field::Text, limit);
        prop_assert_eq!(max.valid(), chars <= limit);

        let mut min = form(&text, "");
        min.min_length(Field::Text, limit);
        prop_assert_eq!(min.valid(), chars >= limit);
    }

    #[test]
    fn test_permitted_values(choice in "[0-9]{0,3}") {
        let allowed = ["365", "7", "1"];
        let mut form = form("", &choice);
        form.permitted_values(Field::Choice, &allowed);

        prop_assert_eq!(form.valid(), allowed.contains(&choice.as_str()));
        if !form.valid() {
            prop_assert_eq!(form.errors(Field::Choice), &[INVALID_MESSAGE.to_string()]);
        }
    }

    #[test]
    fn test_errors_accumulate_without_short_circuit(text in "\\PC{0,5}") {
        let mut form = form(&text, "");
        form.required(&[Field::Text]);
        form.min_length(Field::Text, 10);
        form.max_length(Field::Text, 2);

        let expected = usize::from(text.trim().is_empty())
            + usize::from(text.chars().count() < 10)
            + usize::from(text.chars().count() > 2);
        prop_assert_eq!(form.errors(Field::Text).len(), expected);
        prop_assert!(form.errors(Field::Choice).is_empty());
    }

    #[test]
    fn test_non_field_errors_never_affect_validity(message in "\\PC+") {
        let mut form = form("value", "");
        form.add_non_field_error(message.clone());

        prop_assert!(form.valid());
        prop_assert_eq!(form.non_field_errors(), &[message]);
    }

    #[test]
    fn test_well_formed_emails_match(
        local in "[a-z0-9._%+-]{1,20}",
        domain in "[a-z0-9]{1,20}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(EMAIL_PATTERN.is_match(&email), "{}", email);
    }

    #[test]
    fn test_addresses_without_at_never_match(text in "[a-z0-9.]{0,30}") {
        prop_assert!(!EMAIL_PATTERN.is_match(&text));
    }
}
