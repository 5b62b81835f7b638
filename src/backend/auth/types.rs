/**
 * Authentication Form Types
 *
 * The field sets of the signup and login forms.
 */

use crate::shared::form::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    Name,
    Email,
    Password,
}

impl FormField for SignupField {
    const ALL: &'static [Self] = &[SignupField::Name, SignupField::Email, SignupField::Password];

    fn name(self) -> &'static str {
        match self {
            SignupField::Name => "name",
            SignupField::Email => "email",
            SignupField::Password => "password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Email,
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[LoginField::Email, LoginField::Password];

    fn name(self) -> &'static str {
        match self {
            LoginField::Email => "email",
            LoginField::Password => "password",
        }
    }
}
