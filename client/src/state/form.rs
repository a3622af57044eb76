//! Registration form fields.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::fmt;

use crate::net::types::RegistrationInput;

/// One editable field of the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    DateOfBirth,
    PhoneNumber,
    Email,
    Password,
}

impl FormField {
    pub const ALL: [Self; 5] = [Self::FullName, Self::DateOfBirth, Self::PhoneNumber, Self::Email, Self::Password];

    /// Wire/form key for this field (e.g. `"full_name"`).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::DateOfBirth => "date_of_birth",
            Self::PhoneNumber => "phone_number",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Current contents of the registration form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::DateOfBirth => &mut self.date_of_birth,
            FormField::PhoneNumber => &mut self.phone_number,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        };
        *slot = value;
    }

    /// Snapshot the form as action input.
    #[must_use]
    pub fn to_input(&self) -> RegistrationInput {
        RegistrationInput {
            full_name: self.full_name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("RegistrationForm")
            .field("full_name", &self.full_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("phone_number", &self.phone_number)
            .field("email", &self.email)
            .field("password", &password)
            .finish()
    }
}
