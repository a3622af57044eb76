//! Local validation for the registration form.
//!
//! Runs entirely client-side; a form that fails here never reaches the
//! registration action.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::LazyLock;

use regex::Regex;

use crate::state::{FormField, RegistrationForm};

pub const PASSWORD_MIN_LEN: usize = 6;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9+\-\s]+$").expect("phone pattern compiles"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A single failed rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Full name is required")]
    FullNameRequired,
    #[error("Date of birth is required")]
    DateOfBirthRequired,
    #[error("Phone number is required")]
    PhoneNumberRequired,
    #[error("Phone number may only contain digits, +, - and spaces")]
    PhoneNumberInvalid,
    #[error("Email is required")]
    EmailRequired,
    #[error("Enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("You must accept the terms and conditions")]
    TermsNotAccepted,
}

impl ValidationError {
    /// Form field the error belongs to; `None` for the terms checkbox.
    #[must_use]
    pub fn field(self) -> Option<FormField> {
        match self {
            Self::FullNameRequired => Some(FormField::FullName),
            Self::DateOfBirthRequired => Some(FormField::DateOfBirth),
            Self::PhoneNumberRequired | Self::PhoneNumberInvalid => Some(FormField::PhoneNumber),
            Self::EmailRequired | Self::EmailInvalid => Some(FormField::Email),
            Self::PasswordRequired | Self::PasswordTooShort => Some(FormField::Password),
            Self::TermsNotAccepted => None,
        }
    }
}

/// Every rule the form currently fails, at most one per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.0.iter().copied()
    }

    /// Error shown under `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: FormField) -> Option<ValidationError> {
        self.iter().find(|e| e.field() == Some(field))
    }

    #[must_use]
    pub fn terms(&self) -> Option<ValidationError> {
        self.iter().find(|e| e.field().is_none())
    }

    /// Drop the error for `field` once the user edits it.
    pub fn clear_field(&mut self, field: FormField) {
        self.0.retain(|e| e.field() != Some(field));
    }

    pub fn clear_terms(&mut self) {
        self.0.retain(|e| e.field().is_some());
    }
}

/// Check the form and the terms checkbox against every rule.
///
/// # Errors
///
/// Returns the collected failures when any rule fails.
pub fn validate(form: &RegistrationForm, terms_accepted: bool) -> Result<(), ValidationErrors> {
    let errors: Vec<ValidationError> = [
        check_full_name(&form.full_name),
        check_date_of_birth(&form.date_of_birth),
        check_phone_number(&form.phone_number),
        check_email(&form.email),
        check_password(&form.password),
        (!terms_accepted).then_some(ValidationError::TermsNotAccepted),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() { Ok(()) } else { Err(ValidationErrors(errors)) }
}

fn check_full_name(value: &str) -> Option<ValidationError> {
    value.trim().is_empty().then_some(ValidationError::FullNameRequired)
}

fn check_date_of_birth(value: &str) -> Option<ValidationError> {
    value.trim().is_empty().then_some(ValidationError::DateOfBirthRequired)
}

fn check_phone_number(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::PhoneNumberRequired)
    } else if !PHONE_RE.is_match(value) {
        Some(ValidationError::PhoneNumberInvalid)
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::EmailRequired)
    } else if !EMAIL_RE.is_match(value) {
        Some(ValidationError::EmailInvalid)
    } else {
        None
    }
}

fn check_password(value: &str) -> Option<ValidationError> {
    if value.is_empty() {
        Some(ValidationError::PasswordRequired)
    } else if value.chars().count() < PASSWORD_MIN_LEN {
        Some(ValidationError::PasswordTooShort)
    } else {
        None
    }
}
