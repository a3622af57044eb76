//! Shared wire DTOs for the registration boundary.
//!
//! DESIGN
//! ======
//! The server deserializes [`RegistrationInput`] straight off the request
//! body, so every field is required there: a payload missing one is
//! rejected before the action runs. Replies are either a success carrying
//! the created identity or a failure carrying a human-readable message.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message returned by the action on a completed registration.
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful";

/// Form snapshot sent to the registration action.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInput {
    pub full_name: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("full_name", &self.full_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("phone_number", &self.phone_number)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A credentialed account as reported by the identity service.
///
/// Only `id` and `email` are typed; everything else the service returns
/// (metadata, timestamps, confirmation state) is kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Identity {
    /// Identity id, treating an empty string the same as a missing one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Profile row persisted for a registered person. Never carries a password.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub id: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub email: String,
    /// Columns the table adds on insert (e.g. `created_at`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileDetails {
    /// Build the profile row for `input`, keyed by the new identity id.
    #[must_use]
    pub fn from_input(id: &str, input: &RegistrationInput) -> Self {
        Self {
            id: id.to_owned(),
            full_name: input.full_name.clone(),
            date_of_birth: input.date_of_birth.clone(),
            phone_number: input.phone_number.clone(),
            email: input.email.clone(),
            extra: Map::new(),
        }
    }
}

/// Successful action reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterSuccess {
    pub message: String,
    pub user: Identity,
    /// Profile row as echoed back by the insert, when the store returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileDetails>,
}

/// Failed action reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFailure {
    pub error: String,
}

/// Either shape of the action's reply body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegisterReply {
    Success(RegisterSuccess),
    Failure(RegisterFailure),
}
