//! Request and error types for the identity backend.

use serde::Serialize;

/// Role marker stored in the metadata of every self-registered identity.
pub const USER_ROLE: &str = "USER";

/// Errors produced by identity backend operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BackendError {
    /// The HTTP request to the service failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status. The message is the
    /// service's own and is shown to users as-is.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The service response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl BackendError {
    /// HTTP status the service answered with, when it answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityMetadata {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of an admin identity-creation request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewIdentity {
    pub email: String,
    pub password: String,
    /// Mark the identity as confirmed; no verification email is sent.
    pub email_confirm: bool,
    pub user_metadata: IdentityMetadata,
}

impl NewIdentity {
    /// A pre-confirmed identity carrying the self-registered user role.
    #[must_use]
    pub fn user(email: &str, password: &str) -> Self {
        Self {
            email: email.to_owned(),
            password: password.to_owned(),
            email_confirm: true,
            user_metadata: IdentityMetadata { kind: USER_ROLE.to_owned() },
        }
    }
}

impl std::fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("email_confirm", &self.email_confirm)
            .field("user_metadata", &self.user_metadata)
            .finish()
    }
}
