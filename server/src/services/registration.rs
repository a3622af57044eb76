//! Registration action.
//!
//! Creates a pre-confirmed identity with the hosted service, then writes the
//! person's profile row keyed by the new identity id.
//!
//! ERROR HANDLING
//! ==============
//! Each failing step maps to one [`RegistrationError`] variant carrying the
//! message users will see. A failed profile insert leaves an identity with
//! no profile behind; [`OrphanPolicy`] decides whether that identity is
//! deleted again or kept for reconciliation. The insert error is returned
//! either way.
//!
//! A success response that does not decode is treated by what the service
//! has already done: an undecodable created identity is an inconsistent
//! response ([`RegistrationError::MissingIdentityId`]), and an undecodable
//! insert echo means the row was written without an echoed profile.

use std::str::FromStr;

use client::net::types::{ProfileDetails, REGISTRATION_SUCCESS_MESSAGE, RegisterSuccess, RegistrationInput};

use crate::backend::{BackendError, IdentityBackend, NewIdentity};

/// What to do with an identity whose profile insert failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Delete the identity again (best effort).
    #[default]
    Delete,
    /// Leave it and log it for reconciliation.
    Keep,
}

impl FromStr for OrphanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(Self::Delete),
            "keep" => Ok(Self::Keep),
            other => Err(format!("unknown orphan policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{0}")]
    IdentityCreationFailed(String),
    #[error("User ID not returned from authentication system.")]
    MissingIdentityId,
    #[error("{0}")]
    ProfileInsertFailed(String),
}

/// Register one person.
///
/// Creates at most one identity and at most one profile row.
///
/// # Errors
///
/// See [`RegistrationError`].
pub async fn register(
    backend: &dyn IdentityBackend,
    input: &RegistrationInput,
    orphans: OrphanPolicy,
) -> Result<RegisterSuccess, RegistrationError> {
    let request = NewIdentity::user(&input.email, &input.password);
    let identity = match backend.create_identity(&request).await {
        Ok(identity) => identity,
        Err(BackendError::Parse(e)) => {
            tracing::error!(email = %input.email, error = %e, "identity created but response undecodable");
            return Err(RegistrationError::MissingIdentityId);
        }
        Err(e) => {
            tracing::error!(email = %input.email, status = ?e.status(), error = %e, "identity creation failed");
            return Err(RegistrationError::IdentityCreationFailed(e.to_string()));
        }
    };

    let Some(user_id) = identity.id().map(str::to_owned) else {
        tracing::error!(email = %input.email, "identity created without an id");
        return Err(RegistrationError::MissingIdentityId);
    };
    tracing::info!(%user_id, email = %input.email, "identity created");

    let profile = ProfileDetails::from_input(&user_id, input);
    let rows = match backend.insert_profile(&profile).await {
        Ok(rows) => rows,
        Err(BackendError::Parse(e)) => {
            tracing::warn!(%user_id, error = %e, "profile inserted but echo undecodable");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(%user_id, status = ?e.status(), error = %e, "profile insert failed");
            handle_orphan(backend, &user_id, orphans).await;
            return Err(RegistrationError::ProfileInsertFailed(e.to_string()));
        }
    };
    tracing::info!(%user_id, rows = rows.len(), "profile inserted");

    Ok(RegisterSuccess {
        message: REGISTRATION_SUCCESS_MESSAGE.to_owned(),
        user: identity,
        profile: rows.into_iter().next(),
    })
}

async fn handle_orphan(backend: &dyn IdentityBackend, user_id: &str, orphans: OrphanPolicy) {
    match orphans {
        OrphanPolicy::Keep => {
            tracing::warn!(%user_id, "identity left without profile; needs reconciliation");
        }
        OrphanPolicy::Delete => match backend.delete_identity(user_id).await {
            Ok(()) => tracing::info!(%user_id, "orphaned identity deleted"),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "orphaned identity delete failed; needs reconciliation");
            }
        },
    }
}

#[cfg(test)]
#[path = "registration_test.rs"]
mod tests;
