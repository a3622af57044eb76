//! Registration route — HTTP face of the registration action.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use client::net::types::{RegisterFailure, RegistrationInput};

use crate::services::registration::{self, RegistrationError};
use crate::state::AppState;

pub(crate) fn registration_error_to_status(err: &RegistrationError) -> StatusCode {
    match err {
        RegistrationError::IdentityCreationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistrationError::MissingIdentityId | RegistrationError::ProfileInsertFailed(_) => StatusCode::BAD_GATEWAY,
    }
}

fn failure(status: StatusCode, error: String) -> Response {
    (status, Json(RegisterFailure { error })).into_response()
}

/// `POST /api/register` — create an identity and its profile row.
///
/// Payloads missing any field are rejected before the action runs.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationInput>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "registration payload rejected");
            return failure(rejection.status(), rejection.body_text());
        }
    };

    match registration::register(state.backend.as_ref(), &input, state.orphan_policy).await {
        Ok(success) => (StatusCode::OK, Json(success)).into_response(),
        Err(e) => failure(registration_error_to_status(&e), e.to_string()),
    }
}

#[cfg(test)]
#[path = "register_test.rs"]
mod tests;
