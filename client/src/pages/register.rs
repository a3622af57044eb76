//! Registration page controller.
//!
//! DESIGN
//! ======
//! The page binds form inputs to the store, validates locally, and runs a
//! single-flight submit. A submit is split into [`RegistrationPage::begin_submit`]
//! and [`RegistrationPage::complete_submit`] so a UI that spawns the action
//! call as a background task can release the page between the two; the
//! pending flag refuses a second submit until the first completes.
//! [`RegistrationPage::submit`] composes both halves for callers that simply
//! await. Edits are refused while a submit is pending, so nothing typed
//! during the round trip is lost when the reply resets the form.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures never reach the action. Failure replies from the
//! action are shown verbatim; transport faults get a generic message. In
//! every failure case the session is left untouched.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use super::validation::{ValidationErrors, validate};
use crate::net::api::{ActionFault, RegisterAction};
use crate::net::types::{RegisterReply, RegistrationInput};
use crate::state::{FormField, Severity, Store};

pub const FIX_ERRORS_MESSAGE: &str = "Please fix the errors in the form";
pub const REGISTERED_MESSAGE: &str = "Registration successful!";
pub const UNEXPECTED_FAULT_MESSAGE: &str = "Something went wrong. Please try again.";

/// What happens to the form after a successful registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormResetPolicy {
    /// Empty every field.
    #[default]
    ClearForm,
    /// Keep the entered details; only the password is cleared.
    KeepDetails,
}

/// Result of one submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; the action was not called.
    Invalid,
    /// A submit is already pending; this one was dropped.
    Busy,
    /// The action created the account and the session was committed.
    Registered,
    /// The action failed or could not be reached; carries the shown message.
    Failed(String),
}

/// Transient state of one registration form instance.
#[derive(Debug, Default)]
pub struct RegistrationPage {
    terms_accepted: bool,
    errors: ValidationErrors,
    pending: bool,
    reset_policy: FormResetPolicy,
}

impl RegistrationPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reset_policy(mut self, policy: FormResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Whether a submit is in flight (drives the loading button).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
        if accepted {
            self.errors.clear_terms();
        }
    }

    /// Handle an edit of `field`: write it to the store and drop its stale error.
    /// Returns `false` without touching the store while a submit is pending.
    pub fn input(&mut self, store: &mut Store, field: FormField, value: impl Into<String>) -> bool {
        if self.pending {
            tracing::debug!(%field, "registration form edit ignored while pending");
            return false;
        }
        store.set_registration_form_field(field, value);
        self.errors.clear_field(field);
        true
    }

    /// Validate and, when the form is acceptable, mark the page pending and
    /// return the snapshot to send to the action.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitOutcome::Busy`] while a submit is pending and
    /// [`SubmitOutcome::Invalid`] when validation fails; in the latter case
    /// field errors are recorded and an error snackbar is opened.
    pub fn begin_submit(&mut self, store: &mut Store) -> Result<RegistrationInput, SubmitOutcome> {
        if self.pending {
            tracing::debug!("registration submit ignored while pending");
            return Err(SubmitOutcome::Busy);
        }

        if let Err(errors) = validate(&store.state().registration_form, self.terms_accepted) {
            tracing::debug!(failed = errors.len(), "registration form invalid");
            self.errors = errors;
            store.open_snackbar(Severity::Error, FIX_ERRORS_MESSAGE);
            return Err(SubmitOutcome::Invalid);
        }

        let input = store.state().registration_form.to_input();
        tracing::debug!(email = %input.email, full_name = %input.full_name, "registration form submitted");
        self.errors = ValidationErrors::default();
        self.pending = true;
        Ok(input)
    }

    /// Reflect the action's result into the store and clear the pending flag.
    pub fn complete_submit(
        &mut self,
        store: &mut Store,
        result: Result<RegisterReply, ActionFault>,
    ) -> SubmitOutcome {
        self.pending = false;

        match result {
            Ok(RegisterReply::Success(success)) => {
                match success.profile {
                    Some(profile) => store.set_profile_details_and_session(success.user, profile),
                    None => store.set_user_session(success.user),
                }
                match self.reset_policy {
                    FormResetPolicy::ClearForm => store.reset_registration_form(),
                    FormResetPolicy::KeepDetails => store.set_registration_form_field(FormField::Password, ""),
                }
                store.open_snackbar(Severity::Success, REGISTERED_MESSAGE);
                SubmitOutcome::Registered
            }
            Ok(RegisterReply::Failure(failure)) => {
                tracing::warn!(error = %failure.error, "registration rejected");
                store.open_snackbar(Severity::Error, failure.error.clone());
                SubmitOutcome::Failed(failure.error)
            }
            Err(fault) => {
                tracing::warn!(error = %fault, "registration action unreachable");
                store.open_snackbar(Severity::Error, UNEXPECTED_FAULT_MESSAGE);
                SubmitOutcome::Failed(UNEXPECTED_FAULT_MESSAGE.to_owned())
            }
        }
    }

    /// Run a whole submit against `action`.
    pub async fn submit<A>(&mut self, store: &mut Store, action: &A) -> SubmitOutcome
    where
        A: RegisterAction + ?Sized,
    {
        let input = match self.begin_submit(store) {
            Ok(input) => input,
            Err(outcome) => return outcome,
        };
        let result = action.register(input).await;
        self.complete_submit(store, result)
    }
}
