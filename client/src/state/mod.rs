//! Application store for the registration UI.
//!
//! DESIGN
//! ======
//! `Store` is an explicit container handed to pages, not a process-wide
//! global. Every mutation is an [`Action`] applied by the pure [`reduce`]
//! function; the store only swaps in the next state and bumps a revision
//! counter that renderers compare to detect changes. Nothing in here does
//! I/O.

pub mod form;
pub mod snackbar;


use serde_json::Value;

use crate::net::types::{Identity, ProfileDetails};
pub use form::{FormField, RegistrationForm};
pub use snackbar::{Severity, SnackbarState};

/// Identity attributes of the signed-in user.
pub type UserSession = Identity;

/// Full UI state snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub user_session: Option<UserSession>,
    pub profile_details: Option<ProfileDetails>,
    pub containers: Vec<Value>,
    pub snackbar: SnackbarState,
    pub registration_form: RegistrationForm,
}

/// A single state transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetRegistrationFormField { field: FormField, value: String },
    ResetRegistrationForm,
    SetUserSession(UserSession),
    ClearUserSession,
    SetProfileDetailsAndSession { session: UserSession, profile: ProfileDetails },
    OpenSnackbar { severity: Severity, msg: String },
    CloseSnackbar,
    SetContainers(Vec<Value>),
}

/// Compute the state that follows `state` once `action` is applied.
#[must_use]
pub fn reduce(mut state: State, action: Action) -> State {
    match action {
        Action::SetRegistrationFormField { field, value } => state.registration_form.set(field, value),
        Action::ResetRegistrationForm => state.registration_form = RegistrationForm::default(),
        Action::SetUserSession(session) => state.user_session = Some(session),
        Action::ClearUserSession => state.user_session = None,
        Action::SetProfileDetailsAndSession { session, profile } => {
            state.user_session = Some(session);
            state.profile_details = Some(profile);
        }
        Action::OpenSnackbar { severity, msg } => state.snackbar = SnackbarState { open: true, severity, msg },
        // Severity and message stay so a closing animation can still render them.
        Action::CloseSnackbar => state.snackbar.open = false,
        Action::SetContainers(containers) => state.containers = containers,
    }
    state
}

/// Owner of the current [`State`].
#[derive(Debug, Default)]
pub struct Store {
    state: State,
    revision: u64,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Number of actions applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: Action) {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
        self.revision += 1;
    }

    pub fn set_registration_form_field(&mut self, field: FormField, value: impl Into<String>) {
        self.dispatch(Action::SetRegistrationFormField { field, value: value.into() });
    }

    pub fn reset_registration_form(&mut self) {
        self.dispatch(Action::ResetRegistrationForm);
    }

    pub fn set_user_session(&mut self, session: UserSession) {
        self.dispatch(Action::SetUserSession(session));
    }

    pub fn clear_user_session(&mut self) {
        self.dispatch(Action::ClearUserSession);
    }

    pub fn set_profile_details_and_session(&mut self, session: UserSession, profile: ProfileDetails) {
        self.dispatch(Action::SetProfileDetailsAndSession { session, profile });
    }

    pub fn open_snackbar(&mut self, severity: Severity, msg: impl Into<String>) {
        self.dispatch(Action::OpenSnackbar { severity, msg: msg.into() });
    }

    pub fn close_snackbar(&mut self) {
        self.dispatch(Action::CloseSnackbar);
    }

    pub fn set_containers(&mut self, containers: Vec<Value>) {
        self.dispatch(Action::SetContainers(containers));
    }
}
