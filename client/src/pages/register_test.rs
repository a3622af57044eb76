use std::sync::Mutex;

use super::*;
use crate::net::types::{Identity, ProfileDetails, RegisterFailure, RegisterSuccess};
use crate::pages::validation::ValidationError;

// =============================================================
// MockAction
// =============================================================

enum Scripted {
    Reply(RegisterReply),
    Fault,
}

struct MockAction {
    scripted: Scripted,
    calls: Mutex<Vec<RegistrationInput>>,
}

impl MockAction {
    fn replying(reply: RegisterReply) -> Self {
        Self { scripted: Scripted::Reply(reply), calls: Mutex::new(Vec::new()) }
    }

    fn faulting() -> Self {
        Self { scripted: Scripted::Fault, calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<RegistrationInput> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RegisterAction for MockAction {
    async fn register(&self, input: RegistrationInput) -> Result<RegisterReply, ActionFault> {
        self.calls.lock().unwrap().push(input);
        match &self.scripted {
            Scripted::Reply(reply) => Ok(reply.clone()),
            Scripted::Fault => Err(ActionFault::Request("connection refused".to_owned())),
        }
    }
}

// =============================================================
// Helpers
// =============================================================

fn make_identity() -> Identity {
    Identity { id: Some("u-1".to_owned()), email: Some("ada@example.com".to_owned()), ..Identity::default() }
}

fn success_reply(profile: Option<ProfileDetails>) -> RegisterReply {
    RegisterReply::Success(RegisterSuccess {
        message: "Registration successful".to_owned(),
        user: make_identity(),
        profile,
    })
}

fn filled(page: &mut RegistrationPage, store: &mut Store) {
    page.input(store, FormField::FullName, "Ada Lovelace");
    page.input(store, FormField::DateOfBirth, "1815-12-10");
    page.input(store, FormField::PhoneNumber, "+44 20 7946 0958");
    page.input(store, FormField::Email, "ada@example.com");
    page.input(store, FormField::Password, "engine");
    page.set_terms_accepted(true);
}

// =============================================================
// Validation gate
// =============================================================

#[tokio::test]
async fn invalid_phone_blocks_action() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);
    page.input(&mut store, FormField::PhoneNumber, "abc");
    let action = MockAction::replying(success_reply(None));

    let outcome = page.submit(&mut store, &action).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert!(action.calls().is_empty());
    assert_eq!(page.errors().for_field(FormField::PhoneNumber), Some(ValidationError::PhoneNumberInvalid));
    assert_eq!(store.state().snackbar.severity, Severity::Error);
    assert_eq!(store.state().snackbar.msg, FIX_ERRORS_MESSAGE);
    assert!(!page.is_pending());
}

#[tokio::test]
async fn unchecked_terms_blocks_action() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);
    page.set_terms_accepted(false);
    let action = MockAction::replying(success_reply(None));

    assert_eq!(page.submit(&mut store, &action).await, SubmitOutcome::Invalid);
    assert!(action.calls().is_empty());
    assert!(page.errors().terms().is_some());
}

#[test]
fn editing_a_field_clears_its_error() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    assert!(page.begin_submit(&mut store).is_err());
    assert!(page.errors().for_field(FormField::Email).is_some());

    page.input(&mut store, FormField::Email, "ada@example.com");
    assert!(page.errors().for_field(FormField::Email).is_none());
    assert!(page.errors().for_field(FormField::FullName).is_some());
}

// =============================================================
// Single flight
// =============================================================

#[test]
fn second_submit_while_pending_is_refused() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);

    let input = page.begin_submit(&mut store).unwrap();
    assert_eq!(input.email, "ada@example.com");
    assert!(page.is_pending());
    assert_eq!(page.begin_submit(&mut store), Err(SubmitOutcome::Busy));

    page.complete_submit(&mut store, Ok(success_reply(None)));
    assert!(!page.is_pending());
}

#[test]
fn edits_refused_while_pending() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);
    page.begin_submit(&mut store).unwrap();

    assert!(!page.input(&mut store, FormField::Email, "grace@example.com"));
    assert_eq!(store.state().registration_form.email, "ada@example.com");

    page.complete_submit(&mut store, Ok(success_reply(None)));
    assert!(page.input(&mut store, FormField::Email, "grace@example.com"));
    assert_eq!(store.state().registration_form.email, "grace@example.com");
}

// =============================================================
// Action results
// =============================================================

#[tokio::test]
async fn success_commits_session_and_clears_form() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);
    let action = MockAction::replying(success_reply(None));

    let outcome = page.submit(&mut store, &action).await;

    assert_eq!(outcome, SubmitOutcome::Registered);
    assert_eq!(action.calls().len(), 1);
    assert_eq!(action.calls()[0].password, "engine");
    assert_eq!(store.state().user_session, Some(make_identity()));
    assert_eq!(store.state().registration_form, crate::state::RegistrationForm::default());
    assert!(store.state().snackbar.open);
    assert_eq!(store.state().snackbar.severity, Severity::Success);
    assert_eq!(store.state().snackbar.msg, REGISTERED_MESSAGE);
}

#[tokio::test]
async fn success_with_profile_sets_profile_details() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);
    let profile = ProfileDetails::from_input("u-1", &store.state().registration_form.to_input());
    let action = MockAction::replying(success_reply(Some(profile.clone())));

    page.submit(&mut store, &action).await;

    assert_eq!(store.state().profile_details, Some(profile));
    assert_eq!(store.state().user_session, Some(make_identity()));
}

#[tokio::test]
async fn keep_details_policy_still_clears_password() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new().with_reset_policy(FormResetPolicy::KeepDetails);
    filled(&mut page, &mut store);
    let action = MockAction::replying(success_reply(None));

    page.submit(&mut store, &action).await;

    let form = &store.state().registration_form;
    assert_eq!(form.email, "ada@example.com");
    assert!(form.password.is_empty());
}

#[tokio::test]
async fn failure_reply_shown_verbatim_and_session_untouched() {
    let mut store = Store::new();
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);
    let action = MockAction::replying(RegisterReply::Failure(RegisterFailure {
        error: "A user with this email address has already been registered".to_owned(),
    }));

    let outcome = page.submit(&mut store, &action).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed("A user with this email address has already been registered".to_owned())
    );
    assert!(store.state().user_session.is_none());
    assert_eq!(store.state().snackbar.severity, Severity::Error);
    assert_eq!(store.state().snackbar.msg, "A user with this email address has already been registered");
    assert_eq!(store.state().registration_form.email, "ada@example.com");
    assert!(!page.is_pending());
}

#[tokio::test]
async fn fault_maps_to_generic_message() {
    let mut store = Store::new();
    store.set_user_session(Identity { id: Some("existing".to_owned()), ..Identity::default() });
    let mut page = RegistrationPage::new();
    filled(&mut page, &mut store);
    let action = MockAction::faulting();

    let outcome = page.submit(&mut store, &action).await;

    assert_eq!(outcome, SubmitOutcome::Failed(UNEXPECTED_FAULT_MESSAGE.to_owned()));
    assert_eq!(store.state().snackbar.msg, UNEXPECTED_FAULT_MESSAGE);
    assert_eq!(store.state().user_session.as_ref().and_then(Identity::id), Some("existing"));
    assert!(!page.is_pending());
}
