use super::*;

fn valid_form() -> RegistrationForm {
    RegistrationForm {
        full_name: "Ada Lovelace".to_owned(),
        date_of_birth: "1815-12-10".to_owned(),
        phone_number: "+44 20-7946 0958".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "engine".to_owned(),
    }
}

#[test]
fn valid_form_passes() {
    assert_eq!(validate(&valid_form(), true), Ok(()));
}

#[test]
fn empty_form_reports_every_field_and_terms() {
    let errors = validate(&RegistrationForm::default(), false).unwrap_err();
    assert_eq!(errors.len(), 6);
    for field in FormField::ALL {
        assert!(errors.for_field(field).is_some(), "missing error for {field}");
    }
    assert_eq!(errors.terms(), Some(ValidationError::TermsNotAccepted));
}

#[test]
fn whitespace_name_is_required_error() {
    let form = RegistrationForm { full_name: "   ".to_owned(), ..valid_form() };
    let errors = validate(&form, true).unwrap_err();
    assert_eq!(errors.for_field(FormField::FullName), Some(ValidationError::FullNameRequired));
}

#[test]
fn phone_with_letters_rejected() {
    let form = RegistrationForm { phone_number: "abc".to_owned(), ..valid_form() };
    let errors = validate(&form, true).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.for_field(FormField::PhoneNumber), Some(ValidationError::PhoneNumberInvalid));
}

#[test]
fn phone_accepts_digits_plus_dash_space() {
    for phone in ["5550100", "+1 555 0100", "555-0100", "+44-20-7946-0958"] {
        let form = RegistrationForm { phone_number: phone.to_owned(), ..valid_form() };
        assert_eq!(validate(&form, true), Ok(()), "phone {phone:?} should pass");
    }
}

#[test]
fn email_shape_checked() {
    for email in ["ada", "ada@example", "@example.com", "ada @example.com", "ada@@example.com"] {
        let form = RegistrationForm { email: email.to_owned(), ..valid_form() };
        let errors = validate(&form, true).unwrap_err();
        assert_eq!(errors.for_field(FormField::Email), Some(ValidationError::EmailInvalid), "email {email:?}");
    }
}

#[test]
fn password_length_boundary() {
    let short = RegistrationForm { password: "12345".to_owned(), ..valid_form() };
    let exact = RegistrationForm { password: "123456".to_owned(), ..valid_form() };
    assert_eq!(
        validate(&short, true).unwrap_err().for_field(FormField::Password),
        Some(ValidationError::PasswordTooShort)
    );
    assert_eq!(validate(&exact, true), Ok(()));
}

#[test]
fn password_length_counts_characters_not_bytes() {
    let form = RegistrationForm { password: "ééééé".to_owned(), ..valid_form() };
    assert_eq!(
        validate(&form, true).unwrap_err().for_field(FormField::Password),
        Some(ValidationError::PasswordTooShort)
    );
}

#[test]
fn unchecked_terms_blocks_valid_form() {
    let errors = validate(&valid_form(), false).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.terms(), Some(ValidationError::TermsNotAccepted));
}

#[test]
fn clear_field_drops_only_that_error() {
    let mut errors = validate(&RegistrationForm::default(), false).unwrap_err();
    errors.clear_field(FormField::Email);
    assert!(errors.for_field(FormField::Email).is_none());
    assert!(errors.for_field(FormField::Password).is_some());
    errors.clear_terms();
    assert!(errors.terms().is_none());
    assert_eq!(errors.len(), 4);
}
