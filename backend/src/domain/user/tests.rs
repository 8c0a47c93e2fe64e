//! Tests for user value types and partial updates.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn jake() -> User {
    User::try_from_strings("user-1", "jake", "jake@jake.jake")
        .expect("fixture user is valid")
        .with_bio("I work at statefarm")
        .with_image("https://example.com/jake.png")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("   ", UserValidationError::EmptyId)]
fn blank_ids_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn random_ids_are_distinct_uuids() {
    let first = UserId::random();
    let second = UserId::random();
    assert_ne!(first, second);
    assert!(Uuid::parse_str(first.as_ref()).is_ok());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case(" ", UserValidationError::EmptyEmail)]
#[case("not-an-email", UserValidationError::InvalidEmail)]
#[case("missing@", UserValidationError::InvalidEmail)]
fn malformed_emails_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw), Err(expected));
}

#[rstest]
fn blank_usernames_are_rejected() {
    assert_eq!(
        Username::new("\t"),
        Err(UserValidationError::EmptyUsername)
    );
}

#[rstest]
#[case(UserValidationError::EmptyUsername, "username", "NotBlank", "can't be empty")]
#[case(UserValidationError::EmptyEmail, "email", "NotBlank", "can't be empty")]
#[case(UserValidationError::InvalidEmail, "email", "Email", "should be an email")]
fn validation_errors_describe_the_field(
    #[case] error: UserValidationError,
    #[case] field: &str,
    #[case] constraint: &str,
    #[case] message: &str,
) {
    assert_eq!(error.field(), field);
    assert_eq!(error.constraint(), constraint);
    assert_eq!(error.to_string(), message);
}

#[rstest]
fn user_id_deserialises_through_validation() {
    let parsed: Result<UserId, _> = serde_json::from_str(r#""""#);
    assert!(parsed.is_err());

    let id: UserId = serde_json::from_str(r#""abc""#).expect("non-empty id");
    assert_eq!(id.as_ref(), "abc");
}

#[rstest]
fn update_replaces_only_present_fields(mut jake: User) {
    let original_id = jake.id().clone();
    jake.update(UserChanges {
        email: Some(Email::new("jake@new.example").expect("valid email")),
        bio: Some(String::new()),
        ..UserChanges::default()
    });

    assert_eq!(jake.id(), &original_id);
    assert_eq!(jake.email().as_ref(), "jake@new.example");
    assert_eq!(jake.username().as_ref(), "jake");
    assert_eq!(jake.bio(), "");
    assert_eq!(jake.image(), "https://example.com/jake.png");
}

#[rstest]
fn empty_update_is_a_no_op(jake: User) {
    let mut updated = jake.clone();
    updated.update(UserChanges::default());
    assert_eq!(updated, jake);
}

#[rstest]
fn registration_mints_a_fresh_id() {
    let username = Username::new("jake").expect("valid username");
    let email = Email::new("jake@jake.jake").expect("valid email");

    let first = User::register(username.clone(), email.clone());
    let second = User::register(username, email);
    assert_ne!(first.id(), second.id());
}
