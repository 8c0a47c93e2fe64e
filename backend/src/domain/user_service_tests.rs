//! Tests for the user service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{Email, ErrorCode, FieldError, UserChanges};
use rstest::{fixture, rstest};

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

fn user(id: &str, username: &str, email: &str) -> User {
    User::try_from_strings(id, username, email).expect("fixture user is valid")
}

#[fixture]
fn jake() -> User {
    user("jake-id", "jake", "jake@jake.jake")
}

#[fixture]
fn celeb() -> User {
    user("celeb-id", "celeb", "celeb@celeb.celeb")
}

fn username(raw: &str) -> Username {
    Username::new(raw).expect("fixture username is valid")
}

fn field_errors(error: &Error) -> Vec<FieldError> {
    error
        .validation_failure()
        .expect("validation failure")
        .to_field_errors()
}

fn register_request() -> RegisterUserRequest {
    RegisterUserRequest {
        username: username("jake"),
        email: Email::new("jake@jake.jake").expect("valid email"),
        bio: "I work at statefarm".to_owned(),
        image: String::new(),
    }
}

#[rstest]
#[tokio::test]
async fn register_saves_new_user_with_profile_fields() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_save()
        .withf(|user| user.username().as_ref() == "jake" && user.bio() == "I work at statefarm")
        .times(1)
        .return_once(|_| Ok(()));

    let user = make_service(repo)
        .register(register_request())
        .await
        .expect("registration succeeds");

    assert_eq!(user.email().as_ref(), "jake@jake.jake");
    assert!(!user.id().as_ref().is_empty());
}

#[rstest]
#[tokio::test]
async fn register_reports_both_duplicates_without_saving(jake: User) {
    let existing = jake.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(jake)));
    repo.expect_save().never();

    let error = make_service(repo)
        .register(register_request())
        .await
        .expect_err("duplicates are rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let errors = field_errors(&error);
    let summary: Vec<(&str, &str, &str)> = errors
        .iter()
        .map(|e| (e.field(), e.code(), e.message()))
        .collect();
    assert_eq!(
        summary,
        [
            ("username", "DuplicatedUsername", "duplicated username"),
            ("email", "DuplicatedEmail", "duplicated email"),
        ]
    );
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[case(UserPersistenceError::unique_violation("users_email_key"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_persistence_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_save().return_once(move |_| Err(failure));

    let error = make_service(repo)
        .register(register_request())
        .await
        .expect_err("save fails");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_rejects_email_and_username_owned_by_others(jake: User, celeb: User) {
    let by_email = celeb.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(by_email)));
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(celeb)));
    repo.expect_save().never();

    let command = UpdateUserCommand::new(
        jake,
        UserChanges {
            email: Some(Email::new("celeb@celeb.celeb").expect("valid email")),
            username: Some(username("celeb")),
            ..UserChanges::default()
        },
    );
    let error = make_service(repo)
        .update_user(command)
        .await
        .expect_err("taken values are rejected");

    let errors = field_errors(&error);
    let summary: Vec<(&str, &str, &str)> = errors
        .iter()
        .map(|e| (e.field(), e.code(), e.message()))
        .collect();
    assert_eq!(
        summary,
        [
            ("email", "UpdateUserConstraint", "email already exist"),
            ("username", "UpdateUserConstraint", "username already exist"),
        ]
    );
    assert!(
        errors
            .iter()
            .all(|e| e.resource().ends_with("UpdateUserCommand"))
    );
}

#[rstest]
#[tokio::test]
async fn update_accepts_values_the_target_already_owns(jake: User) {
    let same = jake.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(same)));
    repo.expect_find_by_username().never();
    repo.expect_save()
        .withf(|user| user.bio() == "new bio" && user.email().as_ref() == "jake@jake.jake")
        .times(1)
        .return_once(|_| Ok(()));

    let command = UpdateUserCommand::new(
        jake.clone(),
        UserChanges {
            email: Some(jake.email().clone()),
            bio: Some("new bio".to_owned()),
            ..UserChanges::default()
        },
    );
    let updated = make_service(repo)
        .update_user(command)
        .await
        .expect("update succeeds");

    assert_eq!(updated.id(), jake.id());
    assert_eq!(updated.bio(), "new bio");
}

#[rstest]
#[tokio::test]
async fn follow_saves_relation_and_reports_following(jake: User, celeb: User) {
    let target = celeb.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(target)));
    repo.expect_save_relation()
        .withf(|relation| {
            relation.user_id().as_ref() == "jake-id" && relation.target_id().as_ref() == "celeb-id"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let profile = make_service(repo)
        .follow(&jake, &username("celeb"))
        .await
        .expect("follow succeeds");

    assert_eq!(profile, ProfileData::of(&celeb, true));
}

#[rstest]
#[tokio::test]
async fn follow_rejects_self_follow(jake: User) {
    let me = jake.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(me)));
    repo.expect_save_relation().never();

    let error = make_service(repo)
        .follow(&jake, &username("jake"))
        .await
        .expect_err("self follow is rejected");

    let errors = field_errors(&error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(), "username");
    assert_eq!(errors[0].code(), "SelfFollow");
}

#[rstest]
#[tokio::test]
async fn follow_unknown_user_is_not_found(jake: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_save_relation().never();

    let error = make_service(repo)
        .follow(&jake, &username("ghost"))
        .await
        .expect_err("unknown target");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn unfollow_removes_relation(jake: User, celeb: User) {
    let target = celeb.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(target)));
    repo.expect_remove_relation().times(1).return_once(|_| Ok(()));

    let profile = make_service(repo)
        .unfollow(&jake, &username("celeb"))
        .await
        .expect("unfollow succeeds");
    assert!(!profile.following);
}

#[rstest]
#[tokio::test]
async fn anonymous_profile_never_reports_following(celeb: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(celeb)));
    repo.expect_find_relation().never();

    let profile = make_service(repo)
        .profile(None, &username("celeb"))
        .await
        .expect("profile found");
    assert!(!profile.following);
}

#[rstest]
#[tokio::test]
async fn viewer_profile_reflects_relation(jake: User, celeb: User) {
    let target = celeb.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(target)));
    repo.expect_find_relation()
        .times(1)
        .return_once(|user_id, target_id| {
            Ok(Some(FollowRelation::new(user_id.clone(), target_id.clone())))
        });

    let profile = make_service(repo)
        .profile(Some(&jake), &username("celeb"))
        .await
        .expect("profile found");
    assert_eq!(profile, ProfileData::of(&celeb, true));
}

#[rstest]
#[tokio::test]
async fn find_user_data_projects_stored_user(jake: User) {
    let stored = jake.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));

    let data = make_service(repo)
        .find_user_data(jake.id())
        .await
        .expect("lookup succeeds");
    assert_eq!(data, Some(UserData::from(&jake)));
}

#[rstest]
#[tokio::test]
async fn find_user_maps_connection_failures(jake: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::connection("pool exhausted")));

    let error = make_service(repo)
        .find_user(jake.id())
        .await
        .expect_err("lookup fails");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
