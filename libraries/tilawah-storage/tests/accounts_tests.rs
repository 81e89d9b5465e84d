//! Integration tests for the accounts slice
//!
//! Tests registration and sign-in including:
//! - Profile and default role creation
//! - Duplicate email rejection
//! - Credential checks and banned accounts
//! - Form validation

mod test_helpers;

use tilawah_core::{Role, TilawahError};
use tilawah_storage::{accounts, profiles, roles};
use test_helpers::*;

#[tokio::test]
async fn test_register_creates_profile_and_user_role() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let session = accounts::register(pool, "Reader@Example.com", "secret1", "Amina Reader")
        .await
        .expect("Failed to register");

    assert_eq!(session.email, "reader@example.com");
    assert_eq!(session.roles, vec![Role::User]);

    let profile = profiles::get(pool, &session.user_id).await.unwrap().unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Amina Reader"));
    assert!(!profile.is_banned);

    assert_eq!(
        roles::roles_of(pool, &session.user_id).await.unwrap(),
        vec![Role::User]
    );
}

#[tokio::test]
async fn test_register_duplicate_email_fails() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    accounts::register(pool, "reader@example.com", "secret1", "First")
        .await
        .unwrap();

    let result = accounts::register(pool, "READER@example.com", "secret2", "Second").await;
    assert!(matches!(result, Err(TilawahError::Duplicate(_))));
}

#[tokio::test]
async fn test_register_validates_form() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for (email, password, name) in [
        ("not-an-email", "secret1", "Name"),
        ("reader@example.com", "12345", "Name"),
        ("reader@example.com", "secret1", "   "),
    ] {
        let result = accounts::register(pool, email, password, name).await;
        assert!(
            matches!(result, Err(TilawahError::InvalidInput(_))),
            "{email}/{password}/{name:?} should be rejected"
        );
    }

    assert!(accounts::find_by_email(pool, "reader@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_sign_in_with_correct_password() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let registered = accounts::register(pool, "reader@example.com", "secret1", "Reader")
        .await
        .unwrap();

    let session = accounts::sign_in(pool, " reader@example.com ", "secret1")
        .await
        .expect("Sign-in failed");

    assert_eq!(session.user_id, registered.user_id);
    assert_eq!(session.roles, vec![Role::User]);
}

#[tokio::test]
async fn test_sign_in_rejects_wrong_credentials() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    accounts::register(pool, "reader@example.com", "secret1", "Reader")
        .await
        .unwrap();

    let wrong_password = accounts::sign_in(pool, "reader@example.com", "secret2").await;
    assert!(matches!(wrong_password, Err(TilawahError::AuthFailed(_))));

    let unknown = accounts::sign_in(pool, "nobody@example.com", "secret1").await;
    assert!(matches!(unknown, Err(TilawahError::AuthFailed(_))));
}

#[tokio::test]
async fn test_banned_user_cannot_sign_in() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let session = accounts::register(pool, "reader@example.com", "secret1", "Reader")
        .await
        .unwrap();
    profiles::set_banned(pool, &session.user_id, true, Some("spam"))
        .await
        .unwrap();

    let result = accounts::sign_in(pool, "reader@example.com", "secret1").await;
    match result {
        Err(TilawahError::PermissionDeniedWithContext(msg)) => assert!(msg.contains("spam")),
        other => panic!("expected permission denied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_in_reflects_current_roles() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let session = accounts::register(pool, "mod@example.com", "secret1", "Mod")
        .await
        .unwrap();
    roles::replace_role(pool, &session.user_id, Role::Moderator)
        .await
        .unwrap();

    let session = accounts::sign_in(pool, "mod@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(session.roles, vec![Role::Moderator]);
}
