//! Sign-in and admin bootstrap through the application state

use tempfile::TempDir;
use tilawah_core::{Role, TilawahError};
use tilawah_reader::{AppState, Credentials, ReaderConfig, ReaderError};
use tilawah_storage::{accounts, activity_logs, roles, AdminContext};

fn config_with_db(dir: &TempDir) -> ReaderConfig {
    let mut config = ReaderConfig::default();
    config.storage.database_url = format!("sqlite://{}", dir.path().join("reader.db").display());
    config
}

fn credentials(email: &str, password: &str) -> Option<Credentials> {
    Credentials::from_args(Some(email.to_string()), Some(password.to_string()))
}

async fn register(state: &AppState, email: &str, password: &str) {
    let pool = state.pool().await.unwrap();
    accounts::register(&pool, email, password, "Reader")
        .await
        .unwrap();
}

#[tokio::test]
async fn sign_in_requires_credentials() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(config_with_db(&dir), None).unwrap();

    assert!(matches!(
        state.sign_in().await,
        Err(ReaderError::MissingCredentials)
    ));
    assert!(state.optional_session().await.unwrap().is_none());
}

#[test]
fn partial_credentials_are_ignored() {
    assert!(Credentials::from_args(Some("a@example.com".into()), None).is_none());
    assert!(Credentials::from_args(None, Some("secret1".into())).is_none());
}

#[tokio::test]
async fn signs_in_registered_reader() {
    let dir = TempDir::new().unwrap();
    let anonymous = AppState::new(config_with_db(&dir), None).unwrap();
    register(&anonymous, "reader@example.com", "secret1").await;

    let state = AppState::new(
        config_with_db(&dir),
        credentials("reader@example.com", "secret1"),
    )
    .unwrap();
    let (_, session) = state.sign_in().await.unwrap();

    assert_eq!(session.email, "reader@example.com");
    assert_eq!(session.roles, vec![Role::User]);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let dir = TempDir::new().unwrap();
    let anonymous = AppState::new(config_with_db(&dir), None).unwrap();
    register(&anonymous, "reader@example.com", "secret1").await;

    let state = AppState::new(
        config_with_db(&dir),
        credentials("reader@example.com", "wrong-password"),
    )
    .unwrap();

    assert!(matches!(
        state.sign_in().await,
        Err(ReaderError::Core(TilawahError::AuthFailed(_)))
    ));
}

#[tokio::test]
async fn configured_admin_email_is_promoted() {
    let dir = TempDir::new().unwrap();
    let anonymous = AppState::new(config_with_db(&dir), None).unwrap();
    register(&anonymous, "imam@example.com", "secret1").await;

    let mut config = config_with_db(&dir);
    config.storage.admin_email = Some("Imam@Example.com".to_string());
    let state = AppState::new(config, credentials("imam@example.com", "secret1")).unwrap();

    let (pool, session) = state.sign_in().await.unwrap();
    assert!(session.is_admin());

    // The role is persisted, so the admin console accepts the session
    let admin = AdminContext::new(pool, &session).await.unwrap();
    let stats = admin.stats().await.unwrap();
    assert_eq!(stats.admin_count, 1);
}

#[tokio::test]
async fn demoted_admin_is_not_promoted_again() {
    let dir = TempDir::new().unwrap();
    let anonymous = AppState::new(config_with_db(&dir), None).unwrap();
    register(&anonymous, "imam@example.com", "secret1").await;

    let mut config = config_with_db(&dir);
    config.storage.admin_email = Some("imam@example.com".to_string());
    let state = AppState::new(config, credentials("imam@example.com", "secret1")).unwrap();

    let (pool, session) = state.sign_in().await.unwrap();
    assert!(session.is_admin());

    // The grant is in the audit trail with no acting user
    let logs = activity_logs::recent(&pool, None).await.unwrap();
    let grant = logs
        .iter()
        .find(|log| log.action == "role_changed")
        .expect("bootstrap grant logged");
    assert_eq!(grant.user_id, None);

    // Once demoted with another admin in place, the account stays demoted
    let other = accounts::register(&pool, "other@example.com", "secret1", "Other")
        .await
        .unwrap();
    roles::replace_role(&pool, &other.user_id, Role::Admin)
        .await
        .unwrap();
    roles::replace_role(&pool, &session.user_id, Role::User)
        .await
        .unwrap();

    let (_, session) = state.sign_in().await.unwrap();
    assert!(!session.is_admin());
}

#[tokio::test]
async fn other_accounts_are_not_promoted() {
    let dir = TempDir::new().unwrap();
    let anonymous = AppState::new(config_with_db(&dir), None).unwrap();
    register(&anonymous, "reader@example.com", "secret1").await;

    let mut config = config_with_db(&dir);
    config.storage.admin_email = Some("imam@example.com".to_string());
    let state = AppState::new(config, credentials("reader@example.com", "secret1")).unwrap();

    let (pool, session) = state.sign_in().await.unwrap();
    assert!(!session.is_admin());
    assert!(matches!(
        AdminContext::new(pool, &session).await,
        Err(TilawahError::PermissionDeniedWithContext(_))
    ));
}
