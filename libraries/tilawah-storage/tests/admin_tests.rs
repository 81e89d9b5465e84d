//! Integration tests for admin operations
//!
//! Tests that:
//! - Only admins obtain an `AdminContext`
//! - Ban/unban/role changes persist and are logged
//! - Statistics count users, content and roles

mod test_helpers;

use tilawah_core::storage::AccountStore;
use tilawah_core::types::*;
use tilawah_core::TilawahError;
use tilawah_storage::{activity_logs, admin, profiles, roles, AdminContext, LocalAccountStore};
use test_helpers::*;

#[tokio::test]
async fn test_non_admin_is_refused() {
    let test_db = TestDb::new().await;
    let user = create_test_user(test_db.pool(), "user@example.com").await;

    let result = AdminContext::new(test_db.pool().clone(), &user).await;
    assert!(matches!(
        result,
        Err(TilawahError::PermissionDeniedWithContext(_))
    ));
}

#[tokio::test]
async fn test_stale_admin_session_is_refused() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let admin = create_test_admin(pool, "admin@example.com").await;

    roles::replace_role(pool, &admin.user_id, Role::User)
        .await
        .unwrap();

    // Session still claims admin, database says otherwise
    assert!(admin.is_admin());
    assert!(AdminContext::new(pool.clone(), &admin).await.is_err());
}

#[tokio::test]
async fn test_ban_and_unban_are_logged() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let admin = create_test_admin(pool, "admin@example.com").await;
    let user = create_test_user(pool, "user@example.com").await;
    let ctx = AdminContext::new(pool.clone(), &admin).await.unwrap();

    ctx.ban_user(&user.user_id, "spam").await.unwrap();
    let profile = profiles::get(pool, &user.user_id).await.unwrap().unwrap();
    assert!(profile.is_banned);
    assert_eq!(profile.ban_reason.as_deref(), Some("spam"));

    ctx.unban_user(&user.user_id).await.unwrap();
    let profile = profiles::get(pool, &user.user_id).await.unwrap().unwrap();
    assert!(!profile.is_banned);
    assert_eq!(profile.ban_reason, None);

    let logs = ctx.activity_logs(None).await.unwrap();
    let actions: Vec<&str> = logs.iter().map(|l| l.action.as_str()).collect();
    assert_eq!(actions, vec!["user_unbanned", "user_banned"]);
    assert_eq!(logs[1].user_id.as_ref(), Some(&admin.user_id));
    assert_eq!(
        logs[1].details.as_ref().unwrap()["reason"],
        serde_json::json!("spam")
    );
}

#[tokio::test]
async fn test_admin_cannot_ban_self() {
    let test_db = TestDb::new().await;
    let admin = create_test_admin(test_db.pool(), "admin@example.com").await;
    let ctx = AdminContext::new(test_db.pool().clone(), &admin).await.unwrap();

    assert!(ctx.ban_user(&admin.user_id, "oops").await.is_err());
}

#[tokio::test]
async fn test_change_role_replaces_existing_roles() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let admin = create_test_admin(pool, "admin@example.com").await;
    let user = create_test_user(pool, "user@example.com").await;
    let ctx = AdminContext::new(pool.clone(), &admin).await.unwrap();

    ctx.change_role(&user.user_id, Role::Moderator).await.unwrap();

    assert_eq!(
        roles::roles_of(pool, &user.user_id).await.unwrap(),
        vec![Role::Moderator]
    );
    let logs = activity_logs::recent(pool, Some(1)).await.unwrap();
    assert_eq!(logs[0].action, "role_changed");
    assert_eq!(
        logs[0].details.as_ref().unwrap()["new_role"],
        serde_json::json!("moderator")
    );
}

#[tokio::test]
async fn test_actions_on_unknown_user_fail() {
    let test_db = TestDb::new().await;
    let admin = create_test_admin(test_db.pool(), "admin@example.com").await;
    let ctx = AdminContext::new(test_db.pool().clone(), &admin).await.unwrap();
    let ghost = UserId::new("ghost");

    assert!(matches!(
        ctx.ban_user(&ghost, "x").await,
        Err(TilawahError::UserNotFound(_))
    ));
    assert!(ctx.activity_logs(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_users_includes_profiles_and_roles() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let admin = create_test_admin(pool, "admin@example.com").await;
    let user = create_test_user(pool, "user@example.com").await;
    let ctx = AdminContext::new(pool.clone(), &admin).await.unwrap();

    let users = ctx.list_users().await.unwrap();
    assert_eq!(users.len(), 2);

    let listed = users.iter().find(|u| u.id == user.user_id).unwrap();
    assert_eq!(listed.email, "user@example.com");
    assert_eq!(listed.roles, vec![Role::User]);
    assert!(listed.profile.is_some());

    let listed_admin = users.iter().find(|u| u.id == admin.user_id).unwrap();
    assert_eq!(listed_admin.roles, vec![Role::Admin]);
}

#[tokio::test]
async fn test_stats_count_everything() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let admin = create_test_admin(pool, "admin@example.com").await;
    let moderator = create_test_user(pool, "mod@example.com").await;
    let reader = create_test_user(pool, "reader@example.com").await;
    let ctx = AdminContext::new(pool.clone(), &admin).await.unwrap();

    ctx.change_role(&moderator.user_id, Role::Moderator)
        .await
        .unwrap();
    ctx.ban_user(&reader.user_id, "abuse").await.unwrap();

    let store = LocalAccountStore::for_session(pool.clone(), &moderator);
    store
        .add_bookmark(NewBookmark::new(VerseRef::new(1, 1).unwrap()))
        .await
        .unwrap();
    store
        .add_note(NewNote {
            verse: VerseRef::new(1, 1).unwrap(),
            content: "note".into(),
        })
        .await
        .unwrap();

    let stats = ctx.stats().await.unwrap();
    assert_eq!(
        stats,
        AdminStats {
            total_users: 3,
            active_users: 2,
            banned_users: 1,
            total_bookmarks: 1,
            total_notes: 1,
            admin_count: 1,
            moderator_count: 1,
        }
    );
}

#[tokio::test]
async fn test_bootstrap_admin_only_when_none_exists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let first = create_test_user(pool, "first@example.com").await;
    let second = create_test_user(pool, "second@example.com").await;

    assert!(admin::bootstrap_admin(pool, &first.user_id).await.unwrap());
    assert_eq!(
        roles::roles_of(pool, &first.user_id).await.unwrap(),
        vec![Role::Admin]
    );

    let logs = activity_logs::recent(pool, Some(1)).await.unwrap();
    assert_eq!(logs[0].action, "role_changed");
    assert_eq!(logs[0].user_id, None);
    let details = logs[0].details.as_ref().unwrap();
    assert_eq!(details["user_id"], serde_json::json!(first.user_id.as_str()));
    assert_eq!(details["new_role"], serde_json::json!("admin"));

    // An admin exists now, so nobody else is promoted
    assert!(!admin::bootstrap_admin(pool, &second.user_id).await.unwrap());
    assert_eq!(
        roles::roles_of(pool, &second.user_id).await.unwrap(),
        vec![Role::User]
    );
    assert_eq!(activity_logs::recent(pool, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_activity_log_limit() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 0..60 {
        activity_logs::log(pool, None, "ping", Some(serde_json::json!({ "i": i })))
            .await
            .unwrap();
    }

    assert_eq!(activity_logs::recent(pool, None).await.unwrap().len(), 50);
    let latest = activity_logs::recent(pool, Some(3)).await.unwrap();
    assert_eq!(latest.len(), 3);
    assert_eq!(latest[0].details.as_ref().unwrap()["i"], serde_json::json!(59));
    assert_eq!(latest[0].user_id, None);
}
