//! Admin console commands
//!
//! Every command re-checks the admin role through `AdminContext`. Mutations
//! print the reloaded user row instead of assuming the outcome.

use crate::state::AppState;
use anyhow::Context;
use tilawah_core::{Role, UserId, UserWithProfile};
use tilawah_storage::AdminContext;

async fn admin_context(state: &AppState) -> anyhow::Result<AdminContext> {
    let (pool, session) = state.sign_in().await?;
    Ok(AdminContext::new(pool, &session).await?)
}

pub async fn users(state: &AppState) -> anyhow::Result<()> {
    let admin = admin_context(state).await?;
    let users = admin.list_users().await?;

    for user in &users {
        print_user(user);
    }
    println!("\n{} user(s)", users.len());
    Ok(())
}

pub async fn ban(state: &AppState, user_id: &str, reason: &str) -> anyhow::Result<()> {
    let admin = admin_context(state).await?;
    let user_id = UserId::new(user_id);
    admin.ban_user(&user_id, reason).await?;
    print_reloaded(&admin, &user_id).await
}

pub async fn unban(state: &AppState, user_id: &str) -> anyhow::Result<()> {
    let admin = admin_context(state).await?;
    let user_id = UserId::new(user_id);
    admin.unban_user(&user_id).await?;
    print_reloaded(&admin, &user_id).await
}

pub async fn change_role(state: &AppState, user_id: &str, role: &str) -> anyhow::Result<()> {
    let role = Role::from_str(role)
        .with_context(|| format!("Unknown role {role:?} (expected admin, moderator or user)"))?;

    let admin = admin_context(state).await?;
    let user_id = UserId::new(user_id);
    admin.change_role(&user_id, role).await?;
    print_reloaded(&admin, &user_id).await
}

pub async fn stats(state: &AppState) -> anyhow::Result<()> {
    let admin = admin_context(state).await?;
    let stats = admin.stats().await?;

    println!("Users:       {}", stats.total_users);
    println!("  active:    {}", stats.active_users);
    println!("  banned:    {}", stats.banned_users);
    println!("Bookmarks:   {}", stats.total_bookmarks);
    println!("Notes:       {}", stats.total_notes);
    println!("Admins:      {}", stats.admin_count);
    println!("Moderators:  {}", stats.moderator_count);
    Ok(())
}

pub async fn logs(state: &AppState, limit: Option<i64>) -> anyhow::Result<()> {
    let admin = admin_context(state).await?;
    let logs = admin.activity_logs(limit).await?;

    if logs.is_empty() {
        println!("No activity recorded");
        return Ok(());
    }

    for entry in logs {
        let actor = entry
            .user_id
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        let details = entry
            .details
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!(
            "{}  {:<16} {:<36} {}",
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            actor,
            details
        );
    }
    Ok(())
}

async fn print_reloaded(admin: &AdminContext, user_id: &UserId) -> anyhow::Result<()> {
    let users = admin.list_users().await?;
    let user = users
        .iter()
        .find(|u| &u.id == user_id)
        .with_context(|| format!("User {user_id} not found after update"))?;
    print_user(user);
    Ok(())
}

fn print_user(user: &UserWithProfile) {
    let roles = user
        .roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let (name, banned) = match &user.profile {
        Some(profile) => (
            profile.full_name.as_deref().unwrap_or("-"),
            if profile.is_banned {
                format!(
                    "BANNED ({})",
                    profile.ban_reason.as_deref().unwrap_or("no reason")
                )
            } else {
                String::new()
            },
        ),
        None => ("-", String::new()),
    };

    println!(
        "{:<36} {:<28} {:<20} {:<16} {}",
        user.id, user.email, name, roles, banned
    );
}
