//! Admin console operations
//!
//! Every operation goes through an [`AdminContext`], which can only be
//! created for a session whose user currently holds the admin role.
//! Mutating operations are recorded in the activity log.

use crate::{accounts, activity_logs, bookmarks, notes, profiles, roles};
use serde_json::json;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tilawah_core::{
    error::Result, ActivityLog, AdminStats, Role, Session, TilawahError, UserId, UserWithProfile,
};
use tracing::{info, warn};

/// Grant the admin role to `user_id` if no account holds it yet
///
/// Logged as a `role_changed` entry with no actor. Returns true when the
/// role was granted.
pub async fn bootstrap_admin(pool: &SqlitePool, user_id: &UserId) -> Result<bool> {
    if roles::count_by_role(pool, Role::Admin).await? > 0 {
        return Ok(false);
    }

    roles::replace_role(pool, user_id, Role::Admin).await?;
    activity_logs::log(
        pool,
        None,
        "role_changed",
        Some(json!({ "user_id": user_id, "new_role": Role::Admin, "source": "bootstrap" })),
    )
    .await?;

    info!(user_id = %user_id, "Bootstrapped first admin account");
    Ok(true)
}

/// Admin-authorized handle on the account database
pub struct AdminContext {
    pool: SqlitePool,
    admin: UserId,
}

impl AdminContext {
    /// Authorize `session` for admin operations
    ///
    /// The role is checked against the database, not the session snapshot.
    ///
    /// # Errors
    /// `PermissionDenied` if the user is not an admin
    pub async fn new(pool: SqlitePool, session: &Session) -> Result<Self> {
        if !roles::has_role(&pool, &session.user_id, Role::Admin).await? {
            warn!(user_id = %session.user_id, "Admin access denied");
            return Err(TilawahError::PermissionDeniedWithContext(
                "admin role required".to_string(),
            ));
        }
        Ok(Self {
            pool,
            admin: session.user_id.clone(),
        })
    }

    pub fn admin_id(&self) -> &UserId {
        &self.admin
    }

    /// All accounts with profile and roles, newest first
    pub async fn list_users(&self) -> Result<Vec<UserWithProfile>> {
        let rows = sqlx::query(
            "SELECT id, email, created_at, last_sign_in_at FROM users ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut profiles: HashMap<UserId, _> = profiles::list(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.user_id.clone(), p))
            .collect();

        let role_rows = sqlx::query("SELECT user_id, role FROM user_roles ORDER BY role")
            .fetch_all(&self.pool)
            .await?;
        let mut roles_by_user: HashMap<UserId, Vec<Role>> = HashMap::new();
        for row in &role_rows {
            let user_id: UserId = row.try_get("user_id")?;
            let role: String = row.try_get("role")?;
            if let Some(role) = Role::from_str(&role) {
                roles_by_user.entry(user_id).or_default().push(role);
            }
        }

        rows.iter()
            .map(|row| -> Result<UserWithProfile> {
                let id: UserId = row.try_get("id")?;
                Ok(UserWithProfile {
                    email: row.try_get("email")?,
                    created_at: row.try_get("created_at")?,
                    last_sign_in_at: row.try_get("last_sign_in_at")?,
                    profile: profiles.remove(&id),
                    roles: roles_by_user.remove(&id).unwrap_or_default(),
                    id,
                })
            })
            .collect()
    }

    /// Ban a user with a reason
    pub async fn ban_user(&self, user_id: &UserId, reason: &str) -> Result<()> {
        if user_id == &self.admin {
            return Err(TilawahError::invalid_input("Admins cannot ban themselves"));
        }
        self.require_user(user_id).await?;

        profiles::set_banned(&self.pool, user_id, true, Some(reason)).await?;
        activity_logs::log(
            &self.pool,
            Some(&self.admin),
            "user_banned",
            Some(json!({ "user_id": user_id, "reason": reason })),
        )
        .await?;

        info!(admin = %self.admin, user_id = %user_id, "User banned");
        Ok(())
    }

    /// Lift a ban
    pub async fn unban_user(&self, user_id: &UserId) -> Result<()> {
        self.require_user(user_id).await?;

        profiles::set_banned(&self.pool, user_id, false, None).await?;
        activity_logs::log(
            &self.pool,
            Some(&self.admin),
            "user_unbanned",
            Some(json!({ "user_id": user_id })),
        )
        .await?;

        info!(admin = %self.admin, user_id = %user_id, "User unbanned");
        Ok(())
    }

    /// Replace a user's roles with `role`
    pub async fn change_role(&self, user_id: &UserId, role: Role) -> Result<()> {
        self.require_user(user_id).await?;

        roles::replace_role(&self.pool, user_id, role).await?;
        activity_logs::log(
            &self.pool,
            Some(&self.admin),
            "role_changed",
            Some(json!({ "user_id": user_id, "new_role": role })),
        )
        .await?;

        info!(admin = %self.admin, user_id = %user_id, role = %role, "Role changed");
        Ok(())
    }

    /// Dashboard counters
    pub async fn stats(&self) -> Result<AdminStats> {
        let total_users = profiles::count(&self.pool, false).await?;
        let banned_users = profiles::count(&self.pool, true).await?;

        Ok(AdminStats {
            total_users,
            active_users: total_users - banned_users,
            banned_users,
            total_bookmarks: bookmarks::count(&self.pool).await?,
            total_notes: notes::count(&self.pool).await?,
            admin_count: roles::count_by_role(&self.pool, Role::Admin).await?,
            moderator_count: roles::count_by_role(&self.pool, Role::Moderator).await?,
        })
    }

    /// Recent activity, newest first (default 50 entries)
    pub async fn activity_logs(&self, limit: Option<i64>) -> Result<Vec<ActivityLog>> {
        activity_logs::recent(&self.pool, limit).await
    }

    async fn require_user(&self, user_id: &UserId) -> Result<()> {
        if accounts::exists(&self.pool, user_id).await? {
            Ok(())
        } else {
            Err(TilawahError::UserNotFound(user_id.clone()))
        }
    }
}
