/// Admin console types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Profile, Role};
use super::ids::UserId;

/// Account row as shown in the admin user list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithProfile {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    pub profile: Option<Profile>,
    pub roles: Vec<Role>,
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub active_users: i64,
    pub banned_users: i64,
    pub total_bookmarks: i64,
    pub total_notes: i64,
    pub admin_count: i64,
    pub moderator_count: i64,
}

/// Audit trail entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,

    /// Acting user (none for anonymous/system actions)
    pub user_id: Option<UserId>,

    pub action: String,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
