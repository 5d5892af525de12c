use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// Auth profile row. `role` is "user" or "admin"; a missing attribute is
/// treated as "user" wherever the role is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl User {
    /// Effective role, defaulting absent/empty values to "user".
    pub fn effective_role(&self) -> &str {
        match self.role.as_deref() {
            Some(r) if !r.is_empty() => r,
            _ => ROLE_USER,
        }
    }
}
