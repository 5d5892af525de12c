use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::User;

/// Profile row as exposed to the admin role editor; the password hash
/// never leaves the service layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<String>,
}

impl From<User> for ProfileDto {
    fn from(u: User) -> Self {
        let role = u.effective_role().to_string();
        ProfileDto {
            id: u.id.map(|id| id.to_string()).unwrap_or_default(),
            email: u.email,
            role,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1))]
    pub role: String,
}
