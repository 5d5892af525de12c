use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::dto::user_dto::ProfileDto;
use crate::model::user::{User, ROLE_ADMIN, ROLE_USER};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct UserAuthResponse {
    pub user: ProfileDto,
    pub tokens: AuthTokens,
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, email: String, password: String, role: &str) -> Result<UserAuthResponse, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<UserAuthResponse, ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<AuthTokens, ServiceError>;
    /// Effective role for a session subject; absence of a profile row or
    /// role attribute defaults to "user".
    async fn resolve_role(&self, user_id: &str) -> String;
    async fn list_profiles(&self) -> Result<Vec<ProfileDto>, ServiceError>;
    async fn update_role(&self, user_id: &str, role: &str) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { user_repo, jwt_utils }
    }

    fn auth_response(&self, user: User) -> Result<UserAuthResponse, ServiceError> {
        let user_id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let role = user.effective_role().to_string();
        let tokens = self
            .jwt_utils
            .generate_token_pair(&user_id, &user.email, &role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        Ok(UserAuthResponse {
            user: ProfileDto::from(user),
            tokens: AuthTokens {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires_in: tokens.expires_in,
                token_type: tokens.token_type,
            },
        })
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, password), fields(email = %email, role = %role))]
    async fn register(&self, email: String, password: String, role: &str) -> Result<UserAuthResponse, ServiceError> {
        info!("Registering new profile");
        if let Some(_) = self.user_repo.find_by_email(&email).await? {
            error!("Profile already exists for email: {}", email);
            return Err(ServiceError::Conflict("Profile already exists for this email".to_string()));
        }
        let hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InvalidInput(format!("Password hash error: {}", e)))?;
        let user = User {
            id: None,
            email,
            password_hash: hash,
            role: Some(role.to_string()),
            created_at: None,
            updated_at: None,
        };
        let inserted = self.user_repo.insert(user).await;
        match &inserted {
            Ok(_) => info!("Profile inserted successfully"),
            Err(e) => error!("Failed to insert profile: {e}"),
        }
        self.auth_response(inserted?)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<UserAuthResponse, ServiceError> {
        info!("Login attempt");
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::NotFound("Profile not found".to_string()))?;
        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InvalidInput(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Invalid credentials for: {}", email);
            return Err(ServiceError::InvalidInput("Invalid credentials".to_string()));
        }
        info!("Login successful");
        self.auth_response(user)
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<AuthTokens, ServiceError> {
        let claims = self
            .jwt_utils
            .validate_refresh_token(&refresh_token)
            .map_err(|e| ServiceError::InvalidInput(format!("Invalid refresh token: {}", e)))?;
        // Role may have changed since the token was issued; re-read it.
        let role = self.resolve_role(&claims.sub).await;
        let tokens = self
            .jwt_utils
            .generate_token_pair(&claims.sub, &claims.email, &role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        Ok(AuthTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        })
    }

    async fn resolve_role(&self, user_id: &str) -> String {
        let object_id = match user_id.parse::<ObjectId>() {
            Ok(id) => id,
            Err(_) => {
                warn!("Session subject is not a valid profile id: {}", user_id);
                return ROLE_USER.to_string();
            }
        };
        match self.user_repo.find_by_id(&object_id).await {
            Ok(Some(user)) => user.effective_role().to_string(),
            Ok(None) => ROLE_USER.to_string(),
            Err(e) => {
                warn!("Failed to resolve role for {}: {} (defaulting to user)", user_id, e);
                ROLE_USER.to_string()
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_profiles(&self) -> Result<Vec<ProfileDto>, ServiceError> {
        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(ProfileDto::from).collect())
    }

    #[instrument(skip(self), fields(user_id = %user_id, role = %role))]
    async fn update_role(&self, user_id: &str, role: &str) -> Result<(), ServiceError> {
        if role != ROLE_USER && role != ROLE_ADMIN {
            return Err(ServiceError::InvalidInput(format!(
                "Role must be \"{}\" or \"{}\"",
                ROLE_USER, ROLE_ADMIN
            )));
        }
        let object_id = user_id
            .parse::<ObjectId>()
            .map_err(|_| ServiceError::InvalidInput("Invalid profile id".to_string()))?;
        self.user_repo.update_role(object_id, role).await?;
        info!("Role updated");
        Ok(())
    }
}
