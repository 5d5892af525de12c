use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::warn;

use crate::model::user::ROLE_ADMIN;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_service: Arc<UserServiceImpl>,
}

/// Session context resolved once at the application boundary and threaded
/// into handlers as a request extension; views never re-fetch it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

async fn authenticate(
    state: &AuthState,
    headers: &axum::http::HeaderMap,
) -> Result<AuthSession, StatusCode> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let claims = state
        .jwt_utils
        .validate_access_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // Authorization reads the profile row, not the token claim; a missing
    // row or attribute defaults the effective role to "user".
    let role = state.user_service.resolve_role(&claims.sub).await;

    Ok(AuthSession {
        user_id: claims.sub,
        email: claims.email,
        role,
    })
}

/// Gate for protected views: unauthenticated sessions never reach the handler.
pub async fn auth_gate(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let session = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Gate for administrative views: any non-admin role is refused.
pub async fn admin_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let session = authenticate(&state, req.headers()).await?;

    if session.role != ROLE_ADMIN {
        warn!("Admin access denied for {} (role: {})", session.user_id, session.role);
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
