//! Authentication API endpoints
//!
//! Registration, login and current-user lookup for bearer token auth.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireIdentity;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::Identity;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/user", get(get_current_user))
}

/// Username/password pair for login and registration
#[derive(Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: Identity,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: String,
}

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let identity = state
        .auth_service
        .register(&request.username, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: format!("User registered successfully: {}", identity.subject),
            user: identity,
        }),
    ))
}

/// Login with username and password
///
/// POST /auth/login
///
/// Returns a bearer token on successful authentication.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let issued = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at.to_rfc3339(),
    }))
}

/// Get the authenticated user
///
/// GET /auth/user
pub async fn get_current_user(RequireIdentity(identity): RequireIdentity) -> Json<Identity> {
    Json(identity)
}
