use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, MessageResponse, PublicUser, RegisterRequest,
            RegisterResponse, VerifyResponse,
        },
        extractors::AuthUser,
        jwt::JwtKeys,
    },
    error::ApiError,
    state::AppState,
    store::Role,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify", get(verify))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }

    // Unknown email and wrong password answer identically to avoid user
    // enumeration.
    let user = match state.store.find_by_email(&payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login with unknown email");
            return Err(ApiError::Unauthenticated("Invalid credentials".into()));
        }
    };

    let ok = user
        .verify_password(&payload.password)
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::Unauthenticated("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// Re-resolves the caller from the store, so a deleted user gets 404 here
/// even while the token itself still verifies.
#[instrument(skip(state))]
pub async fn verify(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<VerifyResponse>, ApiError> {
    let user = state
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(VerifyResponse {
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let caller = state.store.find_by_id(caller_id).await?;
    let is_admin = matches!(caller, Some(ref u) if u.role == Role::Admin);
    if !is_admin {
        warn!(caller_id = %caller_id, "non-admin attempted registration");
        return Err(ApiError::Forbidden("Only admins can register new users".into()));
    }

    let role = payload.role.unwrap_or(Role::User);
    let user = state
        .store
        .create(&payload.email, &payload.password, role)
        .await?;

    info!(user_id = %user.id, email = %user.email, role = ?user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: PublicUser::from(&user),
        }),
    ))
}

/// Tokens are stateless and cannot be revoked server-side; the client is
/// responsible for discarding its copy.
#[instrument]
pub async fn logout(AuthUser(user_id): AuthUser) -> Json<MessageResponse> {
    info!(user_id = %user_id, "user logged out");
    Json(MessageResponse {
        message: "Logged out successfully".into(),
    })
}
