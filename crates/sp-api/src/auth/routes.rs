use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_db::{
    models::{UserRole, UserTheme},
    repositories::user as user_repo,
};

use super::{jwt, middleware::AuthUser};
use crate::{ApiState, error::ApiError, middleware::rate_limit, validation};

/// Create the auth routes. Signup and login are brute-force targets, so the
/// whole group sits behind the strict rate limit.
pub fn routes() -> Router<ApiState> {
    rate_limit::apply_auth_rate_limit(
        Router::new()
            .route("/auth/signup", post(signup))
            .route("/auth/login", post(login))
            .route("/auth/me", get(me)),
    )
}

#[derive(Debug, Deserialize)]
struct SignupRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    id: Uuid,
    name: String,
    email: String,
    role: UserRole,
    theme: UserTheme,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    message: String,
    token: String,
    user: UserResponse,
}

async fn signup(
    State(state): State<ApiState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validation::validate_name(&payload.name)?;
    validation::validate_email(&payload.email)?;
    validation::validate_password(&payload.password)?;

    let name = payload.name.trim().to_string();
    let email = payload.email.to_lowercase();

    if user_repo::email_exists(&state.pool, &email).await? {
        return Err(ApiError::Validation(
            "user with this email already exists".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&payload.password, state.bcrypt_cost)?;
    let user_id = user_repo::create(&state.pool, &name, &email, &password_hash).await?;

    let token = jwt::generate_jwt_token(
        user_id,
        email.clone(),
        &state.jwt_secret,
        state.jwt_expiry_hours,
    )?;

    tracing::info!(%user_id, "new account registered");

    Ok(Json(AuthResponse {
        message: "User created successfully".to_string(),
        token,
        user: UserResponse {
            id: user_id,
            name,
            email,
            role: UserRole::User,
            theme: UserTheme::System,
        },
    }))
}

async fn login(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = payload.email.to_lowercase();

    // One indistinct message for both failure modes; no account enumeration.
    let user = user_repo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid email or password".to_string()))?;

    let password_valid = bcrypt::verify(&payload.password, &user.password_hash)?;
    if !password_valid {
        return Err(ApiError::Auth("Invalid email or password".to_string()));
    }

    let token = jwt::generate_jwt_token(
        user.id,
        user.email.clone(),
        &state.jwt_secret,
        state.jwt_expiry_hours,
    )?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            theme: user.theme,
        },
    }))
}

async fn me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        theme: user.theme,
    }))
}
