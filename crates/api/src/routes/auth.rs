//! Account routes: signup, login, logout and the token-protected resource
//!
//! Signup and login are posted from the HTML login page as forms and answer
//! with a redirect to `/`. Issued tokens are stored on the user row.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Redirect,
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use ipchat_shared::User;

use crate::{
    auth::{authenticate, hash_password, validate_password, verify_password},
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Create an account
pub async fn signup(
    State(state): State<AppState>,
    Form(req): Form<SignupRequest>,
) -> ApiResult<Redirect> {
    if !state.config.enable_signup {
        return Err(ApiError::BadRequest(
            "Registration is currently disabled".to_string(),
        ));
    }

    let email = req.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }
    validate_password(&req.password).map_err(|e| ApiError::Validation(e.to_string()))?;

    let exists: Option<(bool,)> =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(&email)
            .fetch_optional(&state.pool)
            .await?;

    if exists.map(|r| r.0).unwrap_or(false) {
        return Err(ApiError::EmailAlreadyExists);
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "signup: Password hashing failed");
        ApiError::Internal
    })?;

    let user_id = Uuid::new_v4();
    let token = state.jwt_manager.generate_token(user_id, &email).map_err(|e| {
        tracing::error!(error = %e, "signup: Token generation failed");
        ApiError::Internal
    })?;

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, token)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(user_id)
    .bind(req.username.trim())
    .bind(&email)
    .bind(&password_hash)
    .bind(&token)
    .execute(&state.pool)
    .await
    .map_err(|e| match ApiError::from(e) {
        // Lost a race with a concurrent signup for the same address
        ApiError::Conflict(_) => ApiError::EmailAlreadyExists,
        other => other,
    })?;

    tracing::info!(user_id = %user_id, "signup: Account created");

    Ok(Redirect::to("/"))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Form(req): Form<LoginRequest>,
) -> ApiResult<Redirect> {
    let email = req.email.trim().to_lowercase();

    let user: User = sqlx::query_as(
        r#"
        SELECT id, username, email, password_hash, token, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(&email)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| {
        tracing::warn!(email = %email, "login: User not found");
        ApiError::InvalidCredentials
    })?;

    if req.password.is_empty() || user.password_hash.is_empty() {
        return Err(ApiError::BadRequest(
            "Password not provided or invalid format".to_string(),
        ));
    }

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        tracing::error!(error = %e, user_id = %user.id, "login: Stored hash is unreadable");
        ApiError::Internal
    })?;

    if !valid {
        tracing::warn!(user_id = %user.id, "login: Wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt_manager
        .generate_token(user.id, &user.email)
        .map_err(|e| {
            tracing::error!(error = %e, "login: Token generation failed");
            ApiError::Internal
        })?;

    sqlx::query("UPDATE users SET token = $1, updated_at = NOW() WHERE id = $2")
        .bind(&token)
        .bind(user.id)
        .execute(&state.pool)
        .await?;

    tracing::info!(user_id = %user.id, "login: Success");

    Ok(Redirect::to("/"))
}

/// Log out, clearing the stored token when the caller presents a valid one
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if let Ok(claims) = authenticate(&state.jwt_manager, &headers) {
        if let Err(e) = sqlx::query("UPDATE users SET token = NULL, updated_at = NOW() WHERE id = $1")
            .bind(claims.sub)
            .execute(&state.pool)
            .await
        {
            tracing::error!(error = ?e, user_id = %claims.sub, "logout: Failed to clear token");
        }
    }

    Redirect::to("/")
}

/// Resource gated on a valid bearer token
pub async fn protected(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<&'static str> {
    authenticate(&state.jwt_manager, &headers)?;
    Ok("This is a protected resource")
}

/// Basic structural email check
fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_alphanumeric() || ".+-_".contains(c))
    {
        return false;
    }

    let is_edge = |c: char| c == '.' || c == '-';
    if domain.starts_with(is_edge) || domain.ends_with(is_edge) || domain.contains("..") {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.len() >= 2 && tld.chars().all(|c| c.is_alphabetic()),
        None => false,
    }
}
