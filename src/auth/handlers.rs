use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::{
    dto::{PublicUser, RegisterRequest, TokenForm, TokenResponse},
    extractors::CurrentUser,
    jwt::JwtKeys,
    password::hash_password,
    repo::User,
    services::{authenticate, is_valid_email},
};
use crate::error::{conflict_on_unique, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
        .route("/users/me/", get(get_me))
        .route("/users/:id", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());

    if payload.username.is_empty() {
        return Err(ApiError::InvalidInput("'username' must not be empty".into()));
    }
    if payload.password.len() < 6 {
        warn!(username = %payload.username, "password too short");
        return Err(ApiError::InvalidInput(
            "'password' must be at least 6 characters".into(),
        ));
    }
    if let Some(email) = &payload.email {
        if !is_valid_email(email) {
            return Err(ApiError::InvalidInput("'email' is not a valid address".into()));
        }
    }
    if let Some(goal) = payload.daily_calorie_goal {
        if goal <= 0 {
            return Err(ApiError::InvalidInput(
                "'daily_calorie_goal' must be positive".into(),
            ));
        }
    }

    // Fast-path existence checks; the unique indexes remain authoritative.
    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already taken");
        return Err(ApiError::Conflict(format!(
            "Username '{}' is already taken",
            payload.username
        )));
    }
    if let Some(email) = &payload.email {
        if User::find_by_email(&state.db, email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(ApiError::Conflict(format!(
                "Email '{email}' is already in use"
            )));
        }
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.username,
        payload.email.as_deref(),
        &hash,
        payload.daily_calorie_goal,
    )
    .await
    .map_err(|e| conflict_on_unique(e, "Username or email is already in use"))?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, form))]
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = authenticate(&state.db, &form.username, &form.password)
        .await?
        .ok_or_else(|| {
            warn!(username = %form.username, "login failed");
            ApiError::Unauthorized("Incorrect username or password".into())
        })?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(&user.username)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}

#[instrument(skip(state, _caller))]
pub async fn get_user(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(PublicUser::from(user)))
}
