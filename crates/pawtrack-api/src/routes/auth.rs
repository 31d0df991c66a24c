//! Account routes: registration, login, token refresh, user management, and
//! the extended profile.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pawtrack_common::{
    config,
    envelope::ApiResponse,
    error::{PawtrackError, PawtrackResult},
    id::generate_id,
    models::user::{
        ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
        UpdateUserRequest, User, UserProfile, UserResponse,
    },
    validation::{normalize_email, validate_request},
};
use pawtrack_db::repository::{profiles, users};

use crate::auth::{self, TokenPair};
use crate::middleware::{self, AuthContext};
use crate::routes::Pagination;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/token/refresh", post(refresh));

    let protected = Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(me).patch(update_me))
        .route("/users/change-password", post(change_password))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/profiles/me", get(my_profile).patch(update_my_profile))
        .route(
            "/profiles/{user_id}",
            get(get_profile).patch(update_user_profile),
        )
        .route_layer(axum::middleware::from_fn(middleware::auth_middleware));

    public.merge(protected)
}

/// User plus token pair, returned on register/login.
#[derive(Serialize)]
struct AuthResponse {
    user: UserResponse,
    tokens: TokenPair,
}

fn issue_tokens(user: &User) -> PawtrackResult<TokenPair> {
    let cfg = config::get();
    auth::generate_token_pair(
        user.id,
        &user.email,
        user.role,
        &cfg.auth.jwt_secret,
        cfg.auth.access_token_ttl_secs,
        cfg.auth.refresh_token_ttl_secs,
    )
    .map_err(|e| PawtrackError::Internal(anyhow::anyhow!("token generation failed: {e}")))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    if body.password != body.password_confirm {
        return Err(PawtrackError::Validation {
            message: "Password fields didn't match".into(),
        });
    }

    let email = normalize_email(&body.email);
    if users::find_by_email(&state.db.pool, &email).await?.is_some() {
        return Err(PawtrackError::AlreadyExists {
            resource: "User with this email".into(),
        });
    }

    let password_hash = auth::hash_password(&body.password)
        .map_err(|e| PawtrackError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;

    let user = users::create_user(
        &state.db.pool,
        generate_id(),
        &email,
        &password_hash,
        &body.first_name,
        &body.last_name,
        body.phone_number.as_deref(),
    )
    .await?;

    tracing::info!(user_id = %user.id, "user registered");

    let tokens = issue_tokens(&user)?;
    Ok(ApiResponse::created(
        "User registered successfully",
        AuthResponse {
            user: user.into(),
            tokens,
        },
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;

    let user = users::find_by_email(&state.db.pool, &normalize_email(&body.email))
        .await?
        .ok_or(PawtrackError::InvalidCredentials)?;

    let verified = auth::verify_password(&body.password, &user.password_hash)
        .map_err(|e| PawtrackError::Internal(anyhow::anyhow!("password verification failed: {e}")))?;
    if !verified || !user.is_active {
        return Err(PawtrackError::InvalidCredentials);
    }

    users::touch_last_login(&state.db.pool, user.id).await?;
    tracing::info!(user_id = %user.id, "user logged in");

    let tokens = issue_tokens(&user)?;
    Ok(ApiResponse::ok(
        "Login successful",
        AuthResponse {
            user: user.into(),
            tokens,
        },
    ))
}

#[derive(Deserialize)]
struct RefreshRequest {
    refresh_token: String,
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequest>,
) -> PawtrackResult<impl IntoResponse> {
    let secret = &config::get().auth.jwt_secret;
    let claims =
        auth::validate_token(&body.refresh_token, secret).map_err(middleware::map_token_error)?;
    if claims.token_type != "refresh" {
        return Err(PawtrackError::InvalidToken);
    }

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| PawtrackError::InvalidToken)?;
    let user = users::find_by_id(&state.db.pool, user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(PawtrackError::InvalidToken)?;

    let tokens = issue_tokens(&user)?;
    Ok(ApiResponse::ok("Token refreshed successfully", tokens))
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let user = users::find_by_id(&state.db.pool, auth.user_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;
    Ok(ApiResponse::ok(
        "User retrieved successfully",
        UserResponse::from(user),
    ))
}

async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<UpdateUserRequest>,
) -> PawtrackResult<impl IntoResponse> {
    apply_user_update(&state, auth.user_id, &body).await
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<Pagination>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    let (limit, offset) = page.resolve();
    let list = users::list_users(&state.db.pool, limit, offset).await?;
    let list: Vec<UserResponse> = list.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok("Users retrieved successfully", list))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_access(id)?;
    let user = users::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;
    Ok(ApiResponse::ok(
        "User retrieved successfully",
        UserResponse::from(user),
    ))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_access(id)?;
    apply_user_update(&state, id, &body).await
}

async fn apply_user_update(
    state: &AppState,
    id: Uuid,
    body: &UpdateUserRequest,
) -> PawtrackResult<ApiResponse<UserResponse>> {
    validate_request(body)?;

    users::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;

    let user = users::update_user(
        &state.db.pool,
        id,
        body.first_name.as_deref(),
        body.last_name.as_deref(),
        body.phone_number.as_deref(),
        body.profile_picture.as_deref(),
        body.is_veterinarian,
    )
    .await?;

    Ok(ApiResponse::ok(
        "User updated successfully",
        UserResponse::from(user),
    ))
}

/// Soft delete (deactivate) an account. Admin only, and never your own.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    if id == auth.user_id {
        return Err(PawtrackError::Validation {
            message: "You cannot deactivate your own account".into(),
        });
    }

    users::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;

    users::deactivate_user(&state.db.pool, id).await?;
    tracing::info!(user_id = %id, "user deactivated");
    Ok(ApiResponse::message("User deactivated successfully"))
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<ChangePasswordRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    if body.new_password != body.new_password_confirm {
        return Err(PawtrackError::Validation {
            message: "Password fields didn't match".into(),
        });
    }
    if body.new_password == body.old_password {
        return Err(PawtrackError::Validation {
            message: "New password must be different from the current password".into(),
        });
    }

    let user = users::find_by_id(&state.db.pool, auth.user_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;

    let verified = auth::verify_password(&body.old_password, &user.password_hash)
        .map_err(|e| PawtrackError::Internal(anyhow::anyhow!("password verification failed: {e}")))?;
    if !verified {
        return Err(PawtrackError::Validation {
            message: "Current password is incorrect".into(),
        });
    }

    let password_hash = auth::hash_password(&body.new_password)
        .map_err(|e| PawtrackError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;
    users::update_password(&state.db.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = %user.id, "password changed");
    Ok(ApiResponse::message("Password changed successfully"))
}

async fn my_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let profile = profiles::get_or_create(&state.db.pool, auth.user_id).await?;
    Ok(ApiResponse::ok("Profile retrieved successfully", profile))
}

async fn update_my_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<UpdateProfileRequest>,
) -> PawtrackResult<impl IntoResponse> {
    apply_profile_update(&state, auth.user_id, &body).await
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_access(user_id)?;
    users::find_by_id(&state.db.pool, user_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;
    let profile = profiles::get_or_create(&state.db.pool, user_id).await?;
    Ok(ApiResponse::ok("Profile retrieved successfully", profile))
}

async fn update_user_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateProfileRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_access(user_id)?;
    users::find_by_id(&state.db.pool, user_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;
    apply_profile_update(&state, user_id, &body).await
}

async fn apply_profile_update(
    state: &AppState,
    user_id: Uuid,
    body: &UpdateProfileRequest,
) -> PawtrackResult<ApiResponse<UserProfile>> {
    validate_request(body)?;

    // Ensure the row exists before the partial update
    profiles::get_or_create(&state.db.pool, user_id).await?;

    let profile = profiles::update_profile(
        &state.db.pool,
        user_id,
        body.phone.as_deref(),
        body.location.as_deref(),
        body.is_active,
    )
    .await?;

    Ok(ApiResponse::ok("Profile updated successfully", profile))
}
