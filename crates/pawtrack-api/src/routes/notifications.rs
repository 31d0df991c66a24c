//! Notification routes — one inbox per user.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use pawtrack_common::{
    envelope::ApiResponse,
    error::{PawtrackError, PawtrackResult},
    id::generate_id,
    models::notification::{Notification, NotificationRequest, UpdateNotificationRequest},
    validation::validate_request,
};
use pawtrack_db::repository::{notifications, users};

use crate::middleware::{self, AuthContext};
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/unread", get(list_unread))
        .route(
            "/{id}",
            get(get_notification)
                .patch(update_notification)
                .delete(delete_notification),
        )
        .route("/{id}/mark-read", post(mark_read))
        .route_layer(axum::middleware::from_fn(middleware::auth_middleware))
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let list = if auth.is_admin() {
        notifications::list_all(&state.db.pool).await?
    } else {
        notifications::list_for_user(&state.db.pool, auth.user_id, false).await?
    };
    Ok(ApiResponse::ok("Notifications retrieved successfully", list))
}

async fn list_unread(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let list = notifications::list_for_user(&state.db.pool, auth.user_id, true).await?;
    Ok(ApiResponse::ok(
        "Unread notifications retrieved successfully",
        list,
    ))
}

async fn create_notification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<NotificationRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    validate_request(&body)?;

    users::find_by_id(&state.db.pool, body.user_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;

    let notification = notifications::create_notification(
        &state.db.pool,
        generate_id(),
        body.user_id,
        body.notification_type,
        &body.title,
        &body.message,
    )
    .await?;

    Ok(ApiResponse::created(
        "Notification created successfully",
        notification,
    ))
}

async fn load_notification(
    state: &AppState,
    auth: &AuthContext,
    id: Uuid,
) -> PawtrackResult<Notification> {
    let notification = notifications::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Notification".into(),
        })?;
    auth.require_access(notification.user_id)?;
    Ok(notification)
}

async fn get_notification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let notification = load_notification(&state, &auth, id).await?;
    Ok(ApiResponse::ok(
        "Notification retrieved successfully",
        notification,
    ))
}

async fn update_notification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNotificationRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    validate_request(&body)?;
    let existing = load_notification(&state, &auth, id).await?;

    let notification = notifications::update_notification(
        &state.db.pool,
        existing.id,
        body.notification_type,
        body.title.as_deref(),
        body.message.as_deref(),
        body.is_read,
    )
    .await?;

    Ok(ApiResponse::ok(
        "Notification updated successfully",
        notification,
    ))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let existing = load_notification(&state, &auth, id).await?;
    let notification = notifications::mark_read(&state.db.pool, existing.id).await?;
    Ok(ApiResponse::ok(
        "Notification marked as read",
        notification,
    ))
}

async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    // Owners may read and mark read; only admins manage the inbox contents
    auth.require_admin()?;
    let existing = load_notification(&state, &auth, id).await?;
    notifications::delete_notification(&state.db.pool, existing.id).await?;
    Ok(ApiResponse::message("Notification deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawtrack_common::models::user::UserRole;

    fn ctx(role: UserRole) -> AuthContext {
        AuthContext {
            user_id: Uuid::now_v7(),
            email: "pat@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_only_admins_may_delete_notifications() {
        // Deleting is gated before the ownership check ever runs
        assert!(ctx(UserRole::Admin).require_admin().is_ok());
        assert!(matches!(
            ctx(UserRole::User).require_admin(),
            Err(PawtrackError::Forbidden)
        ));
    }
}
