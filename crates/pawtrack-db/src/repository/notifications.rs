//! Notification repository.

use pawtrack_common::models::notification::{Notification, NotificationType};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a notification.
pub async fn create_notification(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    notification_type: NotificationType,
    title: &str,
    message: &str,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (id, user_id, notification_type, title, message, is_read, created_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(notification_type)
    .bind(title)
    .bind(message)
    .fetch_one(pool)
    .await
}

/// Find a notification by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List one user's notifications; `unread_only` narrows to unread.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    unread_only: bool,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        SELECT * FROM notifications
        WHERE user_id = $1 AND ($2 = FALSE OR is_read = FALSE)
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(unread_only)
    .fetch_all(pool)
    .await
}

/// List all notifications (admin).
pub async fn list_all(pool: &PgPool) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>("SELECT * FROM notifications ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Update a notification.
pub async fn update_notification(
    pool: &PgPool,
    id: Uuid,
    notification_type: Option<NotificationType>,
    title: Option<&str>,
    message: Option<&str>,
    is_read: Option<bool>,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        UPDATE notifications SET
            notification_type = COALESCE($2, notification_type),
            title = COALESCE($3, title),
            message = COALESCE($4, message),
            is_read = COALESCE($5, is_read)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(notification_type)
    .bind(title)
    .bind(message)
    .bind(is_read)
    .fetch_one(pool)
    .await
}

/// Mark a notification read.
pub async fn mark_read(pool: &PgPool, id: Uuid) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a notification.
pub async fn delete_notification(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM notifications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
