//! User subscription repository.

use chrono::NaiveDate;
use pawtrack_common::models::subscription::{SubscriptionStatus, UserSubscription};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a user subscription.
#[allow(clippy::too_many_arguments)]
pub async fn create_subscription(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    plan_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: SubscriptionStatus,
    is_active: bool,
    auto_renew: bool,
) -> Result<UserSubscription, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>(
        r#"
        INSERT INTO user_subscriptions (
            id, user_id, plan_id, start_date, end_date, status, is_active,
            auto_renew, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(plan_id)
    .bind(start_date)
    .bind(end_date)
    .bind(status)
    .bind(is_active)
    .bind(auto_renew)
    .fetch_one(pool)
    .await
}

/// Find a subscription by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserSubscription>, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>("SELECT * FROM user_subscriptions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// True when the user already holds a non-cancelled subscription whose date
/// window intersects `[start_date, end_date]`. SQL form of
/// [`pawtrack_common::models::subscription::windows_overlap`].
pub async fn has_overlapping(
    pool: &PgPool,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude_id: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM user_subscriptions
            WHERE user_id = $1
              AND status <> 'cancelled'
              AND start_date <= $3
              AND end_date >= $2
              AND ($4::UUID IS NULL OR id <> $4)
        )
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// List a user's subscriptions, most recent window first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserSubscription>, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>(
        "SELECT * FROM user_subscriptions WHERE user_id = $1 ORDER BY start_date DESC, created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// List all subscriptions (admin).
pub async fn list_all(pool: &PgPool) -> Result<Vec<UserSubscription>, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>(
        "SELECT * FROM user_subscriptions ORDER BY start_date DESC, created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// The user's currently active subscription, if any.
pub async fn find_active_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserSubscription>, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>(
        r#"
        SELECT * FROM user_subscriptions
        WHERE user_id = $1 AND is_active = TRUE AND status = 'active'
        ORDER BY start_date DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// The user's most recent subscription regardless of status.
pub async fn find_latest_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserSubscription>, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>(
        r#"
        SELECT * FROM user_subscriptions
        WHERE user_id = $1
        ORDER BY start_date DESC, created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Update a subscription's window, plan, and derived state.
#[allow(clippy::too_many_arguments)]
pub async fn update_subscription(
    pool: &PgPool,
    id: Uuid,
    plan_id: Option<Uuid>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: SubscriptionStatus,
    is_active: bool,
    auto_renew: Option<bool>,
) -> Result<UserSubscription, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>(
        r#"
        UPDATE user_subscriptions SET
            plan_id = COALESCE($2, plan_id),
            start_date = $3,
            end_date = $4,
            status = $5,
            is_active = $6,
            auto_renew = COALESCE($7, auto_renew),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(plan_id)
    .bind(start_date)
    .bind(end_date)
    .bind(status)
    .bind(is_active)
    .bind(auto_renew)
    .fetch_one(pool)
    .await
}

/// Cancel a subscription.
pub async fn cancel_subscription(pool: &PgPool, id: Uuid) -> Result<UserSubscription, sqlx::Error> {
    sqlx::query_as::<_, UserSubscription>(
        r#"
        UPDATE user_subscriptions SET
            status = 'cancelled',
            is_active = FALSE,
            cancelled_at = NOW(),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a subscription.
pub async fn delete_subscription(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM user_subscriptions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
