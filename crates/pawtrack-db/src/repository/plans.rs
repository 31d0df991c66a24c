//! Subscription plan repository.

use pawtrack_common::models::subscription::{PlanType, SubscriptionPlan};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a subscription plan.
#[allow(clippy::too_many_arguments)]
pub async fn create_plan(
    pool: &PgPool,
    id: Uuid,
    plan_type: PlanType,
    name: &str,
    description: Option<&str>,
    price: f64,
    duration_days: i32,
    max_pets: i32,
    features: &[String],
    is_active: bool,
) -> Result<SubscriptionPlan, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>(
        r#"
        INSERT INTO subscription_plans (
            id, plan_type, name, description, price, duration_days, max_pets,
            features, is_active, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(plan_type)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(duration_days)
    .bind(max_pets)
    .bind(sqlx::types::Json(features.to_vec()))
    .bind(is_active)
    .fetch_one(pool)
    .await
}

/// Find a plan by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Find a plan by its unique type.
pub async fn find_by_type(pool: &PgPool, plan_type: PlanType) -> Result<Option<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plans WHERE plan_type = $1")
        .bind(plan_type)
        .fetch_optional(pool)
        .await
}

/// List plans; when `active_only` is set, hide retired plans.
pub async fn list_plans(pool: &PgPool, active_only: bool) -> Result<Vec<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>(
        r#"
        SELECT * FROM subscription_plans
        WHERE ($1 = FALSE OR is_active = TRUE)
        ORDER BY plan_type, name
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await
}

/// Update a plan.
#[allow(clippy::too_many_arguments)]
pub async fn update_plan(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
    price: Option<f64>,
    duration_days: Option<i32>,
    max_pets: Option<i32>,
    features: Option<&[String]>,
    is_active: Option<bool>,
) -> Result<SubscriptionPlan, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionPlan>(
        r#"
        UPDATE subscription_plans SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            duration_days = COALESCE($5, duration_days),
            max_pets = COALESCE($6, max_pets),
            features = COALESCE($7, features),
            is_active = COALESCE($8, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(duration_days)
    .bind(max_pets)
    .bind(features.map(|f| sqlx::types::Json(f.to_vec())))
    .bind(is_active)
    .fetch_one(pool)
    .await
}

/// Delete a plan. Fails while subscriptions still reference it (FK RESTRICT).
pub async fn delete_plan(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM subscription_plans WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
