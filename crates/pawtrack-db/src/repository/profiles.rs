//! User profile repository.
//!
//! Profiles are created lazily: the first read for a user inserts an empty
//! row, so callers never see a missing profile for an existing account.

use pawtrack_common::models::user::UserProfile;
use sqlx::PgPool;
use uuid::Uuid;

/// Fetch the profile for a user, creating an empty one if none exists.
pub async fn get_or_create(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO user_profiles (user_id, created_at, updated_at)
        VALUES ($1, NOW(), NOW())
        ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING *
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Update profile fields.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    phone: Option<&str>,
    location: Option<&str>,
    is_active: Option<bool>,
) -> Result<UserProfile, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE user_profiles SET
            phone = COALESCE($2, phone),
            location = COALESCE($3, location),
            is_active = COALESCE($4, is_active),
            updated_at = NOW()
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(phone)
    .bind(location)
    .bind(is_active)
    .fetch_one(pool)
    .await
}
