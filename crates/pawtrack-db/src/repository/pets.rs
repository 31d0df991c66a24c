//! Pet repository — CRUD with soft delete.
//!
//! Default queries exclude soft-deleted rows; the `*_with_deleted` variants
//! exist for restore and microchip-uniqueness checks.

use pawtrack_common::models::pet::{Pet, PetGender, PetType};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new pet.
#[allow(clippy::too_many_arguments)]
pub async fn create_pet(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    name: &str,
    breed: Option<&str>,
    age: Option<i32>,
    weight: Option<f64>,
    gender: PetGender,
    pet_type: PetType,
    date_of_birth: Option<chrono::NaiveDate>,
    color: Option<&str>,
    profile_picture: Option<&str>,
    microchip_number: Option<&str>,
    notes: Option<&str>,
) -> Result<Pet, sqlx::Error> {
    sqlx::query_as::<_, Pet>(
        r#"
        INSERT INTO pets (
            id, owner_id, name, breed, age, weight, gender, pet_type,
            date_of_birth, color, profile_picture, microchip_number, notes,
            is_deleted, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, FALSE, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(name)
    .bind(breed)
    .bind(age)
    .bind(weight)
    .bind(gender)
    .bind(pet_type)
    .bind(date_of_birth)
    .bind(color)
    .bind(profile_picture)
    .bind(microchip_number)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Find a live pet by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Pet>, sqlx::Error> {
    sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = $1 AND is_deleted = FALSE")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Find a pet by ID, soft-deleted rows included (for restore).
pub async fn find_by_id_with_deleted(pool: &PgPool, id: Uuid) -> Result<Option<Pet>, sqlx::Error> {
    sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Find a pet by microchip number, soft-deleted rows included.
pub async fn find_by_microchip_with_deleted(
    pool: &PgPool,
    microchip_number: &str,
) -> Result<Option<Pet>, sqlx::Error> {
    sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE microchip_number = $1")
        .bind(microchip_number)
        .fetch_optional(pool)
        .await
}

/// List a user's live pets, newest first.
pub async fn list_owner_pets(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Pet>, sqlx::Error> {
    sqlx::query_as::<_, Pet>(
        r#"
        SELECT * FROM pets
        WHERE owner_id = $1 AND is_deleted = FALSE
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// List all live pets (admin listing).
pub async fn list_all_pets(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Pet>, sqlx::Error> {
    sqlx::query_as::<_, Pet>(
        "SELECT * FROM pets WHERE is_deleted = FALSE ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Update pet fields.
#[allow(clippy::too_many_arguments)]
pub async fn update_pet(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    breed: Option<&str>,
    age: Option<i32>,
    weight: Option<f64>,
    gender: Option<PetGender>,
    pet_type: Option<PetType>,
    date_of_birth: Option<chrono::NaiveDate>,
    color: Option<&str>,
    profile_picture: Option<&str>,
    microchip_number: Option<&str>,
    notes: Option<&str>,
) -> Result<Pet, sqlx::Error> {
    sqlx::query_as::<_, Pet>(
        r#"
        UPDATE pets SET
            name = COALESCE($2, name),
            breed = COALESCE($3, breed),
            age = COALESCE($4, age),
            weight = COALESCE($5, weight),
            gender = COALESCE($6, gender),
            pet_type = COALESCE($7, pet_type),
            date_of_birth = COALESCE($8, date_of_birth),
            color = COALESCE($9, color),
            profile_picture = COALESCE($10, profile_picture),
            microchip_number = COALESCE($11, microchip_number),
            notes = COALESCE($12, notes),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(breed)
    .bind(age)
    .bind(weight)
    .bind(gender)
    .bind(pet_type)
    .bind(date_of_birth)
    .bind(color)
    .bind(profile_picture)
    .bind(microchip_number)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Soft delete a pet.
pub async fn soft_delete_pet(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE pets SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Restore a soft-deleted pet.
pub async fn restore_pet(pool: &PgPool, id: Uuid) -> Result<Pet, sqlx::Error> {
    sqlx::query_as::<_, Pet>(
        r#"
        UPDATE pets SET is_deleted = FALSE, deleted_at = NULL, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}
