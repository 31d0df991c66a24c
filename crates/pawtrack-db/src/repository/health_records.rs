//! Health record repository.

use chrono::NaiveDate;
use pawtrack_common::models::health::HealthRecord;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a health record.
#[allow(clippy::too_many_arguments)]
pub async fn create_record(
    pool: &PgPool,
    id: Uuid,
    pet_id: Uuid,
    weight: f64,
    temperature: Option<f64>,
    heart_rate: Option<i32>,
    notes: Option<&str>,
    record_date: NaiveDate,
    veterinarian_id: Option<Uuid>,
) -> Result<HealthRecord, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(
        r#"
        INSERT INTO health_records (
            id, pet_id, weight, temperature, heart_rate, notes, record_date,
            veterinarian_id, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(pet_id)
    .bind(weight)
    .bind(temperature)
    .bind(heart_rate)
    .bind(notes)
    .bind(record_date)
    .bind(veterinarian_id)
    .fetch_one(pool)
    .await
}

/// Find a health record by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>("SELECT * FROM health_records WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List records for one owner's live pets, newest first.
pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(
        r#"
        SELECT r.* FROM health_records r
        JOIN pets p ON p.id = r.pet_id
        WHERE p.owner_id = $1 AND p.is_deleted = FALSE
        ORDER BY r.record_date DESC, r.created_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// List all records (admin).
pub async fn list_all(pool: &PgPool) -> Result<Vec<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(
        "SELECT * FROM health_records ORDER BY record_date DESC, created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// List all records for one pet.
pub async fn list_for_pet(pool: &PgPool, pet_id: Uuid) -> Result<Vec<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(
        "SELECT * FROM health_records WHERE pet_id = $1 ORDER BY record_date DESC, created_at DESC",
    )
    .bind(pet_id)
    .fetch_all(pool)
    .await
}

/// Update a health record.
#[allow(clippy::too_many_arguments)]
pub async fn update_record(
    pool: &PgPool,
    id: Uuid,
    weight: Option<f64>,
    temperature: Option<f64>,
    heart_rate: Option<i32>,
    notes: Option<&str>,
    record_date: Option<NaiveDate>,
    veterinarian_id: Option<Uuid>,
) -> Result<HealthRecord, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(
        r#"
        UPDATE health_records SET
            weight = COALESCE($2, weight),
            temperature = COALESCE($3, temperature),
            heart_rate = COALESCE($4, heart_rate),
            notes = COALESCE($5, notes),
            record_date = COALESCE($6, record_date),
            veterinarian_id = COALESCE($7, veterinarian_id),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(weight)
    .bind(temperature)
    .bind(heart_rate)
    .bind(notes)
    .bind(record_date)
    .bind(veterinarian_id)
    .fetch_one(pool)
    .await
}

/// Delete a health record.
pub async fn delete_record(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM health_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
