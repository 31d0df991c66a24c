//! Vaccination repository.
//!
//! Listings join through pets so ownership scoping excludes soft-deleted
//! pets automatically.

use chrono::NaiveDate;
use pawtrack_common::models::health::{Vaccination, VaccinationStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a vaccination record.
#[allow(clippy::too_many_arguments)]
pub async fn create_vaccination(
    pool: &PgPool,
    id: Uuid,
    pet_id: Uuid,
    vaccine_name: &str,
    due_date: NaiveDate,
    status: VaccinationStatus,
    administered_date: Option<NaiveDate>,
    veterinarian_id: Option<Uuid>,
    batch_number: Option<&str>,
    notes: Option<&str>,
) -> Result<Vaccination, sqlx::Error> {
    sqlx::query_as::<_, Vaccination>(
        r#"
        INSERT INTO vaccinations (
            id, pet_id, vaccine_name, due_date, status, administered_date,
            veterinarian_id, batch_number, notes, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(pet_id)
    .bind(vaccine_name)
    .bind(due_date)
    .bind(status)
    .bind(administered_date)
    .bind(veterinarian_id)
    .bind(batch_number)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Find a vaccination by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Vaccination>, sqlx::Error> {
    sqlx::query_as::<_, Vaccination>("SELECT * FROM vaccinations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List vaccinations for one owner's live pets, optionally filtered by status.
pub async fn list_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
    status: Option<VaccinationStatus>,
) -> Result<Vec<Vaccination>, sqlx::Error> {
    sqlx::query_as::<_, Vaccination>(
        r#"
        SELECT v.* FROM vaccinations v
        JOIN pets p ON p.id = v.pet_id
        WHERE p.owner_id = $1 AND p.is_deleted = FALSE
          AND ($2::TEXT IS NULL OR v.status = $2)
        ORDER BY v.due_date DESC, v.created_at DESC
        "#,
    )
    .bind(owner_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

/// List all vaccinations (admin), optionally filtered by status.
pub async fn list_all(
    pool: &PgPool,
    status: Option<VaccinationStatus>,
) -> Result<Vec<Vaccination>, sqlx::Error> {
    sqlx::query_as::<_, Vaccination>(
        r#"
        SELECT * FROM vaccinations
        WHERE ($1::TEXT IS NULL OR status = $1)
        ORDER BY due_date DESC, created_at DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

/// Update a vaccination record.
#[allow(clippy::too_many_arguments)]
pub async fn update_vaccination(
    pool: &PgPool,
    id: Uuid,
    vaccine_name: Option<&str>,
    due_date: Option<NaiveDate>,
    status: VaccinationStatus,
    administered_date: Option<NaiveDate>,
    veterinarian_id: Option<Uuid>,
    batch_number: Option<&str>,
    notes: Option<&str>,
) -> Result<Vaccination, sqlx::Error> {
    sqlx::query_as::<_, Vaccination>(
        r#"
        UPDATE vaccinations SET
            vaccine_name = COALESCE($2, vaccine_name),
            due_date = COALESCE($3, due_date),
            status = $4,
            administered_date = COALESCE($5, administered_date),
            veterinarian_id = COALESCE($6, veterinarian_id),
            batch_number = COALESCE($7, batch_number),
            notes = COALESCE($8, notes),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(vaccine_name)
    .bind(due_date)
    .bind(status)
    .bind(administered_date)
    .bind(veterinarian_id)
    .bind(batch_number)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Delete a vaccination record.
pub async fn delete_vaccination(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM vaccinations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
