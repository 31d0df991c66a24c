//! Appointment repository.

use chrono::{DateTime, Utc};
use pawtrack_common::models::appointment::{Appointment, AppointmentStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Create an appointment.
#[allow(clippy::too_many_arguments)]
pub async fn create_appointment(
    pool: &PgPool,
    id: Uuid,
    pet_id: Uuid,
    owner_id: Uuid,
    veterinarian_id: Option<Uuid>,
    appointment_date: DateTime<Utc>,
    reason: &str,
    notes: Option<&str>,
) -> Result<Appointment, sqlx::Error> {
    sqlx::query_as::<_, Appointment>(
        r#"
        INSERT INTO appointments (
            id, pet_id, owner_id, veterinarian_id, appointment_date, status,
            reason, notes, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, 'scheduled', $6, $7, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(pet_id)
    .bind(owner_id)
    .bind(veterinarian_id)
    .bind(appointment_date)
    .bind(reason)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Find an appointment by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Appointment>, sqlx::Error> {
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List one owner's appointments, newest first.
pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Appointment>, sqlx::Error> {
    sqlx::query_as::<_, Appointment>(
        "SELECT * FROM appointments WHERE owner_id = $1 ORDER BY appointment_date DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// List all appointments (admin).
pub async fn list_all(pool: &PgPool) -> Result<Vec<Appointment>, sqlx::Error> {
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY appointment_date DESC")
        .fetch_all(pool)
        .await
}

/// Update an appointment.
#[allow(clippy::too_many_arguments)]
pub async fn update_appointment(
    pool: &PgPool,
    id: Uuid,
    veterinarian_id: Option<Uuid>,
    appointment_date: Option<DateTime<Utc>>,
    status: Option<AppointmentStatus>,
    reason: Option<&str>,
    notes: Option<&str>,
) -> Result<Appointment, sqlx::Error> {
    sqlx::query_as::<_, Appointment>(
        r#"
        UPDATE appointments SET
            veterinarian_id = COALESCE($2, veterinarian_id),
            appointment_date = COALESCE($3, appointment_date),
            status = COALESCE($4, status),
            reason = COALESCE($5, reason),
            notes = COALESCE($6, notes),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(veterinarian_id)
    .bind(appointment_date)
    .bind(status)
    .bind(reason)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Delete an appointment.
pub async fn delete_appointment(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
