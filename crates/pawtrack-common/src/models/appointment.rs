//! Veterinary appointment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A scheduled vet visit for a pet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub pet_id: Uuid,

    /// The pet's owner at booking time
    pub owner_id: Uuid,

    /// Assigned veterinarian (must carry the is_veterinarian flag)
    pub veterinarian_id: Option<Uuid>,

    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,

    /// Why the visit was booked
    pub reason: String,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

/// Create request for appointments.
#[derive(Debug, Deserialize, Validate)]
pub struct AppointmentRequest {
    pub pet_id: Uuid,
    pub veterinarian_id: Option<Uuid>,
    pub appointment_date: DateTime<Utc>,

    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,

    pub notes: Option<String>,
}

/// Partial update request for appointments.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAppointmentRequest {
    pub veterinarian_id: Option<Uuid>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,

    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: Option<String>,

    pub notes: Option<String>,
}
