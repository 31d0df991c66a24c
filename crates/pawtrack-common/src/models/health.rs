//! Vaccination and health-record models.
//!
//! Vaccination status is never stored directly by clients — it is derived on
//! every write from the due date and administered date, so listings stay
//! consistent without a background job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A vaccination record for a pet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vaccination {
    pub id: Uuid,
    pub pet_id: Uuid,

    /// e.g. Rabies, DHPP
    pub vaccine_name: String,

    pub due_date: NaiveDate,
    pub status: VaccinationStatus,

    /// Date the vaccine was actually administered
    pub administered_date: Option<NaiveDate>,

    /// Administering veterinarian (must carry the is_veterinarian flag)
    pub veterinarian_id: Option<Uuid>,

    pub batch_number: Option<String>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VaccinationStatus {
    Pending,
    Scheduled,
    Completed,
    Overdue,
}

impl VaccinationStatus {
    /// Derive the effective status from the record's dates.
    ///
    /// An administered vaccination is always completed. Otherwise a past due
    /// date makes it overdue, and an overdue record whose due date moved into
    /// the future falls back to pending. Scheduled survives as long as the
    /// due date has not passed.
    pub fn derive(self, due_date: NaiveDate, administered_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        if administered_date.is_some() {
            return Self::Completed;
        }
        if due_date < today && self != Self::Completed {
            return Self::Overdue;
        }
        if due_date >= today && self == Self::Overdue {
            return Self::Pending;
        }
        self
    }
}

/// Create/update request for vaccinations.
#[derive(Debug, Deserialize, Validate)]
pub struct VaccinationRequest {
    pub pet_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Vaccine name cannot be empty"))]
    pub vaccine_name: String,

    pub due_date: NaiveDate,

    #[serde(default)]
    pub status: Option<VaccinationStatus>,

    pub administered_date: Option<NaiveDate>,
    pub veterinarian_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub batch_number: Option<String>,

    pub notes: Option<String>,
}

/// Partial update request for vaccinations.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVaccinationRequest {
    #[validate(length(min = 1, max = 200, message = "Vaccine name cannot be empty"))]
    pub vaccine_name: Option<String>,

    pub due_date: Option<NaiveDate>,
    pub status: Option<VaccinationStatus>,
    pub administered_date: Option<NaiveDate>,
    pub veterinarian_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub batch_number: Option<String>,

    pub notes: Option<String>,
}

/// A health check-up entry for a pet: vitals plus free-form notes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HealthRecord {
    pub id: Uuid,
    pub pet_id: Uuid,

    /// Weight in kg
    pub weight: f64,

    /// Body temperature in Celsius
    pub temperature: Option<f64>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<i32>,

    pub notes: Option<String>,
    pub record_date: NaiveDate,
    pub veterinarian_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create request for health records.
#[derive(Debug, Deserialize, Validate)]
pub struct HealthRecordRequest {
    pub pet_id: Uuid,

    #[validate(range(min = 0.01, max = 500.0, message = "Weight must be between 0 and 500 kg"))]
    pub weight: f64,

    #[validate(range(min = 30.0, max = 45.0, message = "Temperature must be between 30 and 45 °C"))]
    pub temperature: Option<f64>,

    #[validate(range(min = 40, max = 300, message = "Heart rate must be between 40 and 300 bpm"))]
    pub heart_rate: Option<i32>,

    pub notes: Option<String>,
    pub record_date: NaiveDate,
    pub veterinarian_id: Option<Uuid>,
}

/// Partial update request for health records.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHealthRecordRequest {
    #[validate(range(min = 0.01, max = 500.0, message = "Weight must be between 0 and 500 kg"))]
    pub weight: Option<f64>,

    #[validate(range(min = 30.0, max = 45.0, message = "Temperature must be between 30 and 45 °C"))]
    pub temperature: Option<f64>,

    #[validate(range(min = 40, max = 300, message = "Heart rate must be between 40 and 300 bpm"))]
    pub heart_rate: Option<i32>,

    pub notes: Option<String>,
    pub record_date: Option<NaiveDate>,
    pub veterinarian_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_administered_means_completed() {
        let status = VaccinationStatus::Pending.derive(d(2024, 1, 1), Some(d(2024, 1, 2)), d(2024, 6, 1));
        assert_eq!(status, VaccinationStatus::Completed);
    }

    #[test]
    fn test_past_due_becomes_overdue() {
        let status = VaccinationStatus::Pending.derive(d(2024, 1, 1), None, d(2024, 6, 1));
        assert_eq!(status, VaccinationStatus::Overdue);

        let status = VaccinationStatus::Scheduled.derive(d(2024, 1, 1), None, d(2024, 6, 1));
        assert_eq!(status, VaccinationStatus::Overdue);
    }

    #[test]
    fn test_overdue_with_future_due_falls_back_to_pending() {
        let status = VaccinationStatus::Overdue.derive(d(2024, 12, 1), None, d(2024, 6, 1));
        assert_eq!(status, VaccinationStatus::Pending);
    }

    #[test]
    fn test_future_due_keeps_scheduled() {
        let status = VaccinationStatus::Scheduled.derive(d(2024, 12, 1), None, d(2024, 6, 1));
        assert_eq!(status, VaccinationStatus::Scheduled);
    }
}
