//! In-app notification model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A notification delivered to one user's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    AppointmentReminder,
    VaccinationDue,
    MedicationReminder,
    HealthUpdate,
    System,
    Other,
}

/// Create request for notifications (admin only).
#[derive(Debug, Deserialize, Validate)]
pub struct NotificationRequest {
    pub user_id: Uuid,
    pub notification_type: NotificationType,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Partial update request for notifications.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNotificationRequest {
    pub notification_type: Option<NotificationType>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: Option<String>,

    pub is_read: Option<bool>,
}
