//! Subscription plans and user subscriptions.
//!
//! Plans are admin-managed catalog entries (free / premium). A user
//! subscription pins a plan to a date window; its status and is_active flag
//! are derived from that window on every write, and the repository rejects
//! overlapping non-cancelled windows for the same user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A subscription plan in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubscriptionPlan {
    pub id: Uuid,

    /// Unique — at most one plan per type
    pub plan_type: PlanType,

    /// Unique display name
    pub name: String,

    pub description: Option<String>,

    /// 0.00 for the free plan
    pub price: f64,

    pub duration_days: i32,

    /// Maximum number of pets allowed on this plan
    pub max_pets: i32,

    /// Feature list shown on the pricing page
    pub features: sqlx::types::Json<Vec<String>>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Free,
    Premium,
}

/// Create/update request for plans (admin only).
#[derive(Debug, Deserialize, Validate)]
pub struct PlanRequest {
    pub plan_type: PlanType,

    #[validate(length(min = 1, max = 100, message = "Plan name cannot be empty"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(range(min = 1, message = "Duration must be greater than 0"))]
    pub duration_days: i32,

    #[validate(range(min = 1, message = "Maximum pets must be greater than 0"))]
    pub max_pets: i32,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl PlanRequest {
    /// Cross-field rule: the free plan cannot carry a price.
    pub fn check_pricing(&self) -> Result<(), crate::error::PawtrackError> {
        if self.plan_type == PlanType::Free && self.price > 0.0 {
            return Err(crate::error::PawtrackError::Validation {
                message: "Free plan must have price 0.00".into(),
            });
        }
        Ok(())
    }
}

/// Partial update request for plans.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "Plan name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    #[validate(range(min = 1, message = "Duration must be greater than 0"))]
    pub duration_days: Option<i32>,

    #[validate(range(min = 1, message = "Maximum pets must be greater than 0"))]
    pub max_pets: Option<i32>,

    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// A user's subscription to a plan over a date window.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    pub status: SubscriptionStatus,

    /// True only while today falls inside the window and the subscription is
    /// not cancelled
    pub is_active: bool,

    pub auto_renew: bool,
    pub cancelled_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Cancelled,
}

/// Derived (status, is_active) pair for a subscription window.
///
/// Cancelled is sticky; otherwise the window is active until end_date passes,
/// and a not-yet-started window is active-but-dormant.
pub fn derive_window_state(
    current: SubscriptionStatus,
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
) -> (SubscriptionStatus, bool) {
    if current == SubscriptionStatus::Cancelled {
        return (SubscriptionStatus::Cancelled, false);
    }
    if today < start_date {
        (SubscriptionStatus::Active, false)
    } else if today <= end_date {
        (SubscriptionStatus::Active, true)
    } else {
        (SubscriptionStatus::Expired, false)
    }
}

/// True when two inclusive date windows intersect.
///
/// This is the rule the repository's overlap query enforces: windows sharing
/// even a single day collide, while adjacent windows (one ending the day
/// before the next starts) do not.
pub fn windows_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Create request for user subscriptions (admin only).
#[derive(Debug, Deserialize, Validate)]
pub struct SubscriptionRequest {
    pub user_id: Uuid,
    pub plan_id: Uuid,

    /// Defaults to today
    pub start_date: Option<NaiveDate>,

    /// Defaults to start_date + plan duration
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub auto_renew: bool,
}

/// Partial update request for user subscriptions.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubscriptionRequest {
    pub plan_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub auto_renew: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_window_state_inside_range() {
        let (status, active) =
            derive_window_state(SubscriptionStatus::Active, d(2024, 1, 1), d(2024, 2, 1), d(2024, 1, 15));
        assert_eq!(status, SubscriptionStatus::Active);
        assert!(active);
    }

    #[test]
    fn test_window_state_before_start() {
        let (status, active) =
            derive_window_state(SubscriptionStatus::Active, d(2024, 2, 1), d(2024, 3, 1), d(2024, 1, 15));
        assert_eq!(status, SubscriptionStatus::Active);
        assert!(!active);
    }

    #[test]
    fn test_window_state_after_end() {
        let (status, active) =
            derive_window_state(SubscriptionStatus::Active, d(2024, 1, 1), d(2024, 2, 1), d(2024, 3, 1));
        assert_eq!(status, SubscriptionStatus::Expired);
        assert!(!active);
    }

    #[test]
    fn test_cancelled_is_sticky() {
        let (status, active) =
            derive_window_state(SubscriptionStatus::Cancelled, d(2024, 1, 1), d(2024, 2, 1), d(2024, 1, 15));
        assert_eq!(status, SubscriptionStatus::Cancelled);
        assert!(!active);
    }

    #[test]
    fn test_windows_sharing_one_day_overlap() {
        // First window ends the same day the second starts
        assert!(windows_overlap(
            d(2024, 1, 1),
            d(2024, 2, 1),
            d(2024, 2, 1),
            d(2024, 3, 1)
        ));
        // Fully contained window
        assert!(windows_overlap(
            d(2024, 1, 1),
            d(2024, 12, 31),
            d(2024, 6, 1),
            d(2024, 6, 30)
        ));
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        // Second window starts the day after the first ends
        assert!(!windows_overlap(
            d(2024, 1, 1),
            d(2024, 1, 31),
            d(2024, 2, 1),
            d(2024, 2, 29)
        ));
        // Order does not matter
        assert!(!windows_overlap(
            d(2024, 2, 1),
            d(2024, 2, 29),
            d(2024, 1, 1),
            d(2024, 1, 31)
        ));
    }

    #[test]
    fn test_free_plan_price_rule() {
        let req = PlanRequest {
            plan_type: PlanType::Free,
            name: "Free".into(),
            description: None,
            price: 4.99,
            duration_days: 30,
            max_pets: 1,
            features: vec![],
            is_active: true,
        };
        assert!(req.check_pricing().is_err());
    }
}
