//! User account model — the identity layer.
//!
//! Email is the unique login identifier. Accounts carry a role (admin or
//! regular user) plus a veterinarian flag; veterinarians are regular users
//! that can be assigned to vaccinations and appointments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::PHONE_REGEX;

/// A PawTrack user account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v7 — time-sortable)
    pub id: Uuid,

    /// Unique email, normalized (lowercase domain)
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,

    /// Contact phone (`+999999999`, 9-15 digits)
    pub phone_number: Option<String>,

    /// Profile picture storage key
    pub profile_picture: Option<String>,

    /// Access role — gates admin-only endpoints
    pub role: UserRole,

    /// Veterinarians can be assigned to vaccinations and appointments
    pub is_veterinarian: bool,

    /// Soft-delete flag — deactivated accounts cannot log in
    pub is_active: bool,

    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First and last name joined, falling back to the email.
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Role-based access control: admins manage everything, users own their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// Registration request. Role is always `user`; admins are promoted out of band.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// Must match `password`
    pub password_confirm: String,

    #[validate(length(max = 150, message = "First name is too long"))]
    #[serde(default)]
    pub first_name: String,

    #[validate(length(max = 150, message = "Last name is too long"))]
    #[serde(default)]
    pub last_name: String,

    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed"
    ))]
    pub phone_number: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update account request — partial, all fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed"
    ))]
    pub phone_number: Option<String>,

    pub profile_picture: Option<String>,

    pub is_veterinarian: Option<bool>,
}

/// Change-password request.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, max = 128, message = "New password must be 8-128 characters"))]
    pub new_password: String,

    pub new_password_confirm: String,
}

/// Safe user representation for API responses (no sensitive fields)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub role: UserRole,
    pub is_veterinarian: bool,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        let full_name = u.full_name();
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            full_name,
            phone_number: u.phone_number,
            profile_picture: u.profile_picture,
            role: u.role,
            is_veterinarian: u.is_veterinarian,
            is_active: u.is_active,
            last_login: u.last_login,
            created_at: u.created_at,
        }
    }
}

/// Extended user profile — one row per user, created lazily on first access.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub phone: Option<String>,
    /// Free-form location/address
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update profile request — partial.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed"
    ))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::now_v7(),
            email: "pat@example.com".into(),
            password_hash: "x".into(),
            first_name: "Pat".into(),
            last_name: "Doe".into(),
            phone_number: None,
            profile_picture: None,
            role: UserRole::User,
            is_veterinarian: false,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_name_falls_back_to_email() {
        let mut u = sample_user();
        assert_eq!(u.full_name(), "Pat Doe");

        u.first_name.clear();
        u.last_name.clear();
        assert_eq!(u.full_name(), "pat@example.com");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
