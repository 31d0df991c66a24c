//! Pet model with soft delete.
//!
//! Pets belong to one owner; deleting a pet only flags it so vaccination and
//! health history survive, and the record can be restored later.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered pet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
    pub id: Uuid,

    /// Owning user
    pub owner_id: Uuid,

    pub name: String,
    pub breed: Option<String>,

    /// Age in years (derived from date_of_birth when omitted)
    pub age: Option<i32>,

    /// Weight in kg
    pub weight: Option<f64>,

    pub gender: PetGender,
    pub pet_type: PetType,
    pub date_of_birth: Option<NaiveDate>,
    pub color: Option<String>,
    pub profile_picture: Option<String>,

    /// Microchip identification number — unique across all pets, including
    /// soft-deleted ones
    pub microchip_number: Option<String>,

    pub notes: Option<String>,

    /// Soft delete flag
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PetGender {
    Male,
    Female,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

/// Derive a pet's age in years from its date of birth.
pub fn age_from_birth_date(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    ((today - date_of_birth).num_days() / 365) as i32
}

/// Create/update request for pets.
#[derive(Debug, Deserialize, Validate)]
pub struct PetRequest {
    #[validate(length(min = 1, max = 100, message = "Pet name cannot be empty"))]
    pub name: String,

    #[validate(length(max = 100))]
    pub breed: Option<String>,

    #[validate(range(min = 0, max = 50, message = "Age must be between 0 and 50"))]
    pub age: Option<i32>,

    #[validate(range(min = 0.0, max = 1000.0, message = "Weight must be between 0 and 1000 kg"))]
    pub weight: Option<f64>,

    pub gender: Option<PetGender>,
    pub pet_type: Option<PetType>,
    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub profile_picture: Option<String>,

    #[validate(length(max = 50))]
    pub microchip_number: Option<String>,

    pub notes: Option<String>,
}

/// Partial update request for pets.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePetRequest {
    #[validate(length(min = 1, max = 100, message = "Pet name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(max = 100))]
    pub breed: Option<String>,

    #[validate(range(min = 0, max = 50, message = "Age must be between 0 and 50"))]
    pub age: Option<i32>,

    #[validate(range(min = 0.0, max = 1000.0, message = "Weight must be between 0 and 1000 kg"))]
    pub weight: Option<f64>,

    pub gender: Option<PetGender>,
    pub pet_type: Option<PetType>,
    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub profile_picture: Option<String>,

    #[validate(length(max = 50))]
    pub microchip_number: Option<String>,

    pub notes: Option<String>,
}

/// Pet representation for API responses, with owner context joined in.
#[derive(Debug, Serialize)]
pub struct PetResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub gender: PetGender,
    pub pet_type: PetType,
    pub date_of_birth: Option<NaiveDate>,
    pub color: Option<String>,
    pub profile_picture: Option<String>,
    pub microchip_number: Option<String>,
    pub notes: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Pet> for PetResponse {
    fn from(p: Pet) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            name: p.name,
            breed: p.breed,
            age: p.age,
            weight: p.weight,
            gender: p.gender,
            pet_type: p.pet_type,
            date_of_birth: p.date_of_birth,
            color: p.color,
            profile_picture: p.profile_picture,
            microchip_number: p.microchip_number,
            notes: p.notes,
            is_deleted: p.is_deleted,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_from_birth_date() {
        let dob = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(age_from_birth_date(dob, today), 4);

        // Born less than a year ago
        let dob = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(age_from_birth_date(dob, today), 0);
    }
}
