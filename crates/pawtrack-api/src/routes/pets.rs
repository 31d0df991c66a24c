//! Pet routes — CRUD with soft delete and restore.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use pawtrack_common::{
    envelope::ApiResponse,
    error::{PawtrackError, PawtrackResult},
    id::generate_id,
    models::pet::{age_from_birth_date, Pet, PetGender, PetRequest, PetResponse, PetType, UpdatePetRequest},
    validation::{normalize_microchip, validate_request},
};
use pawtrack_db::repository::pets;

use crate::middleware::{self, AuthContext};
use crate::routes::Pagination;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_pets).post(create_pet))
        .route("/{id}", get(get_pet).patch(update_pet).delete(delete_pet))
        .route("/{id}/restore", post(restore_pet))
        .route_layer(axum::middleware::from_fn(middleware::auth_middleware))
}

/// Load a live pet and check the caller may touch it.
async fn load_owned_pet(state: &AppState, auth: &AuthContext, id: Uuid) -> PawtrackResult<Pet> {
    let pet = pets::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Pet".into(),
        })?;
    auth.require_access(pet.owner_id)?;
    Ok(pet)
}

/// Reject a microchip number already registered to another pet, soft-deleted
/// rows included.
async fn check_microchip_free(
    state: &AppState,
    microchip: &str,
    exclude_id: Option<Uuid>,
) -> PawtrackResult<()> {
    if let Some(existing) = pets::find_by_microchip_with_deleted(&state.db.pool, microchip).await? {
        if Some(existing.id) != exclude_id {
            return Err(PawtrackError::AlreadyExists {
                resource: "Pet with this microchip number".into(),
            });
        }
    }
    Ok(())
}

async fn list_pets(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<Pagination>,
) -> PawtrackResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let list = if auth.is_admin() {
        pets::list_all_pets(&state.db.pool, limit, offset).await?
    } else {
        pets::list_owner_pets(&state.db.pool, auth.user_id, limit, offset).await?
    };
    let list: Vec<PetResponse> = list.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok("Pets retrieved successfully", list))
}

async fn create_pet(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<PetRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;

    let microchip = body.microchip_number.as_deref().map(normalize_microchip);
    if let Some(chip) = microchip.as_deref() {
        check_microchip_free(&state, chip, None).await?;
    }

    // Derive age from date of birth when the caller left it out
    let age = body.age.or_else(|| {
        body.date_of_birth
            .map(|dob| age_from_birth_date(dob, Utc::now().date_naive()))
    });

    let pet = pets::create_pet(
        &state.db.pool,
        generate_id(),
        auth.user_id,
        &body.name,
        body.breed.as_deref(),
        age,
        body.weight,
        body.gender.unwrap_or(PetGender::Unknown),
        body.pet_type.unwrap_or(PetType::Other),
        body.date_of_birth,
        body.color.as_deref(),
        body.profile_picture.as_deref(),
        microchip.as_deref(),
        body.notes.as_deref(),
    )
    .await?;

    tracing::info!(pet_id = %pet.id, owner_id = %auth.user_id, "pet created");
    Ok(ApiResponse::created(
        "Pet created successfully",
        PetResponse::from(pet),
    ))
}

async fn get_pet(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let pet = load_owned_pet(&state, &auth, id).await?;
    Ok(ApiResponse::ok(
        "Pet retrieved successfully",
        PetResponse::from(pet),
    ))
}

async fn update_pet(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePetRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    let pet = load_owned_pet(&state, &auth, id).await?;

    let microchip = body.microchip_number.as_deref().map(normalize_microchip);
    if let Some(chip) = microchip.as_deref() {
        check_microchip_free(&state, chip, Some(pet.id)).await?;
    }

    let pet = pets::update_pet(
        &state.db.pool,
        pet.id,
        body.name.as_deref(),
        body.breed.as_deref(),
        body.age,
        body.weight,
        body.gender,
        body.pet_type,
        body.date_of_birth,
        body.color.as_deref(),
        body.profile_picture.as_deref(),
        microchip.as_deref(),
        body.notes.as_deref(),
    )
    .await?;

    Ok(ApiResponse::ok(
        "Pet updated successfully",
        PetResponse::from(pet),
    ))
}

async fn delete_pet(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let pet = load_owned_pet(&state, &auth, id).await?;
    pets::soft_delete_pet(&state.db.pool, pet.id).await?;
    tracing::info!(pet_id = %pet.id, "pet soft-deleted");
    Ok(ApiResponse::message("Pet deleted successfully"))
}

async fn restore_pet(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let pet = pets::find_by_id_with_deleted(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Pet".into(),
        })?;
    auth.require_access(pet.owner_id)?;

    if !pet.is_deleted {
        return Err(PawtrackError::Validation {
            message: "Pet is not deleted".into(),
        });
    }

    let pet = pets::restore_pet(&state.db.pool, pet.id).await?;
    tracing::info!(pet_id = %pet.id, "pet restored");
    Ok(ApiResponse::ok(
        "Pet restored successfully",
        PetResponse::from(pet),
    ))
}
