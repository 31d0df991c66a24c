//! Health routes — vaccinations and health records.
//!
//! Everything is scoped through the pet: callers may only touch records whose
//! pet they own, admins see everything. Vaccination status is re-derived from
//! the dates on every write.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use pawtrack_common::{
    envelope::ApiResponse,
    error::{PawtrackError, PawtrackResult},
    id::generate_id,
    models::health::{
        HealthRecord, HealthRecordRequest, UpdateHealthRecordRequest, UpdateVaccinationRequest,
        Vaccination, VaccinationRequest, VaccinationStatus,
    },
    validation::validate_request,
};
use pawtrack_db::repository::{health_records, pets, users, vaccinations};

use crate::middleware::{self, AuthContext};
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vaccinations", get(list_vaccinations).post(create_vaccination))
        .route("/vaccinations/pending", get(list_pending))
        .route("/vaccinations/overdue", get(list_overdue))
        .route(
            "/vaccinations/{id}",
            get(get_vaccination)
                .patch(update_vaccination)
                .delete(delete_vaccination),
        )
        .route("/records", get(list_records).post(create_record))
        .route(
            "/records/{id}",
            get(get_record).patch(update_record).delete(delete_record),
        )
        .route("/records/pet/{pet_id}", get(list_pet_records))
        .route_layer(axum::middleware::from_fn(middleware::auth_middleware))
}

/// Check the caller may touch a live pet.
async fn check_pet_access(state: &AppState, auth: &AuthContext, pet_id: Uuid) -> PawtrackResult<()> {
    let pet = pets::find_by_id(&state.db.pool, pet_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Pet".into(),
        })?;
    auth.require_access(pet.owner_id)
}

/// Ownership check through the record's pet, soft-deleted pets included so
/// history stays reachable by ID.
async fn check_record_access(state: &AppState, auth: &AuthContext, pet_id: Uuid) -> PawtrackResult<()> {
    let pet = pets::find_by_id_with_deleted(&state.db.pool, pet_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Pet".into(),
        })?;
    auth.require_access(pet.owner_id)
}

/// An assigned veterinarian must exist and carry the flag.
async fn check_veterinarian(state: &AppState, vet_id: Uuid) -> PawtrackResult<()> {
    let vet = users::find_by_id(&state.db.pool, vet_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Veterinarian".into(),
        })?;
    if !vet.is_veterinarian {
        return Err(PawtrackError::Validation {
            message: "Assigned user is not a veterinarian".into(),
        });
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct VaccinationFilter {
    status: Option<VaccinationStatus>,
}

async fn list_with_status(
    state: &AppState,
    auth: &AuthContext,
    status: Option<VaccinationStatus>,
) -> PawtrackResult<Vec<Vaccination>> {
    if auth.is_admin() {
        Ok(vaccinations::list_all(&state.db.pool, status).await?)
    } else {
        Ok(vaccinations::list_for_owner(&state.db.pool, auth.user_id, status).await?)
    }
}

async fn list_vaccinations(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(filter): Query<VaccinationFilter>,
) -> PawtrackResult<impl IntoResponse> {
    let list = list_with_status(&state, &auth, filter.status).await?;
    Ok(ApiResponse::ok("Vaccinations retrieved successfully", list))
}

async fn list_pending(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let list = list_with_status(&state, &auth, Some(VaccinationStatus::Pending)).await?;
    Ok(ApiResponse::ok("Pending vaccinations retrieved successfully", list))
}

async fn list_overdue(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let list = list_with_status(&state, &auth, Some(VaccinationStatus::Overdue)).await?;
    Ok(ApiResponse::ok("Overdue vaccinations retrieved successfully", list))
}

async fn create_vaccination(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<VaccinationRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    check_pet_access(&state, &auth, body.pet_id).await?;
    if let Some(vet_id) = body.veterinarian_id {
        check_veterinarian(&state, vet_id).await?;
    }

    let status = body
        .status
        .unwrap_or(VaccinationStatus::Pending)
        .derive(body.due_date, body.administered_date, Utc::now().date_naive());

    let vaccination = vaccinations::create_vaccination(
        &state.db.pool,
        generate_id(),
        body.pet_id,
        &body.vaccine_name,
        body.due_date,
        status,
        body.administered_date,
        body.veterinarian_id,
        body.batch_number.as_deref(),
        body.notes.as_deref(),
    )
    .await?;

    Ok(ApiResponse::created(
        "Vaccination created successfully",
        vaccination,
    ))
}

async fn load_vaccination(
    state: &AppState,
    auth: &AuthContext,
    id: Uuid,
) -> PawtrackResult<Vaccination> {
    let vaccination = vaccinations::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Vaccination".into(),
        })?;
    check_record_access(state, auth, vaccination.pet_id).await?;
    Ok(vaccination)
}

async fn get_vaccination(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let vaccination = load_vaccination(&state, &auth, id).await?;
    Ok(ApiResponse::ok("Vaccination retrieved successfully", vaccination))
}

async fn update_vaccination(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVaccinationRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    let existing = load_vaccination(&state, &auth, id).await?;
    if let Some(vet_id) = body.veterinarian_id {
        check_veterinarian(&state, vet_id).await?;
    }

    // Re-derive status from the effective dates after the update
    let due_date = body.due_date.unwrap_or(existing.due_date);
    let administered_date = body.administered_date.or(existing.administered_date);
    let status = body
        .status
        .unwrap_or(existing.status)
        .derive(due_date, administered_date, Utc::now().date_naive());

    let vaccination = vaccinations::update_vaccination(
        &state.db.pool,
        existing.id,
        body.vaccine_name.as_deref(),
        body.due_date,
        status,
        body.administered_date,
        body.veterinarian_id,
        body.batch_number.as_deref(),
        body.notes.as_deref(),
    )
    .await?;

    Ok(ApiResponse::ok("Vaccination updated successfully", vaccination))
}

async fn delete_vaccination(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let vaccination = load_vaccination(&state, &auth, id).await?;
    vaccinations::delete_vaccination(&state.db.pool, vaccination.id).await?;
    Ok(ApiResponse::message("Vaccination deleted successfully"))
}

async fn list_records(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let list = if auth.is_admin() {
        health_records::list_all(&state.db.pool).await?
    } else {
        health_records::list_for_owner(&state.db.pool, auth.user_id).await?
    };
    Ok(ApiResponse::ok("Health records retrieved successfully", list))
}

async fn create_record(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<HealthRecordRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    if body.record_date > Utc::now().date_naive() {
        return Err(PawtrackError::Validation {
            message: "Record date cannot be in the future".into(),
        });
    }
    check_pet_access(&state, &auth, body.pet_id).await?;
    if let Some(vet_id) = body.veterinarian_id {
        check_veterinarian(&state, vet_id).await?;
    }

    let record = health_records::create_record(
        &state.db.pool,
        generate_id(),
        body.pet_id,
        body.weight,
        body.temperature,
        body.heart_rate,
        body.notes.as_deref(),
        body.record_date,
        body.veterinarian_id,
    )
    .await?;

    Ok(ApiResponse::created("Health record created successfully", record))
}

async fn load_record(state: &AppState, auth: &AuthContext, id: Uuid) -> PawtrackResult<HealthRecord> {
    let record = health_records::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Health record".into(),
        })?;
    check_record_access(state, auth, record.pet_id).await?;
    Ok(record)
}

async fn get_record(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let record = load_record(&state, &auth, id).await?;
    Ok(ApiResponse::ok("Health record retrieved successfully", record))
}

async fn update_record(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateHealthRecordRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    if let Some(record_date) = body.record_date {
        if record_date > Utc::now().date_naive() {
            return Err(PawtrackError::Validation {
                message: "Record date cannot be in the future".into(),
            });
        }
    }
    let existing = load_record(&state, &auth, id).await?;
    if let Some(vet_id) = body.veterinarian_id {
        check_veterinarian(&state, vet_id).await?;
    }

    let record = health_records::update_record(
        &state.db.pool,
        existing.id,
        body.weight,
        body.temperature,
        body.heart_rate,
        body.notes.as_deref(),
        body.record_date,
        body.veterinarian_id,
    )
    .await?;

    Ok(ApiResponse::ok("Health record updated successfully", record))
}

async fn delete_record(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let record = load_record(&state, &auth, id).await?;
    health_records::delete_record(&state.db.pool, record.id).await?;
    Ok(ApiResponse::message("Health record deleted successfully"))
}

async fn list_pet_records(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(pet_id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    check_record_access(&state, &auth, pet_id).await?;
    let list = health_records::list_for_pet(&state.db.pool, pet_id).await?;
    Ok(ApiResponse::ok("Health records retrieved successfully", list))
}
