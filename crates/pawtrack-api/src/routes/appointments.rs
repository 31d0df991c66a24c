//! Appointment routes — booking and managing vet visits.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use pawtrack_common::{
    envelope::ApiResponse,
    error::{PawtrackError, PawtrackResult},
    id::generate_id,
    models::appointment::{Appointment, AppointmentRequest, UpdateAppointmentRequest},
    validation::validate_request,
};
use pawtrack_db::repository::{appointments, pets, users};

use crate::middleware::{self, AuthContext};
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_appointments).post(create_appointment))
        .route(
            "/{id}",
            get(get_appointment)
                .patch(update_appointment)
                .delete(delete_appointment),
        )
        .route_layer(axum::middleware::from_fn(middleware::auth_middleware))
}

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

async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let list = if auth.is_admin() {
        appointments::list_all(&state.db.pool).await?
    } else {
        appointments::list_for_owner(&state.db.pool, auth.user_id).await?
    };
    Ok(ApiResponse::ok("Appointments retrieved successfully", list))
}

async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<AppointmentRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    if body.appointment_date < Utc::now() {
        return Err(PawtrackError::Validation {
            message: "Appointment date cannot be in the past".into(),
        });
    }

    let pet = pets::find_by_id(&state.db.pool, body.pet_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Pet".into(),
        })?;
    auth.require_access(pet.owner_id)?;

    if let Some(vet_id) = body.veterinarian_id {
        check_veterinarian(&state, vet_id).await?;
    }

    let appointment = appointments::create_appointment(
        &state.db.pool,
        generate_id(),
        body.pet_id,
        auth.user_id,
        body.veterinarian_id,
        body.appointment_date,
        &body.reason,
        body.notes.as_deref(),
    )
    .await?;

    tracing::info!(appointment_id = %appointment.id, pet_id = %body.pet_id, "appointment booked");
    Ok(ApiResponse::created(
        "Appointment created successfully",
        appointment,
    ))
}

async fn load_appointment(
    state: &AppState,
    auth: &AuthContext,
    id: Uuid,
) -> PawtrackResult<Appointment> {
    let appointment = appointments::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Appointment".into(),
        })?;
    auth.require_access(appointment.owner_id)?;
    Ok(appointment)
}

async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let appointment = load_appointment(&state, &auth, id).await?;
    Ok(ApiResponse::ok(
        "Appointment retrieved successfully",
        appointment,
    ))
}

async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAppointmentRequest>,
) -> PawtrackResult<impl IntoResponse> {
    validate_request(&body)?;
    let existing = load_appointment(&state, &auth, id).await?;

    if let Some(date) = body.appointment_date {
        if date < Utc::now() {
            return Err(PawtrackError::Validation {
                message: "Appointment date cannot be in the past".into(),
            });
        }
    }
    if let Some(vet_id) = body.veterinarian_id {
        check_veterinarian(&state, vet_id).await?;
    }

    let appointment = appointments::update_appointment(
        &state.db.pool,
        existing.id,
        body.veterinarian_id,
        body.appointment_date,
        body.status,
        body.reason.as_deref(),
        body.notes.as_deref(),
    )
    .await?;

    Ok(ApiResponse::ok(
        "Appointment updated successfully",
        appointment,
    ))
}

async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let existing = load_appointment(&state, &auth, id).await?;
    appointments::delete_appointment(&state.db.pool, existing.id).await?;
    Ok(ApiResponse::message("Appointment deleted successfully"))
}
