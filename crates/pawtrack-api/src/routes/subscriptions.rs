//! Subscription routes — the plan catalog and per-user subscriptions.
//!
//! Plans are admin-managed. Subscriptions are assigned by admins; their
//! status and is_active flag are derived from the date window on every write,
//! and overlapping non-cancelled windows for one user are rejected.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use pawtrack_common::{
    envelope::ApiResponse,
    error::{PawtrackError, PawtrackResult},
    id::generate_id,
    models::subscription::{
        derive_window_state, PlanRequest, SubscriptionRequest, SubscriptionStatus,
        UpdatePlanRequest, UpdateSubscriptionRequest, UserSubscription,
    },
    validation::validate_request,
};
use pawtrack_db::repository::{plans, subscriptions, users};

use crate::middleware::{self, AuthContext};
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/plans", get(list_plans).post(create_plan))
        .route(
            "/plans/{id}",
            get(get_plan).patch(update_plan).delete(delete_plan),
        )
        .route("/", get(list_subscriptions).post(create_subscription))
        .route("/me", get(my_subscription))
        .route(
            "/{id}",
            get(get_subscription)
                .patch(update_subscription)
                .delete(delete_subscription),
        )
        .route("/{id}/cancel", post(cancel_subscription))
        .route_layer(axum::middleware::from_fn(middleware::auth_middleware))
}

async fn list_plans(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    // Regular users only see plans they can subscribe to
    let list = plans::list_plans(&state.db.pool, !auth.is_admin()).await?;
    Ok(ApiResponse::ok("Plans retrieved successfully", list))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<PlanRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    validate_request(&body)?;
    body.check_pricing()?;

    if plans::find_by_type(&state.db.pool, body.plan_type).await?.is_some() {
        return Err(PawtrackError::AlreadyExists {
            resource: "Plan with this type".into(),
        });
    }

    let plan = plans::create_plan(
        &state.db.pool,
        generate_id(),
        body.plan_type,
        &body.name,
        body.description.as_deref(),
        body.price,
        body.duration_days,
        body.max_pets,
        &body.features,
        body.is_active,
    )
    .await?;

    tracing::info!(plan_id = %plan.id, "subscription plan created");
    Ok(ApiResponse::created("Plan created successfully", plan))
}

async fn get_plan(
    State(state): State<Arc<AppState>>,
    Extension(_auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let plan = plans::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Plan".into(),
        })?;
    Ok(ApiResponse::ok("Plan retrieved successfully", plan))
}

async fn update_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePlanRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    validate_request(&body)?;

    let existing = plans::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Plan".into(),
        })?;

    // The free plan stays free
    let effective_price = body.price.unwrap_or(existing.price);
    if existing.plan_type == pawtrack_common::models::subscription::PlanType::Free
        && effective_price > 0.0
    {
        return Err(PawtrackError::Validation {
            message: "Free plan must have price 0.00".into(),
        });
    }

    let plan = plans::update_plan(
        &state.db.pool,
        existing.id,
        body.name.as_deref(),
        body.description.as_deref(),
        body.price,
        body.duration_days,
        body.max_pets,
        body.features.as_deref(),
        body.is_active,
    )
    .await?;

    Ok(ApiResponse::ok("Plan updated successfully", plan))
}

async fn delete_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    plans::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Plan".into(),
        })?;

    plans::delete_plan(&state.db.pool, id)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                PawtrackError::Conflict {
                    message: "Plan still has subscriptions and cannot be deleted".into(),
                }
            }
            other => PawtrackError::Database(other),
        })?;

    Ok(ApiResponse::message("Plan deleted successfully"))
}

async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let list = if auth.is_admin() {
        subscriptions::list_all(&state.db.pool).await?
    } else {
        subscriptions::list_for_user(&state.db.pool, auth.user_id).await?
    };
    Ok(ApiResponse::ok("Subscriptions retrieved successfully", list))
}

async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<SubscriptionRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    validate_request(&body)?;

    users::find_by_id(&state.db.pool, body.user_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "User".into(),
        })?;
    let plan = plans::find_by_id(&state.db.pool, body.plan_id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Plan".into(),
        })?;

    let today = Utc::now().date_naive();
    let start_date = body.start_date.unwrap_or(today);
    if start_date > today {
        return Err(PawtrackError::Validation {
            message: "Start date cannot be in the future".into(),
        });
    }
    let end_date = body
        .end_date
        .unwrap_or(start_date + Duration::days(plan.duration_days as i64));
    if end_date <= start_date {
        return Err(PawtrackError::Validation {
            message: "End date must be after start date".into(),
        });
    }

    if subscriptions::has_overlapping(&state.db.pool, body.user_id, start_date, end_date, None).await? {
        return Err(PawtrackError::Conflict {
            message: "User already has a subscription overlapping this period".into(),
        });
    }

    let (status, is_active) =
        derive_window_state(SubscriptionStatus::Active, start_date, end_date, today);

    let subscription = subscriptions::create_subscription(
        &state.db.pool,
        generate_id(),
        body.user_id,
        body.plan_id,
        start_date,
        end_date,
        status,
        is_active,
        body.auto_renew,
    )
    .await?;

    tracing::info!(subscription_id = %subscription.id, user_id = %body.user_id, "subscription created");
    Ok(ApiResponse::created(
        "Subscription created successfully",
        subscription,
    ))
}

/// The caller's active subscription, falling back to the most recent one.
async fn my_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> PawtrackResult<impl IntoResponse> {
    let current = match subscriptions::find_active_for_user(&state.db.pool, auth.user_id).await? {
        Some(s) => Some(s),
        None => subscriptions::find_latest_for_user(&state.db.pool, auth.user_id).await?,
    };
    let current = current.ok_or_else(|| PawtrackError::NotFound {
        resource: "Subscription".into(),
    })?;
    Ok(ApiResponse::ok("Subscription retrieved successfully", current))
}

async fn load_subscription(
    state: &AppState,
    id: Uuid,
) -> PawtrackResult<UserSubscription> {
    subscriptions::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| PawtrackError::NotFound {
            resource: "Subscription".into(),
        })
}

async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    let subscription = load_subscription(&state, id).await?;
    auth.require_access(subscription.user_id)?;
    Ok(ApiResponse::ok(
        "Subscription retrieved successfully",
        subscription,
    ))
}

async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSubscriptionRequest>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    validate_request(&body)?;
    let existing = load_subscription(&state, id).await?;

    if let Some(plan_id) = body.plan_id {
        plans::find_by_id(&state.db.pool, plan_id)
            .await?
            .ok_or_else(|| PawtrackError::NotFound {
                resource: "Plan".into(),
            })?;
    }

    let start_date = body.start_date.unwrap_or(existing.start_date);
    let end_date = body.end_date.unwrap_or(existing.end_date);
    if end_date <= start_date {
        return Err(PawtrackError::Validation {
            message: "End date must be after start date".into(),
        });
    }

    if subscriptions::has_overlapping(
        &state.db.pool,
        existing.user_id,
        start_date,
        end_date,
        Some(existing.id),
    )
    .await?
    {
        return Err(PawtrackError::Conflict {
            message: "User already has a subscription overlapping this period".into(),
        });
    }

    let (status, is_active) =
        derive_window_state(existing.status, start_date, end_date, Utc::now().date_naive());

    let subscription = subscriptions::update_subscription(
        &state.db.pool,
        existing.id,
        body.plan_id,
        start_date,
        end_date,
        status,
        is_active,
        body.auto_renew,
    )
    .await?;

    Ok(ApiResponse::ok(
        "Subscription updated successfully",
        subscription,
    ))
}

async fn cancel_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    let existing = load_subscription(&state, id).await?;
    if existing.status == SubscriptionStatus::Cancelled {
        return Err(PawtrackError::Validation {
            message: "Subscription is already cancelled".into(),
        });
    }

    let subscription = subscriptions::cancel_subscription(&state.db.pool, existing.id).await?;
    tracing::info!(subscription_id = %subscription.id, "subscription cancelled");
    Ok(ApiResponse::ok(
        "Subscription cancelled successfully",
        subscription,
    ))
}

async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> PawtrackResult<impl IntoResponse> {
    auth.require_admin()?;
    let existing = load_subscription(&state, id).await?;
    subscriptions::delete_subscription(&state.db.pool, existing.id).await?;
    Ok(ApiResponse::message("Subscription deleted successfully"))
}
