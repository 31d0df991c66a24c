//! Liveness endpoint.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use serde::Serialize;

use pawtrack_common::envelope::ApiResponse;
use pawtrack_db::postgres;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
struct HealthStatus {
    database: &'static str,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = if postgres::health_check(&state.db.pool).await {
        "up"
    } else {
        "down"
    };
    ApiResponse::ok("Service is healthy", HealthStatus { database })
}
