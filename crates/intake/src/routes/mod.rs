//! HTTP route handlers for the intake service.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use intake_common::IntakeError;
use intake_common::constants::REQUEST_TIMEOUT_SECS;

use crate::state::AppState;

mod employees;
mod health;
mod recaptcha;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))

        // Employee views
        .route("/", get(employees::show_all))
        .route("/all", get(employees::show_all))
        .route("/create/form", get(employees::create_form))
        .route("/create/process", post(employees::create_process))
        .route(
            "/employees/{id}",
            get(employees::get_employee).delete(employees::delete_employee),
        )

        // Diagnostics
        .route("/recaptcha/score", post(recaptcha::score))

        .layer(TraceLayer::new_for_http())
        .layer(request_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)))

        // Add shared state
        .with_state(state)
}

/// Abandons slow requests with 408
fn request_timeout(duration: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, duration)
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `IntakeError` rendered as a JSON response
pub struct ApiError(IntakeError);

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}
