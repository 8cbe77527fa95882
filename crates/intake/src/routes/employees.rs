//! Employee list, form, and submission endpoints.

use axum::{
    Form, Json,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use intake_common::constants::REJECTION_MESSAGE;
use intake_common::{EmployeeRecord, IntakeError, NewEmployee};

use super::{ApiError, ErrorBody};
use crate::intake::IntakeOutcome;
use crate::state::AppState;

/// List all employees
pub async fn show_all(State(state): State<AppState>) -> Result<Json<Vec<EmployeeRecord>>, ApiError> {
    Ok(Json(state.store.find_all().await?))
}

#[derive(Serialize)]
pub struct FormDescriptor {
    /// Public key for the browser widget
    site_key: String,
    /// Action to mint v3 tokens for
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

/// What the browser needs to render the create form
pub async fn create_form(State(state): State<AppState>) -> Json<FormDescriptor> {
    Json(FormDescriptor {
        site_key: state.config.recaptcha.site_key.clone(),
        action: state.expected_action().map(str::to_string),
    })
}

#[derive(Deserialize)]
pub struct EmployeeForm {
    name: String,
    #[serde(rename = "lastName")]
    last_name: String,
    #[serde(rename = "dateOfBirth")]
    date_of_birth: NaiveDate,
    /// Missing tokens are sent to the provider as empty and rejected there
    #[serde(rename = "g-recaptcha-response", default)]
    token: String,
}

/// Verify and create an employee from the browser form
pub async fn create_process(
    State(state): State<AppState>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form.map_err(|e| IntakeError::InvalidInput(e.body_text()))?;

    let employee = NewEmployee {
        name: form.name,
        last_name: form.last_name,
        date_of_birth: form.date_of_birth,
    };

    let outcome = state
        .intake
        .submit(&form.token, state.expected_action(), employee)
        .await?;

    match outcome {
        IntakeOutcome::Created(record) => {
            tracing::debug!(employee_id = record.id, "Redirecting to employee list");
            Ok(Redirect::to("/all").into_response())
        }
        IntakeOutcome::Rejected(reason) => {
            // Reason stays server-side
            tracing::debug!(%reason, "Rendering rejection");
            Ok((
                StatusCode::FORBIDDEN,
                Json(ErrorBody {
                    error: REJECTION_MESSAGE.to_string(),
                }),
            )
                .into_response())
        }
    }
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<EmployeeRecord>, ApiError> {
    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| IntakeError::NotFound(format!("employee {id}")).into())
}

/// Delete an employee. Deleting a missing id is not an error.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let existed = state.store.delete_by_id(id).await?;
    tracing::info!(employee_id = id, existed, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
