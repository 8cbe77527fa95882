//! Score lookup endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use intake_common::constants::NO_SCORE;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScoreRequest {
    token: String,
}

#[derive(Serialize)]
pub struct ScoreResponse {
    /// Provider score, or -1.0 when verification failed
    score: f64,
}

/// Report the provider's score for a token without creating anything
pub async fn score(
    State(state): State<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Json<ScoreResponse> {
    let score = state.verifier.score(&payload.token).await.unwrap_or(NO_SCORE);
    Json(ScoreResponse { score })
}
