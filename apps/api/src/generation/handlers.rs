//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::cv::generate_cv;
use crate::generation::letter::generate_letter;
use crate::models::cv::{CvRequest, CvResult};
use crate::models::letter::{LetterRequest, LetterResult};
use crate::state::AppState;

/// POST /generate-cv
///
/// Returns the CV document extracted from the model's answer.
pub async fn handle_generate_cv(
    State(state): State<AppState>,
    Json(request): Json<CvRequest>,
) -> Result<Json<CvResult>, AppError> {
    let cv = generate_cv(state.llm.as_ref(), &request).await?;
    Ok(Json(cv))
}

/// POST /generate-letter
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    Json(request): Json<LetterRequest>,
) -> Result<Json<LetterResult>, AppError> {
    let letter = generate_letter(state.llm.as_ref(), &request).await?;
    Ok(Json(letter))
}
