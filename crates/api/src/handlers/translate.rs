//! Translation endpoint.
//!
//! Plain pass-through to the translation capability. Only transcription is
//! costed against the quota; translation operates on text the caller already
//! paid to extract.
//!
//! ## Endpoints
//!
//! - POST /translate - Translate transcribed Arabic text to English

use axum::{Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post};
use garde::Validate;
use shared::api::{TranslatePayload, TranslateResponse};

use crate::{error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(translate))
}

#[debug_handler]
async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let translation = state
        .translator
        .translate(&payload.text)
        .await
        .map_err(AppError::TranslationFailed)?;

    tracing::info!(chars = payload.text.chars().count(), "text translated");

    Ok(Json(TranslateResponse { translation }))
}
