//! Arabic text transcription endpoint.
//!
//! Accepts a multipart upload with a single `image` field and forwards the
//! bytes to the hosted multimodal model. Access to the paid model is guarded
//! by per-identity admission control.
//!
//! ## Redis Structure
//!
//! ```text
//! usage:{identity} → admitted request count (auto-expires after the window)
//! ```
//!
//! ## Ordering
//!
//! The usage counter is read before the inference call and written only after
//! the call is known to have succeeded. A failed inference call therefore
//! never charges quota, and a failed commit can only under-charge. The write
//! runs in a spawned task so a client disconnecting mid-response cannot drop
//! the charge.
//!
//! ## Endpoints
//!
//! - POST /transcribe - Transcribe the Arabic text in an uploaded image

use axum::{
    Json, Router, debug_handler,
    extract::{Multipart, State},
    response::IntoResponse,
    routing::post,
};
use shared::api::TranscribeResponse;

use crate::{error::AppError, middleware::identity::CallerIdentity, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(transcribe))
}

#[debug_handler]
async fn transcribe(
    identity: CallerIdentity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() == Some("image") {
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            image = Some((bytes.to_vec(), mime_type));
        }
    }

    // Rejected here without any quota interaction.
    let Some((bytes, mime_type)) = image else {
        return Err(AppError::NoImage);
    };
    if bytes.is_empty() {
        return Err(AppError::NoImage);
    }

    let decision = state
        .quota
        .check(&identity.0)
        .await
        .map_err(AppError::QuotaUnavailable)?;

    if !decision.allowed {
        tracing::info!(identity = %identity.0, "transcription rejected: quota exhausted");
        return Err(AppError::RateLimited);
    }

    let text = state
        .transcriber
        .transcribe(&bytes, &mime_type)
        .await
        .map_err(AppError::TranscriptionFailed)?;

    // Spawned so a disconnect between inference success and the write cannot
    // cancel the charge. A failed write only under-charges the caller.
    let quota = state.quota.clone();
    let commit_identity = identity.0.clone();
    let usage_before = decision.usage;
    let commit = tokio::spawn(async move { quota.commit(&commit_identity, usage_before).await });

    match commit.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::warn!(identity = %identity.0, "usage commit failed: {:?}", err);
        }
        Err(err) => {
            tracing::warn!(identity = %identity.0, "usage commit task failed: {:?}", err);
        }
    }

    let remaining = (decision.limit - (decision.usage + 1)).max(0);

    tracing::info!(identity = %identity.0, remaining, "image transcribed");

    Ok(Json(TranscribeResponse {
        text,
        remaining_requests: remaining,
    }))
}
