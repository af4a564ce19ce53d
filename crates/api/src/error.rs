use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum AppError {
    /// Internal errors - logged but return generic 500 to user
    Internal(anyhow::Error),
    /// Multipart payload without an image part.
    NoImage,
    /// Validation errors - safe to show
    Validation(String),
    /// The identity's quota for the current window is exhausted.
    RateLimited,
    /// Quota store unreachable under the fail-closed policy.
    QuotaUnavailable(anyhow::Error),
    /// The remote transcription capability failed or timed out.
    TranscriptionFailed(anyhow::Error),
    /// The remote translation capability failed or timed out.
    TranslationFailed(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {:?}", err);
                sentry::capture_error(
                    err.as_ref() as &(dyn std::error::Error + Send + Sync + 'static)
                );

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::NoImage => (StatusCode::BAD_REQUEST, "No image provided".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
            AppError::QuotaUnavailable(err) => {
                tracing::error!("quota store unavailable: {:?}", err);

                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            AppError::TranscriptionFailed(err) => {
                tracing::error!("transcription failed: {:?}", err);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to transcribe image".to_string(),
                )
            }
            AppError::TranslationFailed(err) => {
                tracing::error!("translation failed: {:?}", err);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to translate text".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_error_returns_500_generic_message() {
        let err = AppError::Internal(anyhow::anyhow!("redis connection failed"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_json(response).await["error"],
            "Internal server error"
        );
    }

    #[tokio::test]
    async fn internal_error_hides_sensitive_details() {
        let err = AppError::Internal(anyhow::anyhow!("api_key=sk-secret123 leaked"));
        let response = err.into_response();

        let body = response_json(response).await.to_string();

        assert!(!body.contains("sk-secret123"));
        assert!(!body.contains("api_key"));
    }

    #[tokio::test]
    async fn no_image_returns_400_with_exact_message() {
        let response = AppError::NoImage.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response_json(response).await["error"], "No image provided");
    }

    #[tokio::test]
    async fn rate_limited_returns_429_with_exact_message() {
        let response = AppError::RateLimited.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response_json(response).await["error"],
            "Rate limit exceeded. Please try again later."
        );
    }

    #[tokio::test]
    async fn quota_unavailable_returns_503() {
        let err = AppError::QuotaUnavailable(anyhow::anyhow!("connection refused"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response_json(response).await["error"],
            "Service temporarily unavailable"
        );
    }

    #[tokio::test]
    async fn transcription_failure_returns_500_with_exact_message() {
        let err = AppError::TranscriptionFailed(anyhow::anyhow!("upstream timeout"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_json(response).await["error"],
            "Failed to transcribe image"
        );
    }

    #[tokio::test]
    async fn validation_error_returns_400_with_details() {
        let err = AppError::Validation("text: length is lower than 1".into());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_json(response).await["error"],
            "text: length is lower than 1"
        );
    }

    #[tokio::test]
    async fn io_error_converts_to_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "redis down");
        let err: AppError = io_err.into();

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
