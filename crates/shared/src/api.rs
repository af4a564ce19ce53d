//! Shared API request/response types used by the server and its clients.

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Longest text accepted for translation. Transcription responses that feed
/// this endpoint are capped far below this by the model's token limit.
const MAX_TEXT_LEN: usize = 16_384;

/// Successful transcription: the extracted text plus the caller's remaining
/// quota for the current window.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
    #[serde(rename = "remainingRequests")]
    pub remaining_requests: i64,
}

/// Request to translate previously transcribed Arabic text.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TranslatePayload {
    #[garde(length(min = 1, max = MAX_TEXT_LEN))]
    pub text: String,
}

/// Successful translation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_response_uses_camel_case_remaining() {
        let response = TranscribeResponse {
            text: "بسم الله".to_string(),
            remaining_requests: 24,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["text"], "بسم الله");
        assert_eq!(json["remainingRequests"], 24);
    }

    #[test]
    fn translate_payload_rejects_empty_text() {
        let payload = TranslatePayload {
            text: String::new(),
        };

        assert!(payload.validate().is_err());
    }

    #[test]
    fn translate_payload_accepts_text() {
        let payload = TranslatePayload {
            text: "مرحبا".to_string(),
        };

        assert!(payload.validate().is_ok());
    }
}
