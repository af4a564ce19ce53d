//! External service abstractions.
//!
//! This module contains traits and implementations for external services
//! that the API depends on. Each service is abstracted behind a trait to
//! enable mocking in tests.
//!
//! ## Services
//!
//! - **auth** - optional remote session-token verification
//! - **inference** - transcription and translation via the OpenAI chat API
//! - **openai** - low-level chat-completions HTTP client (used by inference)
//!
//! ## Usage in Handlers
//!
//! Services are accessed via `AppState`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let text = state.transcriber.transcribe(&bytes, "image/png").await?;
//!     let translation = state.translator.translate(&text).await?;
//! }
//! ```

mod auth;
mod inference;
pub mod openai;

pub use auth::{RemoteSessionVerifier, SessionVerifier};
pub use inference::{OpenAiInference, Transcriber, Translator};

#[cfg(test)]
pub use auth::MockSessionVerifier;

#[cfg(test)]
pub use inference::{MockTranscriber, MockTranslator};
