//! Shared test utilities for API handler tests.
//!
//! Provides a flexible `TestStateBuilder` for constructing `AppState`
//! instances with only the mocks needed for each test.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::TestStateBuilder;
//!
//! let mut store = MockQuotaStore::new();
//! store.expect_get().returning(|_| Ok(None));
//!
//! let state = TestStateBuilder::new()
//!     .with_quota_store(store)
//!     .build();
//! ```

use std::sync::Arc;

use crate::config::Config;
use crate::quota::AdmissionController;
use crate::services::{
    MockSessionVerifier, MockTranscriber, MockTranslator, SessionVerifier, Transcriber, Translator,
};
use crate::state::AppState;
use crate::stores::MockQuotaStore;

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        redis_url: "redis://test".to_string(),
        openai_api_key: "sk-test".to_string(),
        rate_limit: 25,
        rate_limit_window: 86_400_000,
        rate_limit_fail_open: false,
        auth_verify_url: None,
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Uses default (empty) mocks for anything not explicitly set, so tests only
/// configure the collaborators they actually exercise. The session verifier
/// defaults to absent, matching an unconfigured deployment.
pub struct TestStateBuilder {
    quota_store: Option<MockQuotaStore>,
    transcriber: Option<MockTranscriber>,
    translator: Option<MockTranslator>,
    session_verifier: Option<MockSessionVerifier>,
}

impl TestStateBuilder {
    /// Creates a new builder with no mocks configured.
    pub fn new() -> Self {
        Self {
            quota_store: None,
            transcriber: None,
            translator: None,
            session_verifier: None,
        }
    }

    pub fn with_quota_store(mut self, store: MockQuotaStore) -> Self {
        self.quota_store = Some(store);
        self
    }

    pub fn with_transcriber(mut self, transcriber: MockTranscriber) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_translator(mut self, translator: MockTranslator) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_session_verifier(mut self, verifier: MockSessionVerifier) -> Self {
        self.session_verifier = Some(verifier);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let config = test_config();

        let store = Arc::new(self.quota_store.unwrap_or_else(MockQuotaStore::new));
        let quota = AdmissionController::new(
            store,
            config.rate_limit,
            config.window(),
            config.rate_limit_fail_open,
        );

        let auth = self
            .session_verifier
            .map(|verifier| Arc::new(verifier) as Arc<dyn SessionVerifier>);

        let transcriber = Arc::new(self.transcriber.unwrap_or_else(MockTranscriber::new))
            as Arc<dyn Transcriber>;
        let translator =
            Arc::new(self.translator.unwrap_or_else(MockTranslator::new)) as Arc<dyn Translator>;

        AppState {
            config,
            quota,
            auth,
            transcriber,
            translator,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
