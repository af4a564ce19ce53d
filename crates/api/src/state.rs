use std::sync::Arc;

use crate::{
    config::Config,
    quota::AdmissionController,
    services::{SessionVerifier, Transcriber, Translator},
};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Per-identity admission control over the shared quota store.
    pub quota: AdmissionController,
    /// Remote session verifier, when one is configured.
    pub auth: Option<Arc<dyn SessionVerifier>>,
    /// Transcription capability.
    pub transcriber: Arc<dyn Transcriber>,
    /// Translation capability.
    pub translator: Arc<dyn Translator>,
}
