//! Session-token verification abstraction.
//!
//! Verification is delegated to an external auth collaborator. Any failure
//! here degrades identity resolution to the forwarded-address fallback rather
//! than rejecting the request.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Verifies session tokens and yields the subject they were issued to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify a token. Returns the subject claim for a valid token,
    /// None for an invalid or expired one.
    async fn verify(&self, token: &str) -> Result<Option<String>>;
}

/// Verifies tokens against a remote auth endpoint.
pub struct RemoteSessionVerifier {
    http: reqwest::Client,
    verify_url: String,
}

impl RemoteSessionVerifier {
    pub fn new(verify_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            verify_url: verify_url.into(),
        }
    }
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
    subject: Option<String>,
}

#[async_trait]
impl SessionVerifier for RemoteSessionVerifier {
    async fn verify(&self, token: &str) -> Result<Option<String>> {
        let response = self
            .http
            .post(&self.verify_url)
            .json(&VerifyRequest { token })
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("auth endpoint returned {}", response.status());
        }

        let body: VerifyResponse = response.json().await?;

        if !body.valid {
            return Ok(None);
        }

        Ok(body.subject)
    }
}
