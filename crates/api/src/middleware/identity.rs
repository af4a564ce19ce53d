//! Caller identity resolution for quota accounting.
//!
//! Usage: add `CallerIdentity` as an extractor parameter. Resolution never
//! fails; strategies are evaluated in order, once per request:
//!
//! 1. subject of a verified session token (when a verifier is configured)
//! 2. forwarded client address (`x-forwarded-for`, first hop)
//! 3. the shared `"anonymous"` sentinel
//!
//! ```ignore
//! async fn my_handler(identity: CallerIdentity, ...) -> ... {
//!     // identity.0 is the quota key for this caller
//! }
//! ```

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::state::AppState;

/// Identity for callers with no token and no forwarded address. These share
/// one global quota.
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// Resolved principal used as the quota key for a request. Best-effort when
/// derived from a network address; immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Verifier errors degrade to the address fallback; an unreachable auth
        // collaborator must not reject otherwise-identifiable requests.
        if let Some(token) = bearer_token(parts)
            && let Some(verifier) = &state.auth
        {
            match verifier.verify(&token).await {
                Ok(Some(subject)) => return Ok(CallerIdentity(subject)),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("session verification failed, using address fallback: {:?}", err);
                }
            }
        }

        if let Some(addr) = forwarded_addr(parts) {
            return Ok(CallerIdentity(addr));
        }

        Ok(CallerIdentity(ANONYMOUS_IDENTITY.to_string()))
    }
}

/// Bearer token from the Authorization header, if present.
fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// First address in x-forwarded-for, if present.
fn forwarded_addr(parts: &Parts) -> Option<String> {
    let value = parts.headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}
