//! Per-identity request admission control.
//!
//! Decides, for each inbound transcription request, whether the caller may
//! proceed to the paid inference capability, and tracks consumption against a
//! rolling quota in the shared store.
//!
//! The check and the later commit are two independent store operations: two
//! concurrent requests from the same identity can both observe
//! `usage = k < limit`, both proceed, and both write `k + 1`, losing one
//! increment. The overshoot is bounded by the per-identity in-flight
//! concurrency and is accepted. An atomic INCR was considered and rejected
//! here: consumption may only be recorded after the inference call is known to
//! have succeeded, and INCR-before-call would charge failed requests.

use std::{sync::Arc, time::Duration};

use anyhow::Result;

use crate::stores::QuotaStore;

/// Outcome of an admission check. Derived from the current counter on every
/// request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaDecision {
    pub allowed: bool,
    /// Counter value observed at check time; `commit` writes `usage + 1`.
    pub usage: i64,
    /// Requests left in the window, never negative.
    pub remaining: i64,
    pub limit: i64,
}

/// Admission policy over a shared usage-counter store.
#[derive(Clone)]
pub struct AdmissionController {
    store: Arc<dyn QuotaStore>,
    limit: i64,
    window: Duration,
    fail_open: bool,
}

fn usage_key(identity: &str) -> String {
    format!("usage:{}", identity)
}

impl AdmissionController {
    pub fn new(store: Arc<dyn QuotaStore>, limit: i64, window: Duration, fail_open: bool) -> Self {
        Self {
            store,
            limit,
            window,
            fail_open,
        }
    }

    /// Check whether `identity` may be admitted. Performs no write: rejected
    /// requests consume nothing, and admitted requests are charged only after
    /// the inference call succeeds (see [`commit`](Self::commit)).
    ///
    /// When the store is unreachable the configured policy applies: fail-open
    /// admits with full remaining quota, fail-closed (the default) propagates
    /// the error.
    pub async fn check(&self, identity: &str) -> Result<QuotaDecision> {
        let usage = match self.store.get(&usage_key(identity)).await {
            Ok(value) => value.unwrap_or(0),
            Err(err) if self.fail_open => {
                tracing::warn!(
                    identity,
                    "quota store unreachable, admitting under fail-open policy: {:?}",
                    err
                );
                return Ok(QuotaDecision {
                    allowed: true,
                    usage: 0,
                    remaining: self.limit,
                    limit: self.limit,
                });
            }
            Err(err) => return Err(err),
        };

        if usage >= self.limit {
            return Ok(QuotaDecision {
                allowed: false,
                usage,
                remaining: 0,
                limit: self.limit,
            });
        }

        Ok(QuotaDecision {
            allowed: true,
            usage,
            remaining: self.limit - usage,
            limit: self.limit,
        })
    }

    /// Record one admitted request. Re-arms the key's expiry to the full
    /// window from this write, not from the identity's first request in the
    /// window — the effective window drifts forward with each admitted
    /// request. Kept for compatibility with the deployed behavior.
    pub async fn commit(&self, identity: &str, usage_before: i64) -> Result<()> {
        self.store
            .set_with_expiry(&usage_key(identity), usage_before + 1, self.window)
            .await
    }

    /// True when the backing store answers a read. Used by the health check.
    pub async fn store_reachable(&self) -> bool {
        self.store.get("usage:healthcheck").await.is_ok()
    }
}
