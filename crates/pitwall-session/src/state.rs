//! Shared derived session state and per-request snapshots
//!
//! The derived triple (claims-derived status, entitlement credential,
//! location group) is mutated only by the session resolver. Every other
//! component reads a [`RequestContext`] snapshot at call-build time.

use std::sync::atomic::{AtomicI64, Ordering};

use pitwall_core::constants::{AUTH_ANONYMOUS, AUTH_REGISTERED, HEADER_ENTITLEMENT_TOKEN};
use pitwall_core::{Claims, CredentialStore};

/// Derived state shared between the resolver and the catalog components
#[derive(Debug, Default)]
pub struct SessionState {
    credentials: CredentialStore,
    location_group_id: AtomicI64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn location_group_id(&self) -> i64 {
        self.location_group_id.load(Ordering::Acquire)
    }

    pub(crate) fn set_location_group_id(&self, group_id: i64) {
        self.location_group_id.store(group_id, Ordering::Release);
    }

    /// Snapshot everything needed to build an outbound request.
    ///
    /// Claims are recomputed from the raw credential on every snapshot rather
    /// than cached alongside it.
    pub fn context(&self) -> RequestContext {
        let raw = self.credentials.raw();
        let claims = Claims::decode(&raw);
        let auth_status = if claims.is_authenticated {
            AUTH_REGISTERED
        } else {
            AUTH_ANONYMOUS
        };

        RequestContext {
            auth_status,
            claims,
            ascendon: raw,
            entitlement: self.credentials.entitlement(),
            location_group_id: self.location_group_id(),
        }
    }
}

/// Immutable view of the derived state taken when a request is built
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub claims: Claims,
    /// Path segment: `R` for authenticated sessions, `A` otherwise
    pub auth_status: &'static str,
    /// Raw session credential as captured
    pub ascendon: String,
    /// Entitlement credential, empty until fetched
    pub entitlement: String,
    pub location_group_id: i64,
}

impl RequestContext {
    pub fn is_authenticated(&self) -> bool {
        self.claims.is_authenticated
    }

    /// Entitlement header pair, present only once the credential is held
    pub fn entitlement_header(&self) -> Option<(&'static str, String)> {
        if self.entitlement.is_empty() {
            None
        } else {
            Some((HEADER_ENTITLEMENT_TOKEN, self.entitlement.clone()))
        }
    }
}
