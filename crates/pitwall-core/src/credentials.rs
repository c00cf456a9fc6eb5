//! Storage for the raw session credential and its derived entitlement
//! credential
//!
//! The raw credential is replaced wholesale on every arrival, never partially
//! mutated. Each accepted replacement (and each revoke) bumps an epoch
//! counter; in-flight refreshes capture the epoch when they are issued and
//! discard their result if the epoch has moved by the time they complete.

use std::sync::RwLock;

#[derive(Debug, Default)]
struct CredentialState {
    raw: String,
    entitlement: String,
    epoch: u64,
}

/// Holds the current raw session credential and the derived entitlement
/// credential. No network access.
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: RwLock<CredentialState>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw credential.
    ///
    /// Returns `false` and leaves everything untouched when the new value is
    /// identical to the stored one.
    pub fn set_raw(&self, raw: &str) -> bool {
        let mut state = self.inner.write().unwrap();
        if state.raw == raw {
            return false;
        }
        state.raw = raw.to_string();
        state.epoch += 1;
        true
    }

    pub fn raw(&self) -> String {
        self.inner.read().unwrap().raw.clone()
    }

    /// Whether a raw credential is currently present
    pub fn is_authenticated(&self) -> bool {
        !self.inner.read().unwrap().raw.is_empty()
    }

    /// Store a freshly fetched entitlement credential.
    ///
    /// Returns `true` when the stored value actually changed.
    pub fn set_entitlement(&self, token: &str) -> bool {
        let mut state = self.inner.write().unwrap();
        if state.entitlement == token {
            return false;
        }
        state.entitlement = token.to_string();
        true
    }

    pub fn entitlement(&self) -> String {
        self.inner.read().unwrap().entitlement.clone()
    }

    /// Credential generation, bumped on every accepted raw replacement and on
    /// every clear
    pub fn epoch(&self) -> u64 {
        self.inner.read().unwrap().epoch
    }

    /// Revoke the session: both credentials are reset and the epoch moves so
    /// in-flight refreshes against the old session are discarded.
    pub fn clear(&self) {
        let mut state = self.inner.write().unwrap();
        state.raw.clear();
        state.entitlement.clear();
        state.epoch += 1;
    }
}
