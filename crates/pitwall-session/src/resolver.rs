//! Session resolution: raw credential to derived authorization artifacts
//!
//! A newly captured credential triggers two independent downstream refreshes
//! (location group and entitlement credential). Both are best-effort: a
//! transport or parse failure is logged and dropped, never surfaced to the
//! caller. Completions arriving after the credential has been superseded are
//! discarded via the credential epoch.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use pitwall_core::constants::{HEADER_ASCENDON_TOKEN, STATUS_REGISTERED};

use crate::config::ServiceConfig;
use crate::events::{EventBus, SessionEvent};
use crate::state::{RequestContext, SessionState};
use crate::transport::DynTransport;

/// Drives the token-derivation state machine
pub struct SessionResolver {
    config: ServiceConfig,
    state: Arc<SessionState>,
    events: EventBus,
    transport: DynTransport,
}

impl SessionResolver {
    pub fn new(
        config: ServiceConfig,
        state: Arc<SessionState>,
        events: EventBus,
        transport: DynTransport,
    ) -> Self {
        Self {
            config,
            state,
            events,
            transport,
        }
    }

    /// Feed a newly captured raw session credential.
    ///
    /// Idempotent: feeding the value already stored does nothing. A changed
    /// value emits [`SessionEvent::CredentialChanged`] and runs one location
    /// refresh plus (when the session is entitled) one entitlement refresh.
    pub async fn credential_arrived(&self, raw: &str) {
        if !self.state.credentials().set_raw(raw) {
            return;
        }

        let ctx = self.state.context();
        if !entitlement_eligible(&ctx) {
            // entitlement no longer applies under the new claims
            self.state.credentials().set_entitlement("");
        }

        info!(
            authenticated = ctx.is_authenticated(),
            subscription = %ctx.claims.subscription_status,
            "session credential accepted"
        );
        self.events.emit(SessionEvent::CredentialChanged);

        tokio::join!(self.refresh_location(), self.refresh_entitlement());
    }

    /// Connectivity came back; re-resolve the location group.
    pub async fn connectivity_restored(&self) {
        self.refresh_location().await;
    }

    /// Best-effort refresh of the viewer's location group.
    ///
    /// Emits [`SessionEvent::LocationGroupChanged`] only when the resolved id
    /// differs from the stored one.
    pub async fn refresh_location(&self) {
        let epoch = self.state.credentials().epoch();
        let ctx = self.state.context();

        let mut url = format!(
            "{}/1.0/{}/{}/{}/ALL/USER/LOCATION",
            self.config.base_url, ctx.auth_status, self.config.language, self.config.platform
        );
        let mut headers = Vec::new();
        if ctx.is_authenticated() {
            url.push_str("?homeCountry=");
            url.push_str(&urlencoding::encode(&ctx.claims.home_region));
            headers.push((HEADER_ASCENDON_TOKEN, ctx.ascendon.clone()));
        }

        let body = match self.transport.get_json(&url, &headers).await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "location refresh dropped");
                return;
            }
        };

        let group_id = match location_group_id(&body) {
            Some(group_id) => group_id,
            None => {
                debug!("location response carries no userLocation entry");
                return;
            }
        };

        if self.state.credentials().epoch() != epoch {
            debug!("discarding location result for a superseded credential");
            return;
        }

        if group_id != self.state.location_group_id() {
            self.state.set_location_group_id(group_id);
            info!(group_id, "location group changed");
            self.events
                .emit(SessionEvent::LocationGroupChanged { group_id });
        }
    }

    /// Fetch the entitlement credential for a subscribed session.
    ///
    /// No-op unless the session is authenticated on a genuine paid tier.
    /// Emits [`SessionEvent::EntitlementChanged`] only when the fetched token
    /// differs from the stored one.
    pub async fn refresh_entitlement(&self) {
        let epoch = self.state.credentials().epoch();
        let ctx = self.state.context();
        if !entitlement_eligible(&ctx) {
            return;
        }

        let url = format!(
            "{}/2.0/{}/{}/{}/ALL/USER/ENTITLEMENT",
            self.config.base_url, ctx.auth_status, self.config.language, self.config.platform
        );
        let headers = vec![(HEADER_ASCENDON_TOKEN, ctx.ascendon.clone())];

        let body = match self.transport.get_json(&url, &headers).await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "entitlement refresh dropped");
                return;
            }
        };

        let token = body
            .pointer("/resultObj/entitlementToken")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if self.state.credentials().epoch() != epoch {
            debug!("discarding entitlement result for a superseded credential");
            return;
        }

        if self.state.credentials().set_entitlement(&token) {
            info!("entitlement credential refreshed");
            self.events.emit(SessionEvent::EntitlementChanged { token });
        }
    }

    /// Drop the session. Both credentials are cleared synchronously; no
    /// refreshes are triggered.
    pub fn revoke(&self) {
        self.state.credentials().clear();
        info!("session revoked");
    }
}

fn entitlement_eligible(ctx: &RequestContext) -> bool {
    ctx.is_authenticated() && ctx.claims.subscription_status != STATUS_REGISTERED
}

fn location_group_id(body: &Value) -> Option<i64> {
    body.pointer("/resultObj/userLocation/0/groupId")
        .and_then(Value::as_i64)
}
