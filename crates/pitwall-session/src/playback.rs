//! Playback URL signing
//!
//! Exchanges a relative playback path for a signed, time-limited absolute
//! URL. Signing requires an authenticated session; an anonymous call is a
//! silent no-op that issues no network request.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use pitwall_core::constants::HEADER_ASCENDON_TOKEN;

use crate::config::ServiceConfig;
use crate::events::{EventBus, SessionEvent};
use crate::state::SessionState;
use crate::transport::DynTransport;

/// Requests signed playback URLs from the playback service
pub struct PlaybackUrlSigner {
    config: ServiceConfig,
    state: Arc<SessionState>,
    events: EventBus,
    transport: DynTransport,
}

impl PlaybackUrlSigner {
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

    /// Exchange a relative playback path for a signed absolute URL.
    ///
    /// Emits [`SessionEvent::TokenisedUrl`] carrying the original path and
    /// the signed URL. Unauthenticated sessions issue no call and emit
    /// nothing.
    pub async fn resolve_tokenised_url(&self, playback_path: &str) -> Option<String> {
        let ctx = self.state.context();
        if !ctx.is_authenticated() {
            return None;
        }

        let url = format!(
            "{}/2.0/{}/{}/{}/ALL/{}",
            self.config.base_url,
            ctx.auth_status,
            self.config.language,
            self.config.platform,
            playback_path
        );
        let mut headers = vec![(HEADER_ASCENDON_TOKEN, ctx.ascendon.clone())];
        if let Some(header) = ctx.entitlement_header() {
            headers.push(header);
        }

        let body = match self.transport.get_json(&url, &headers).await {
            Ok(body) => body,
            Err(err) => {
                debug!(playback_path, error = %err, "url signing dropped");
                return None;
            }
        };

        let signed_url = match body.pointer("/resultObj/url").and_then(Value::as_str) {
            Some(signed) => signed.to_string(),
            None => {
                debug!(playback_path, "signing response carries no url");
                return None;
            }
        };

        self.events.emit(SessionEvent::TokenisedUrl {
            playback_path: playback_path.to_string(),
            signed_url: signed_url.clone(),
        });
        Some(signed_url)
    }
}
