//! Per-content stream enumeration
//!
//! Content may expose an explicit list of alternate streams (onboard
//! channels, data feeds); when it does not, a single default main-feed
//! descriptor is synthesized so every playable content id yields at least one
//! stream.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use pitwall_core::StreamDescriptor;

use crate::config::ServiceConfig;
use crate::events::{EventBus, SessionEvent};
use crate::state::SessionState;
use crate::transport::DynTransport;

/// Resolves the streams available for a piece of content
pub struct StreamResolver {
    config: ServiceConfig,
    state: Arc<SessionState>,
    events: EventBus,
    transport: DynTransport,
}

impl StreamResolver {
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

    /// Query content metadata and publish its stream descriptors.
    ///
    /// A response without an `additionalStreams` list yields exactly one
    /// synthesized main-feed descriptor. A response with no containers at all
    /// yields no result.
    pub async fn resolve_streams(&self, content_id: i64) -> Option<Vec<StreamDescriptor>> {
        let ctx = self.state.context();

        let mut url = format!(
            "{}/3.0/{}/{}/{}/ALL/CONTENT/VIDEO/{}/{}/{}",
            self.config.base_url,
            ctx.auth_status,
            self.config.language,
            self.config.platform,
            content_id,
            ctx.claims.subscription_status,
            ctx.location_group_id
        );
        url.push_str(&format!(
            "?contentId={}&entitlement={}",
            content_id,
            urlencoding::encode(&ctx.claims.subscription_status)
        ));
        if ctx.is_authenticated() {
            url.push_str("&homeCountry=");
            url.push_str(&urlencoding::encode(&ctx.claims.home_region));
        }
        let mut headers = Vec::new();
        if let Some(header) = ctx.entitlement_header() {
            headers.push(header);
        }

        let body = match self.transport.get_json(&url, &headers).await {
            Ok(body) => body,
            Err(err) => {
                debug!(content_id, error = %err, "stream resolution dropped");
                return None;
            }
        };

        let metadata = match body.pointer("/resultObj/containers/0") {
            Some(container) => container.get("metadata"),
            None => {
                debug!(content_id, "content response carries no containers");
                return None;
            }
        };

        let streams = match metadata.and_then(|m| m.get("additionalStreams")) {
            Some(list) => serde_json::from_value::<Vec<StreamDescriptor>>(list.clone())
                .unwrap_or_else(|_| vec![main_feed(content_id)]),
            None => vec![main_feed(content_id)],
        };

        self.events.emit(SessionEvent::ContentStreams {
            content_id,
            streams: streams.clone(),
        });
        Some(streams)
    }
}

fn main_feed(content_id: i64) -> StreamDescriptor {
    StreamDescriptor {
        stream_type: "main".to_string(),
        title: "MAIN FEED".to_string(),
        playback_path: format!("CONTENT/PLAY?contentId={content_id}"),
    }
}
