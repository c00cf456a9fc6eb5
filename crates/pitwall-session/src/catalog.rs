//! Generic catalog page queries

use pitwall_core::PageResult;
use std::sync::Arc;
use tracing::warn;

use crate::config::ServiceConfig;
use crate::events::{EventBus, SessionEvent};
use crate::state::SessionState;
use crate::transport::DynTransport;

/// Issues page queries against the catalog and publishes the raw results
pub struct CatalogQueryEngine {
    config: ServiceConfig,
    state: Arc<SessionState>,
    events: EventBus,
    transport: DynTransport,
}

impl CatalogQueryEngine {
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

    /// Query a catalog page and publish the raw result.
    ///
    /// Concurrent queries for different page ids are independent and may
    /// complete in any order; consumers match on the page id, not on call
    /// order. A transport failure is logged and produces no result.
    pub async fn query_page(&self, page_id: u32) {
        let ctx = self.state.context();

        let url = format!(
            "{}/2.0/{}/{}/{}/ALL/PAGE/{}/{}/{}",
            self.config.base_url,
            ctx.auth_status,
            self.config.language,
            self.config.platform,
            page_id,
            ctx.claims.subscription_status,
            ctx.location_group_id
        );
        let mut headers = Vec::new();
        if let Some(header) = ctx.entitlement_header() {
            headers.push(header);
        }

        match self.transport.get_json(&url, &headers).await {
            Ok(body) => self.events.emit(SessionEvent::PageQueried(PageResult {
                page_id,
                body: Arc::new(body),
            })),
            Err(err) => warn!(page_id, error = %err, "page query dropped"),
        }
    }
}
