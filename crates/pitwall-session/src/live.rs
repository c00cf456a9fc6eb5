//! Live-session discovery over the live listing page
//!
//! A one-shot pipeline stage: query the live listing page, take the first
//! matching page result off a private bus subscription, extract the leaf
//! nodes that are currently airing and publish the aggregated list. The
//! subscription is dropped when the call returns, so it can neither fire
//! twice nor leak.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;

use pitwall_core::constants::LIVE_LISTING_PAGE_ID;
use pitwall_core::LiveSession;

use crate::catalog::CatalogQueryEngine;
use crate::events::{EventBus, SessionEvent};

/// Extracts currently-airing sessions from the live listing page
pub struct LiveDiscoveryFilter {
    catalog: Arc<CatalogQueryEngine>,
    events: EventBus,
}

impl LiveDiscoveryFilter {
    pub fn new(catalog: Arc<CatalogQueryEngine>, events: EventBus) -> Self {
        Self { catalog, events }
    }

    /// Query the live listing page and extract the live sessions on it.
    ///
    /// Emits [`SessionEvent::LiveSessionsAvailable`] only when at least one
    /// qualifying node was found; an empty page is not an error and produces
    /// no emission. Every invocation subscribes independently, so sequential
    /// or concurrent discoveries do not interfere with each other.
    pub async fn discover_live_sessions(&self) -> Option<Vec<LiveSession>> {
        // subscribe before issuing the query so the completion cannot be
        // missed; the receiver buffers anything emitted in between
        let mut rx = self.events.subscribe();
        self.catalog.query_page(LIVE_LISTING_PAGE_ID).await;

        loop {
            match rx.try_recv() {
                Ok(SessionEvent::PageQueried(result)) if result.page_id == LIVE_LISTING_PAGE_ID => {
                    let sessions = collect_live_sessions(&result.body);
                    if sessions.is_empty() {
                        debug!("live listing page carries no live sessions");
                        return None;
                    }
                    self.events.emit(SessionEvent::LiveSessionsAvailable {
                        sessions: sessions.clone(),
                    });
                    return Some(sessions);
                }
                Ok(_) => continue,
                Err(TryRecvError::Lagged(_)) => continue,
                // the query completed without a matching result
                Err(_) => return None,
            }
        }
    }
}

/// Walk `resultObj.containers[*].retrieveItems.resultObj.containers[*]` and
/// collect the nodes that qualify as live sessions.
pub(crate) fn collect_live_sessions(body: &Value) -> Vec<LiveSession> {
    let mut sessions = Vec::new();

    let containers = body
        .pointer("/resultObj/containers")
        .and_then(Value::as_array);
    for container in containers.into_iter().flatten() {
        let nested = container
            .pointer("/retrieveItems/resultObj/containers")
            .and_then(Value::as_array);
        for node in nested.into_iter().flatten() {
            if let Ok(session) = serde_json::from_value::<LiveSession>(node.clone()) {
                if session.is_live() {
                    sessions.push(session);
                }
            }
        }
    }

    sessions
}
