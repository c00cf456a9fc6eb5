//! Fully wired session facade
//!
//! Bundles the resolver and the catalog components around one shared state
//! and one event bus. Embedders that want to wire components differently can
//! construct them directly; this is the default assembly.

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::catalog::CatalogQueryEngine;
use crate::config::ServiceConfig;
use crate::events::{EventBus, SessionEvent};
use crate::live::LiveDiscoveryFilter;
use crate::playback::PlaybackUrlSigner;
use crate::resolver::SessionResolver;
use crate::state::SessionState;
use crate::streams::StreamResolver;
use crate::transport::DynTransport;

/// A complete session: one shared state, one event bus, every component
pub struct Session {
    state: Arc<SessionState>,
    events: EventBus,
    resolver: SessionResolver,
    catalog: Arc<CatalogQueryEngine>,
    live: LiveDiscoveryFilter,
    streams: StreamResolver,
    playback: PlaybackUrlSigner,
}

impl Session {
    pub fn new(config: ServiceConfig, transport: DynTransport) -> Self {
        let state = Arc::new(SessionState::new());
        let events = EventBus::new();

        let resolver = SessionResolver::new(
            config.clone(),
            Arc::clone(&state),
            events.clone(),
            Arc::clone(&transport),
        );
        let catalog = Arc::new(CatalogQueryEngine::new(
            config.clone(),
            Arc::clone(&state),
            events.clone(),
            Arc::clone(&transport),
        ));
        let live = LiveDiscoveryFilter::new(Arc::clone(&catalog), events.clone());
        let streams = StreamResolver::new(
            config.clone(),
            Arc::clone(&state),
            events.clone(),
            Arc::clone(&transport),
        );
        let playback = PlaybackUrlSigner::new(
            config,
            Arc::clone(&state),
            events.clone(),
            transport,
        );

        Self {
            state,
            events,
            resolver,
            catalog,
            live,
            streams,
            playback,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Subscribe to the session's event bus
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn resolver(&self) -> &SessionResolver {
        &self.resolver
    }

    pub fn catalog(&self) -> &CatalogQueryEngine {
        &self.catalog
    }

    pub fn live(&self) -> &LiveDiscoveryFilter {
        &self.live
    }

    pub fn streams(&self) -> &StreamResolver {
        &self.streams
    }

    pub fn playback(&self) -> &PlaybackUrlSigner {
        &self.playback
    }
}
