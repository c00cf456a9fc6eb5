//! Session event bus
//!
//! Named events fanned out over a tokio broadcast channel. Emitting with no
//! live subscribers is not an error; a subscription ends when its receiver is
//! dropped, so one-shot listeners cannot leak.

use pitwall_core::{LiveSession, PageResult, StreamDescriptor};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events published by the session and catalog components
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A new raw session credential was accepted
    CredentialChanged,
    /// The resolved location group moved to a new id
    LocationGroupChanged { group_id: i64 },
    /// A fresh entitlement credential was stored
    EntitlementChanged { token: String },
    /// A catalog page query completed
    PageQueried(PageResult),
    /// Live sessions were found on the live listing page
    LiveSessionsAvailable { sessions: Vec<LiveSession> },
    /// Stream descriptors resolved for a piece of content
    ContentStreams {
        content_id: i64,
        streams: Vec<StreamDescriptor>,
    },
    /// A relative playback path was exchanged for a signed URL
    TokenisedUrl {
        playback_path: String,
        signed_url: String,
    },
}

/// Broadcast bus shared by every component of a session
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        // a send error only means nobody is subscribed right now
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
