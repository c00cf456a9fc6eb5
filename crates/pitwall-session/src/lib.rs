//! Session and catalog orchestration for a subscription video service
//!
//! Converts an externally captured login credential into a chain of derived
//! authorization artifacts (subscription status, home region, entitlement
//! credential, location group) and drives the content-discovery pipeline
//! built on top of them: page listings, live-session extraction, per-content
//! stream enumeration and playable-URL signing.
//!
//! All network-facing operations are best-effort: failures are logged and
//! absorbed, and results surface as [`events::SessionEvent`]s on the
//! session's broadcast bus (or never).

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod live;
pub mod playback;
pub mod resolver;
pub mod session;
pub mod state;
pub mod streams;
pub mod transport;

pub use catalog::CatalogQueryEngine;
pub use config::ServiceConfig;
pub use error::TransportError;
pub use events::{EventBus, SessionEvent};
pub use live::LiveDiscoveryFilter;
pub use playback::PlaybackUrlSigner;
pub use resolver::SessionResolver;
pub use session::Session;
pub use state::{RequestContext, SessionState};
pub use streams::StreamResolver;
pub use transport::{ApiTransport, DynTransport, HttpTransport};
