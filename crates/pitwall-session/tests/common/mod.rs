//! Shared test support for the session integration tests
//!
//! Provides a canned-response transport that records every request it
//! serves, plus credential and response-body builders.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose;
use base64::Engine as _;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::sync::Notify;

use pitwall_session::{ApiTransport, ServiceConfig, Session, SessionEvent, TransportError};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

struct Route {
    fragment: String,
    body: Value,
    gate: Option<Arc<Notify>>,
}

/// Mock transport simulating the video service API.
///
/// Routes are consumed in FIFO order among those matching the requested URL,
/// so repeated calls against the same endpoint can be given distinct
/// responses. A gated route parks the request until the gate is notified,
/// which lets tests interleave in-flight completions deterministically.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<VecDeque<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, fragment: &str, body: Value) {
        self.routes.lock().unwrap().push_back(Route {
            fragment: fragment.to_string(),
            body,
            gate: None,
        });
    }

    /// Queue a response that is held back until the returned gate is notified
    pub fn respond_gated(&self, fragment: &str, body: Value) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.routes.lock().unwrap().push_back(Route {
            fragment: fragment.to_string(),
            body,
            gate: Some(Arc::clone(&gate)),
        });
        gate
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, fragment: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .count()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
        });

        let route = {
            let mut routes = self.routes.lock().unwrap();
            routes
                .iter()
                .position(|r| url.contains(&r.fragment))
                .and_then(|i| routes.remove(i))
        };

        match route {
            Some(route) => {
                if let Some(gate) = &route.gate {
                    gate.notified().await;
                }
                Ok(route.body)
            }
            None => Err(TransportError::Status(404)),
        }
    }
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig::new("https://play.test")
}

pub fn test_session(transport: &Arc<MockTransport>) -> Session {
    init_tracing();
    Session::new(test_config(), transport.clone())
}

/// Route test logs through tracing-subscriber; safe to call repeatedly
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Build a raw credential whose embedded payload carries the given
/// subscribed product and home region
pub fn credential(product: &str, region: &str) -> String {
    let payload = json!({
        "SubscribedProduct": product,
        "ExternalAuthorizationsContextData": region,
    });
    let segment = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("header.{segment}.signature")
}

pub fn entitled_credential() -> String {
    credential("TV Pro", "GBR")
}

pub fn registered_credential() -> String {
    credential("", "GBR")
}

pub fn location_body(group_id: i64) -> Value {
    json!({ "resultObj": { "userLocation": [ { "groupId": group_id } ] } })
}

pub fn entitlement_body(token: &str) -> Value {
    json!({ "resultObj": { "entitlementToken": token } })
}

pub fn live_node(content_id: i64) -> Value {
    json!({
        "contentType": "VIDEO",
        "contentSubtype": "LIVE",
        "metadata": { "contentId": content_id }
    })
}

pub fn live_page_body(nodes: Vec<Value>) -> Value {
    json!({
        "resultObj": {
            "containers": [
                { "retrieveItems": { "resultObj": { "containers": nodes } } }
            ]
        }
    })
}

pub fn content_body(metadata: Value) -> Value {
    json!({ "resultObj": { "containers": [ { "metadata": metadata } ] } })
}

pub fn signed_url_body(url: &str) -> Value {
    json!({ "resultObj": { "url": url } })
}

/// Collect everything currently buffered on a subscription
pub fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
