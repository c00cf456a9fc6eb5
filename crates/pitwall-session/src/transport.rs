//! Outbound transport abstraction for the video service API
//!
//! Components build full URLs and header lists themselves; the transport only
//! performs the GET and hands back parsed JSON. Tests substitute a mock
//! implementation of [`ApiTransport`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::error::TransportError;

/// Abstraction over HTTP GET requests returning a JSON body
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<Value, TransportError>;
}

/// Shared trait object handed to every component at construction
pub type DynTransport = Arc<dyn ApiTransport>;

/// Production transport backed by a pooled reqwest client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<Value, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "non-success status from catalog API");
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
