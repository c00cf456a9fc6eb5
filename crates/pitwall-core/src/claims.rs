//! Embedded-claims decoding for raw session credentials
//!
//! The raw credential is a dot-separated token whose second segment is a
//! base64-encoded JSON object. Decoding fails closed: anything that cannot be
//! decoded is treated as an anonymous session rather than surfaced as an
//! error.

use base64::engine::general_purpose;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::constants::{STATUS_ANONYMOUS, STATUS_REGISTERED};

/// Attributes derived from the raw session credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subscription tier, with internal spaces normalized to underscores
    pub subscription_status: String,
    /// Home region code used for location-scoped requests
    pub home_region: String,
    pub is_authenticated: bool,
}

/// Fields of the embedded payload this layer cares about
#[derive(Debug, Default, Deserialize)]
struct ClaimsPayload {
    #[serde(default, rename = "SubscribedProduct")]
    subscribed_product: String,
    #[serde(default, rename = "ExternalAuthorizationsContextData")]
    home_region: String,
}

impl Claims {
    /// Claims of a session with no usable credential
    pub fn anonymous() -> Self {
        Self {
            subscription_status: STATUS_ANONYMOUS.to_string(),
            home_region: String::new(),
            is_authenticated: false,
        }
    }

    /// Decode the claims embedded in a raw session credential.
    ///
    /// An empty or undecodable credential yields the anonymous claims. A
    /// decodable credential with an empty subscribed-product claim is a
    /// registered-but-unsubscribed account.
    pub fn decode(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::anonymous();
        }

        let payload = match decode_payload(raw) {
            Some(payload) => payload,
            None => {
                debug!("undecodable claims payload, treating session as anonymous");
                return Self::anonymous();
            }
        };

        let subscription_status = if payload.subscribed_product.is_empty() {
            STATUS_REGISTERED.to_string()
        } else {
            payload.subscribed_product.replace(' ', "_")
        };

        Self {
            subscription_status,
            home_region: payload.home_region,
            is_authenticated: true,
        }
    }
}

fn decode_payload(raw: &str) -> Option<ClaimsPayload> {
    let segment = raw.split('.').nth(1)?;
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| general_purpose::STANDARD.decode(segment))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extract the raw session credential from a captured session cookie value.
///
/// The cookie value is percent-encoded JSON carrying the credential at
/// `data.subscriptionToken`. Returns `None` on any shape mismatch; the
/// capture collaborator owns deciding what to do with an unusable cookie.
pub fn session_token_from_cookie(value: &str) -> Option<String> {
    let decoded = urlencoding::decode(value).ok()?;
    let parsed: Value = serde_json::from_str(&decoded).ok()?;
    parsed
        .get("data")?
        .get("subscriptionToken")?
        .as_str()
        .map(str::to_owned)
}
