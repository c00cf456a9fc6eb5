//! Catalog data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::constants::{CONTENT_SUBTYPE_LIVE, CONTENT_TYPE_VIDEO};

/// Raw result of a catalog page query.
///
/// The body is shared rather than deep-cloned per subscriber and is not
/// retained beyond the consumer's handling.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub page_id: u32,
    pub body: Arc<Value>,
}

/// A node of the nested catalog tree that may represent a live broadcast.
///
/// The tree is loosely shaped, so every discriminating field is optional and
/// the remainder of the node is kept verbatim for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSession {
    #[serde(default, rename = "contentType")]
    pub content_type: Option<String>,
    #[serde(default, rename = "contentSubtype")]
    pub content_subtype: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LiveSession {
    /// A node qualifies as a live session iff it carries metadata and is a
    /// VIDEO node with the LIVE subtype.
    pub fn is_live(&self) -> bool {
        self.metadata.is_some()
            && self.content_type.as_deref() == Some(CONTENT_TYPE_VIDEO)
            && self.content_subtype.as_deref() == Some(CONTENT_SUBTYPE_LIVE)
    }
}

/// A playable stream attached to a piece of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(default, rename = "type")]
    pub stream_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "playbackUrl", alias = "playbackPath")]
    pub playback_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_live_predicate() {
        let live: LiveSession = serde_json::from_value(json!({
            "contentType": "VIDEO",
            "contentSubtype": "LIVE",
            "metadata": { "title": "Race" }
        }))
        .unwrap();
        assert!(live.is_live());

        let replay: LiveSession = serde_json::from_value(json!({
            "contentType": "VIDEO",
            "contentSubtype": "REPLAY",
            "metadata": {}
        }))
        .unwrap();
        assert!(!replay.is_live());

        let no_metadata: LiveSession = serde_json::from_value(json!({
            "contentType": "VIDEO",
            "contentSubtype": "LIVE"
        }))
        .unwrap();
        assert!(!no_metadata.is_live());
    }

    #[test]
    fn test_live_session_keeps_unknown_fields() {
        let node = json!({
            "contentType": "VIDEO",
            "contentSubtype": "LIVE",
            "metadata": { "contentId": 1000005 },
            "id": "container-7"
        });
        let session: LiveSession = serde_json::from_value(node).unwrap();
        assert_eq!(session.extra.get("id"), Some(&json!("container-7")));
    }

    #[test]
    fn test_stream_descriptor_wire_names() {
        let stream: StreamDescriptor = serde_json::from_value(json!({
            "type": "obc",
            "title": "ONBOARD 44",
            "playbackUrl": "CONTENT/PLAY?contentId=99&channelId=3"
        }))
        .unwrap();
        assert_eq!(stream.stream_type, "obc");
        assert_eq!(stream.playback_path, "CONTENT/PLAY?contentId=99&channelId=3");
    }
}
