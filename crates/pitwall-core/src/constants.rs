//! Wire constants for the catalog API

/// Page id of the live listing page served by the catalog
pub const LIVE_LISTING_PAGE_ID: u32 = 395;

/// Content type carried by playable video nodes
pub const CONTENT_TYPE_VIDEO: &str = "VIDEO";

/// Content subtype carried by currently-airing broadcasts
pub const CONTENT_SUBTYPE_LIVE: &str = "LIVE";

/// Auth status path segment for authenticated sessions
pub const AUTH_REGISTERED: &str = "R";

/// Auth status path segment for anonymous sessions
pub const AUTH_ANONYMOUS: &str = "A";

/// Request header carrying the raw session credential
pub const HEADER_ASCENDON_TOKEN: &str = "ascendontoken";

/// Request header carrying the derived entitlement credential
pub const HEADER_ENTITLEMENT_TOKEN: &str = "entitlementtoken";

/// Subscription tier reported for anonymous sessions
pub const STATUS_ANONYMOUS: &str = "Anonymous";

/// Subscription tier reported when the subscribed-product claim is empty
pub const STATUS_REGISTERED: &str = "Registered";
