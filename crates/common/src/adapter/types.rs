//! Value types exchanged between the host framework and a bid adapter.

use http::Method;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

use crate::device::DeviceInfo;
use crate::gdpr::GdprConsent;

/// One ad slot as the host hands it to an adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    /// Partner code this request is addressed to
    #[serde(default)]
    pub bidder: String,
    /// Partner-specific parameters from the ad unit config
    #[serde(default)]
    pub params: BidParams,
    #[serde(default)]
    pub ad_unit_code: String,
    /// Candidate sizes, first one preferred
    #[serde(default, deserialize_with = "deserialize_sizes")]
    pub sizes: Vec<AdSize>,
    #[serde(default)]
    pub bid_id: String,
    #[serde(default)]
    pub auction_id: String,
    #[serde(default)]
    pub bidder_request_id: String,
}

/// Ad unit parameters. Values are kept as raw JSON because publishers send
/// ids both as strings and as numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_id: Option<Json>,
    /// Legacy identifier, accepted by validation only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<Json>,
}

/// Width/height pair, serialized as `[w, h]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct AdSize {
    pub width: u32,
    pub height: u32,
}

impl AdSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<[u32; 2]> for AdSize {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<AdSize> for [u32; 2] {
    fn from(size: AdSize) -> Self {
        [size.width, size.height]
    }
}

/// Accepts `[[300, 250], [300, 600]]` as well as a single bare `[300, 250]`.
fn deserialize_sizes<'de, D>(deserializer: D) -> Result<Vec<AdSize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sizes {
        Many(Vec<AdSize>),
        One(AdSize),
    }

    Ok(match Sizes::deserialize(deserializer)? {
        Sizes::Many(sizes) => sizes,
        Sizes::One(size) => vec![size],
    })
}

/// Page location the host reports in place of browser globals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Scheme including the trailing colon, e.g. `https:`
    pub protocol: String,
    pub hostname: String,
    pub href: String,
}

/// Context shared by every bid request in one call to an adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BidderRequestContext {
    #[serde(default)]
    pub bidder_code: String,
    #[serde(default)]
    pub gdpr_consent: Option<GdprConsent>,
    #[serde(default)]
    pub page: Option<PageInfo>,
    #[serde(default)]
    pub device: Option<DeviceInfo>,
}

/// HTTP request descriptor handed back to the host for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct BidderRequest {
    pub method: Method,
    pub url: String,
    /// JSON-encoded payload
    pub data: String,
    /// Context the request was built from
    pub bidder_request: BidderRequestContext,
}

/// Media types of the host's ad unit vocabulary.
///
/// Playground XYZ only bids on `Banner`; the other variants let host ad unit
/// configs name them and let [`BidAdapter::supports_media_type`] refuse them.
///
/// [`BidAdapter::supports_media_type`]: crate::adapter::BidAdapter::supports_media_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Banner,
    Video,
    Native,
}

/// A bid in the host's normalized shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBid {
    /// Bid id of the originating request (the impression id)
    pub request_id: String,
    pub cpm: f64,
    pub creative_id: String,
    pub width: u32,
    pub height: u32,
    /// Creative markup
    pub ad: String,
    pub media_type: MediaType,
    pub currency: String,
    /// Seconds
    pub ttl: u32,
    pub net_revenue: bool,
}

/// Which sync mechanisms the host allows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncOptions {
    #[serde(default)]
    pub iframe_enabled: bool,
    #[serde(default)]
    pub pixel_enabled: bool,
}

/// Sync mechanisms the host can fire. This adapter only emits `Image`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Image,
    Iframe,
}

/// A cookie-matching pixel the host should fire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncPixel {
    #[serde(rename = "type")]
    pub sync_type: SyncType,
    pub url: String,
}
