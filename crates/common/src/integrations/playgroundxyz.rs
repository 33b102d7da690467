//! Playground XYZ bid adapter.
//!
//! Batches banner bid requests into one `OpenRTB` POST and maps the seat bids
//! in the reply back to normalized bids.

use std::sync::Arc;

use error_stack::{Report, ResultExt};
use http::Method;
use serde::Deserialize;
use serde_json::Value as Json;

use crate::adapter::provider::BidAdapter;
use crate::adapter::types::{
    AdSize, BidRequest, BidderRequest, BidderRequestContext, MediaType, NormalizedBid, PageInfo,
    SyncOptions, SyncPixel, SyncType,
};
use crate::constants::{ADAPTER_VENDOR, BIDDER_ALIASES, BIDDER_CODE};
use crate::device::DeviceInfo;
use crate::error::PlaygroundXyzError;
use crate::gdpr::consent_signals;
use crate::openrtb::{
    AdapterInfo, AppnexusImpExt, Banner, Bid, Format, Imp, ImpExt, OpenRtbRequest, PxyzImpExt,
    Site,
};
use crate::settings::{AdapterConfig, Settings};

/// Playground XYZ adapter.
pub struct PlaygroundXyzAdapter {
    config: AdapterConfig,
}

impl PlaygroundXyzAdapter {
    /// Create a new adapter from its configuration.
    #[must_use]
    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }

    /// Convert host bid requests into the batched `OpenRTB` payload.
    fn to_openrtb(
        &self,
        bid_requests: &[BidRequest],
        bidder_request: &BidderRequestContext,
    ) -> OpenRtbRequest {
        let imp = bid_requests.iter().map(|bid| self.to_imp(bid)).collect();
        let (user, regs) = consent_signals(bidder_request.gdpr_consent.as_ref());

        OpenRtbRequest {
            id: bid_requests
                .first()
                .map(|bid| bid.auction_id.clone())
                .unwrap_or_default(),
            imp,
            site: bidder_request.page.as_ref().map(to_site),
            device: bidder_request.device.as_ref().map(DeviceInfo::to_openrtb),
            user,
            regs,
        }
    }

    fn to_imp(&self, bid: &BidRequest) -> Imp {
        Imp {
            id: bid.bid_id.clone(),
            banner: to_banner(&bid.sizes),
            ext: ImpExt {
                appnexus: AppnexusImpExt {
                    placement_id: bid.params.placement_id.as_ref().and_then(parse_int),
                },
                pxyz: PxyzImpExt {
                    adapter: AdapterInfo {
                        vendor: ADAPTER_VENDOR.to_string(),
                        prebid: self.config.prebid_version.clone(),
                    },
                },
            },
        }
    }

    /// Map one response bid. Returns `None` for bids the host cannot use.
    fn parse_bid(&self, bid: &Bid, currency: &str) -> Option<NormalizedBid> {
        let Some(request_id) = bid.impid.clone() else {
            log::debug!("Playground XYZ: skipping bid without impid");
            return None;
        };

        let Some(price) = bid.price else {
            log::debug!("Playground XYZ: skipping bid for '{request_id}' without price");
            return None;
        };

        if price == 0.0 {
            log::debug!("Playground XYZ: skipping zero price bid for '{request_id}'");
            return None;
        }

        Some(NormalizedBid {
            request_id,
            cpm: price,
            creative_id: bid.adid.clone().unwrap_or_default(),
            width: bid.w.unwrap_or(0),
            height: bid.h.unwrap_or(0),
            ad: bid.adm.clone().unwrap_or_default(),
            media_type: MediaType::Banner,
            currency: currency.to_string(),
            ttl: self.config.ttl,
            net_revenue: true,
        })
    }

    /// Parse the decoded response JSON into normalized bids.
    ///
    /// Each bid is decoded on its own so one malformed entry only costs that
    /// bid. Bids are kept only for impressions present in the outgoing request,
    /// at most one per impression.
    fn parse_response_json(&self, json: &Json, request: &BidderRequest) -> Vec<NormalizedBid> {
        let bidder_code = request.bidder_request.bidder_code.as_str();

        if let Some(error) = json.get("error").filter(|error| is_truthy(error)) {
            log::error!("in response for {bidder_code} adapter: {error}");
            return Vec::new();
        }

        let Some(seatbids) = json.get("seatbid").and_then(Json::as_array) else {
            log::error!("in response for {bidder_code} adapter Malformed seatbid response");
            return Vec::new();
        };

        let currency = json
            .get("cur")
            .and_then(Json::as_str)
            .filter(|cur| !cur.is_empty())
            .unwrap_or(self.config.default_currency.as_str());

        let mut open_imps = requested_imp_ids(&request.data);
        let mut bids = Vec::new();

        for seatbid in seatbids {
            let Some(bid_array) = seatbid.get("bid").and_then(Json::as_array) else {
                continue;
            };

            for bid_obj in bid_array {
                let bid = match Bid::deserialize(bid_obj) {
                    Ok(bid) => bid,
                    Err(e) => {
                        log::warn!("Playground XYZ: skipping malformed bid for {bidder_code}: {e}");
                        continue;
                    }
                };

                let Some(bid) = self.parse_bid(&bid, currency) else {
                    continue;
                };

                match open_imps.iter().position(|id| *id == bid.request_id) {
                    Some(index) => {
                        open_imps.swap_remove(index);
                        bids.push(bid);
                    }
                    None => log::debug!(
                        "Playground XYZ: dropping bid for unrequested or already filled impression '{}'",
                        bid.request_id
                    ),
                }
            }
        }

        log::debug!(
            "Playground XYZ: parsed {} bids from {} seats",
            bids.len(),
            seatbids.len()
        );

        bids
    }
}

/// Impression ids carried by an outgoing request payload.
fn requested_imp_ids(data: &str) -> Vec<String> {
    match serde_json::from_str::<OpenRtbRequest>(data) {
        Ok(payload) => payload.imp.into_iter().map(|imp| imp.id).collect(),
        Err(e) => {
            log::warn!("Playground XYZ: cannot read impressions from request payload: {e}");
            Vec::new()
        }
    }
}

fn to_site(page: &PageInfo) -> Site {
    Site {
        domain: format!("{}//{}", page.protocol, page.hostname),
        name: page.hostname.clone(),
        page: page.href.clone(),
    }
}

fn to_banner(sizes: &[AdSize]) -> Banner {
    let first = sizes.first();
    Banner {
        w: first.map(|size| size.width),
        h: first.map(|size| size.height),
        format: sizes
            .iter()
            .map(|size| Format {
                w: size.width,
                h: size.height,
            })
            .collect(),
    }
}

/// JavaScript truthiness of a parameter value.
fn is_truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

/// Parse a placement id the way the host's `parseInt(value, 10)` does:
/// leading whitespace and sign, then as many decimal digits as follow.
fn parse_int(value: &Json) -> Option<i64> {
    match value {
        Json::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Json::String(s) => {
            let s = s.trim_start();
            let (negative, digits) = match s.as_bytes().first() {
                Some(b'-') => (true, &s[1..]),
                Some(b'+') => (false, &s[1..]),
                _ => (false, s),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            let parsed = digits[..end].parse::<i64>().ok()?;
            Some(if negative { -parsed } else { parsed })
        }
        _ => None,
    }
}

impl BidAdapter for PlaygroundXyzAdapter {
    fn code(&self) -> &'static str {
        BIDDER_CODE
    }

    fn aliases(&self) -> &'static [&'static str] {
        BIDDER_ALIASES
    }

    fn is_bid_request_valid(&self, bid: &BidRequest) -> bool {
        let params = &bid.params;
        params.placement_id.as_ref().is_some_and(is_truthy)
            || params.publisher_id.as_ref().is_some_and(is_truthy)
    }

    fn build_requests(
        &self,
        bid_requests: &[BidRequest],
        bidder_request: &BidderRequestContext,
    ) -> Result<BidderRequest, Report<PlaygroundXyzError>> {
        if bid_requests.is_empty() {
            return Err(Report::new(PlaygroundXyzError::InvalidRequest {
                message: "no bid requests to send to Playground XYZ".to_string(),
            }));
        }

        log::info!(
            "Playground XYZ: building request for {} bids",
            bid_requests.len()
        );

        let payload = self.to_openrtb(bid_requests, bidder_request);
        let data =
            serde_json::to_string(&payload).change_context(PlaygroundXyzError::Serialization {
                message: "Failed to serialize Playground XYZ bid request".to_string(),
            })?;

        log::debug!(
            "Playground XYZ: request to {}: {}",
            self.config.endpoint,
            data
        );

        Ok(BidderRequest {
            method: Method::POST,
            url: self.config.endpoint.clone(),
            data,
            bidder_request: bidder_request.clone(),
        })
    }

    fn interpret_response(
        &self,
        body: Option<&[u8]>,
        request: &BidderRequest,
    ) -> Vec<NormalizedBid> {
        let bidder_code = request.bidder_request.bidder_code.as_str();

        let json = match body.filter(|bytes| !bytes.is_empty()) {
            Some(bytes) => match serde_json::from_slice::<Json>(bytes) {
                Ok(Json::Null) => None,
                Ok(json) => Some(json),
                Err(e) => {
                    log::warn!("Playground XYZ: response body is not JSON: {e}");
                    None
                }
            },
            None => None,
        };

        let Some(json) = json else {
            log::error!("in response for {bidder_code} adapter");
            return Vec::new();
        };

        let bids = self.parse_response_json(&json, request);
        log::info!("Playground XYZ returned {} bids", bids.len());
        bids
    }

    fn user_syncs(&self, sync_options: &SyncOptions) -> Vec<SyncPixel> {
        // The partner only offers an image sync; iframe permission is irrelevant.
        log::debug!(
            "Playground XYZ: user syncs requested (iframe_enabled={})",
            sync_options.iframe_enabled
        );

        vec![SyncPixel {
            sync_type: SyncType::Image,
            url: self.config.sync_url.clone(),
        }]
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

// ============================================================================
// Adapter Auto-Registration
// ============================================================================

/// Auto-register the Playground XYZ adapter based on settings.
///
/// Returns the adapter if enabled in settings.
#[must_use]
pub fn register_adapters(settings: &Settings) -> Vec<Arc<dyn BidAdapter>> {
    let mut adapters: Vec<Arc<dyn BidAdapter>> = Vec::new();

    if settings.adapter.enabled {
        log::info!(
            "Registering Playground XYZ adapter (endpoint: {})",
            settings.adapter.endpoint
        );
        adapters.push(Arc::new(PlaygroundXyzAdapter::new(settings.adapter.clone())));
    } else {
        log::debug!("Playground XYZ adapter is disabled");
    }

    adapters
}

// ============================================================================
// Tests
// ============================================================================
