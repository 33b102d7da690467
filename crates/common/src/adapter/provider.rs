//! Trait definition for bid adapters.

use error_stack::Report;

use crate::error::PlaygroundXyzError;

use super::types::{
    BidRequest, BidderRequest, BidderRequestContext, MediaType, NormalizedBid, SyncOptions,
    SyncPixel,
};

/// Trait implemented by every demand partner adapter.
///
/// Adapters are pure translators: the host validates and batches bid requests
/// through them, performs the HTTP exchange itself, and hands the raw response
/// body back for interpretation.
pub trait BidAdapter: Send + Sync {
    /// Partner code the host registers this adapter under (e.g. "playgroundxyz").
    fn code(&self) -> &'static str;

    /// Alternate codes resolving to this adapter.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check if this adapter supports a specific media type.
    fn supports_media_type(&self, media_type: &MediaType) -> bool {
        // By default, support banner ads
        matches!(media_type, MediaType::Banner)
    }

    /// Whether `bid` carries the parameters this partner needs. Never fails.
    fn is_bid_request_valid(&self, bid: &BidRequest) -> bool;

    /// Batch `bid_requests` into one outgoing HTTP request.
    ///
    /// # Errors
    ///
    /// Returns an error when there is nothing to send or the payload cannot be
    /// encoded.
    fn build_requests(
        &self,
        bid_requests: &[BidRequest],
        bidder_request: &BidderRequestContext,
    ) -> Result<BidderRequest, Report<PlaygroundXyzError>>;

    /// Translate the partner's response body into normalized bids.
    ///
    /// A missing, empty, or malformed body yields no bids rather than an error.
    fn interpret_response(&self, body: Option<&[u8]>, request: &BidderRequest)
        -> Vec<NormalizedBid>;

    /// User-sync pixels the host should fire for cookie matching.
    fn user_syncs(&self, sync_options: &SyncOptions) -> Vec<SyncPixel>;

    /// Check if this adapter is enabled.
    fn is_enabled(&self) -> bool {
        true
    }
}
