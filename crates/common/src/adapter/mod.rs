//! Host-facing bid adapter framework.
//!
//! This module defines the contract between a header-bidding host and a demand
//! partner adapter: the [`BidAdapter`] trait, the values that cross it, and a
//! registry that builds the adapters enabled in [`crate::settings::Settings`].
//!
//! Note: Individual adapters are located in the `integrations` module
//! (e.g., `crate::integrations::playgroundxyz`).

pub mod provider;
pub mod registry;
pub mod types;

pub use provider::BidAdapter;
pub use registry::AdapterRegistry;
pub use types::{
    AdSize, BidParams, BidRequest, BidderRequest, BidderRequestContext, MediaType, NormalizedBid,
    PageInfo, SyncOptions, SyncPixel, SyncType,
};
