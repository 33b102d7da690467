//! Playground XYZ bid adapter for header-bidding hosts.
//!
//! This crate translates a host's ad slot requests into the `OpenRTB` payload
//! Playground XYZ expects, and translates the partner's reply back into the
//! host's normalized bids. It performs no I/O: the host sends the request and
//! hands the response body back.
//!
//! # Modules
//!
//! - [`adapter`]: The `BidAdapter` trait, host-facing types and the adapter registry
//! - [`constants`]: Partner code, endpoints and defaults
//! - [`device`]: Device type classification from the user agent
//! - [`error`]: Error types and error handling utilities
//! - [`gdpr`]: GDPR consent passthrough
//! - [`integrations`]: Partner adapters
//! - [`openrtb`]: `OpenRTB` wire types
//! - [`settings`]: Configuration management and validation
//! - [`test_support`]: Testing utilities and fixtures

pub mod adapter;
pub mod constants;
pub mod device;
pub mod error;
pub mod gdpr;
pub mod integrations;
pub mod openrtb;
pub mod settings;
