/// Partner code the host framework registers this adapter under.
pub const BIDDER_CODE: &str = "playgroundxyz";

/// Alternate codes that resolve to the same adapter.
pub const BIDDER_ALIASES: &[&str] = &["playgroundxyz"];

pub const DEFAULT_ENDPOINT: &str = "https://ads.playground.xyz/host-config/prebid?v=2";

pub const DEFAULT_SYNC_URL: &str =
    "//ib.adnxs.com/getuidnb?https://ads.playground.xyz/usersync?partner=appnexus&uid=$UID";

pub const DEFAULT_CURRENCY: &str = "USD";

/// Seconds a bid stays cacheable in the host.
pub const DEFAULT_TTL_SECS: u32 = 300;

/// Adapter version reported in `imp.ext.pxyz.adapter.prebid`.
pub const DEFAULT_PREBID_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vendor reported in `imp.ext.pxyz.adapter.vendor`.
pub const ADAPTER_VENDOR: &str = "prebid";

/// Prefix for environment overrides, e.g. `PLAYGROUNDXYZ__ADAPTER__ENDPOINT`.
pub const ENV_PREFIX: &str = "PLAYGROUNDXYZ";
pub const ENV_SEPARATOR: &str = "__";
