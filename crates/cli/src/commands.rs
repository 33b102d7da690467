//! Subcommand implementations.
//!
//! Each command returns the JSON document to print so it can be tested
//! without capturing stdout.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value as Json};

use playgroundxyz_common::adapter::{
    AdapterRegistry, BidAdapter, BidRequest, BidderRequestContext, SyncOptions,
};
use playgroundxyz_common::constants::BIDDER_CODE;
use playgroundxyz_common::gdpr::GdprConsent;
use playgroundxyz_common::settings::Settings;

use crate::error::CliError;

/// Load settings from `file`, or the embedded defaults when no file is given.
///
/// Environment variables prefixed with `PLAYGROUNDXYZ__` override either source.
pub(crate) fn load_settings(file: Option<&Path>) -> Result<Settings, CliError> {
    let settings = match file {
        Some(path) => {
            log::debug!("Loading config from: {}", path.display());
            let content = fs::read_to_string(path)?;
            Settings::from_toml(&content)
        }
        None => Settings::new(),
    };

    settings.map_err(|e| CliError::Config(format!("{e:?}")))
}

fn resolve_adapter(settings: &Settings) -> Result<Arc<dyn BidAdapter>, CliError> {
    AdapterRegistry::from_settings(settings)
        .get(BIDDER_CODE)
        .ok_or_else(|| CliError::Config(format!("adapter '{BIDDER_CODE}' is disabled")))
}

fn read_bid_requests(path: &Path) -> Result<Vec<BidRequest>, CliError> {
    let content = fs::read_to_string(path)?;
    let bids: Vec<BidRequest> = serde_json::from_str(&content)?;
    if bids.is_empty() {
        return Err(CliError::Input(format!(
            "no bid requests in {}",
            path.display()
        )));
    }
    Ok(bids)
}

/// Report the validity of every bid request in `bids_file`.
pub fn validate(settings: &Settings, bids_file: &Path) -> Result<Json, CliError> {
    let adapter = resolve_adapter(settings)?;
    let results: Vec<Json> = read_bid_requests(bids_file)?
        .iter()
        .map(|bid| {
            json!({
                "bidId": bid.bid_id,
                "adUnitCode": bid.ad_unit_code,
                "valid": adapter.is_bid_request_valid(bid),
            })
        })
        .collect();

    Ok(Json::Array(results))
}

/// Options for [`build`] beyond the bid requests themselves.
#[derive(Debug, Default)]
pub struct BuildOptions<'a> {
    /// JSON file holding a full bidder request context
    pub context_file: Option<&'a Path>,
    pub consent_string: Option<String>,
    pub gdpr_applies: Option<bool>,
}

/// Build the outgoing request for the valid bid requests in `bids_file`.
pub fn build(
    settings: &Settings,
    bids_file: &Path,
    options: BuildOptions<'_>,
) -> Result<Json, CliError> {
    let adapter = resolve_adapter(settings)?;

    let mut context: BidderRequestContext = match options.context_file {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => BidderRequestContext::default(),
    };
    if context.bidder_code.is_empty() {
        context.bidder_code = adapter.code().to_string();
    }
    if options.consent_string.is_some() || options.gdpr_applies.is_some() {
        let consent = context.gdpr_consent.get_or_insert_with(GdprConsent::default);
        if options.consent_string.is_some() {
            consent.consent_string = options.consent_string;
        }
        if options.gdpr_applies.is_some() {
            consent.gdpr_applies = options.gdpr_applies;
        }
    }

    let (valid, invalid): (Vec<BidRequest>, Vec<BidRequest>) = read_bid_requests(bids_file)?
        .into_iter()
        .partition(|bid| adapter.is_bid_request_valid(bid));

    for bid in &invalid {
        log::warn!(
            "Skipping bid request '{}' for ad unit '{}': missing placement",
            bid.bid_id,
            bid.ad_unit_code
        );
    }

    let request = adapter
        .build_requests(&valid, &context)
        .map_err(|e| CliError::Adapter(format!("{e:?}")))?;

    Ok(json!({
        "method": request.method.as_str(),
        "url": request.url,
        "data": serde_json::from_str::<Json>(&request.data)?,
    }))
}

/// Interpret a response body stored in `response_file` against the request
/// built from the valid bid requests in `bids_file`.
///
/// An empty response file stands for a response without a body.
pub fn interpret(
    settings: &Settings,
    bids_file: &Path,
    response_file: &Path,
) -> Result<Json, CliError> {
    let adapter = resolve_adapter(settings)?;
    let context = BidderRequestContext {
        bidder_code: adapter.code().to_string(),
        ..Default::default()
    };

    let valid: Vec<BidRequest> = read_bid_requests(bids_file)?
        .into_iter()
        .filter(|bid| adapter.is_bid_request_valid(bid))
        .collect();
    let request = adapter
        .build_requests(&valid, &context)
        .map_err(|e| CliError::Adapter(format!("{e:?}")))?;

    let body = fs::read(response_file)?;
    let bids = adapter.interpret_response(Some(body.as_slice()), &request);
    Ok(serde_json::to_value(bids)?)
}

/// List the user-sync pixels for the given options.
pub fn syncs(settings: &Settings, sync_options: SyncOptions) -> Result<Json, CliError> {
    let adapter = resolve_adapter(settings)?;
    Ok(serde_json::to_value(adapter.user_syncs(&sync_options))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).expect("should create file");
        write!(file, "{content}").expect("should write file");
        path
    }

    fn bids_file(dir: &TempDir) -> PathBuf {
        write_file(
            dir,
            "bids.json",
            r#"[
                {
                    "bidder": "playgroundxyz",
                    "params": { "placementId": "10433394" },
                    "adUnitCode": "adunit-code",
                    "sizes": [[300, 250], [300, 600]],
                    "bidId": "30b31c1838de1e",
                    "bidderRequestId": "22edbae2733bf6",
                    "auctionId": "1d1a030790a475"
                },
                {
                    "bidder": "playgroundxyz",
                    "params": { "placementId": 0 },
                    "adUnitCode": "broken-unit",
                    "sizes": [[728, 90]],
                    "bidId": "invalid-bid",
                    "bidderRequestId": "22edbae2733bf6",
                    "auctionId": "1d1a030790a475"
                }
            ]"#,
        )
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_file(&dir, "config.toml", "[adapter]\nttl = 120\n");

        let settings = load_settings(Some(path.as_path())).expect("should load settings");
        assert_eq!(settings.adapter.ttl, 120);
    }

    #[test]
    fn test_load_settings_rejects_invalid_file() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_file(&dir, "config.toml", "[adapter]\nttl = 0\n");

        let result = load_settings(Some(path.as_path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_reports_each_bid() {
        let dir = TempDir::new().expect("should create temp dir");
        let output =
            validate(&Settings::default(), &bids_file(&dir)).expect("should validate bids");

        assert_eq!(output[0]["valid"], true);
        assert_eq!(output[1]["valid"], false);
        assert_eq!(output[1]["bidId"], "invalid-bid");
    }

    #[test]
    fn test_build_skips_invalid_bids_and_applies_consent() {
        let dir = TempDir::new().expect("should create temp dir");
        let options = BuildOptions {
            consent_string: Some("XYZ-CONSENT".to_string()),
            gdpr_applies: Some(true),
            ..Default::default()
        };

        let output =
            build(&Settings::default(), &bids_file(&dir), options).expect("should build request");

        assert_eq!(output["method"], "POST");
        assert_eq!(
            output["url"],
            "https://ads.playground.xyz/host-config/prebid?v=2"
        );
        assert_eq!(output["data"]["imp"].as_array().map(Vec::len), Some(1));
        assert_eq!(output["data"]["regs"]["ext"]["gdpr"], 1);
        assert_eq!(output["data"]["user"]["ext"]["consent"], "XYZ-CONSENT");
    }

    #[test]
    fn test_build_reads_context_file() {
        let dir = TempDir::new().expect("should create temp dir");
        let context = write_file(
            &dir,
            "context.json",
            r#"{
                "page": { "protocol": "https:", "hostname": "example.com", "href": "https://example.com/" },
                "device": { "userAgent": "Roku/DVP-12.0" }
            }"#,
        );
        let options = BuildOptions {
            context_file: Some(context.as_path()),
            ..Default::default()
        };

        let output =
            build(&Settings::default(), &bids_file(&dir), options).expect("should build request");

        assert_eq!(output["data"]["site"]["domain"], "https://example.com");
        assert_eq!(output["data"]["device"]["devicetype"], 3);
        assert!(output["data"].get("regs").is_none());
    }

    #[test]
    fn test_build_fails_when_no_bid_is_valid() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_file(&dir, "bids.json", r#"[{ "params": {}, "bidId": "x" }]"#);

        let result = build(&Settings::default(), &path, BuildOptions::default());
        assert!(matches!(result, Err(CliError::Adapter(_))));
    }

    #[test]
    fn test_empty_bid_file_is_an_input_error() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_file(&dir, "bids.json", "[]");

        let result = validate(&Settings::default(), &path);
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn test_interpret_response_file() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_file(
            &dir,
            "response.json",
            r#"{
                "id": "bidd_id",
                "seatbid": [{ "seat": "4321", "bid": [
                    { "impid": "30b31c1838de1e", "price": 1, "adid": "91673066",
                      "adm": "<div/>", "w": 320, "h": 50 },
                    { "impid": "invalid-bid", "price": 9, "adid": "1" }
                ]}],
                "cur": "AUD"
            }"#,
        );

        let output = interpret(&Settings::default(), &bids_file(&dir), &path)
            .expect("should interpret response");

        assert_eq!(output.as_array().map(Vec::len), Some(1));
        assert_eq!(output[0]["requestId"], "30b31c1838de1e");
        assert_eq!(output[0]["currency"], "AUD");
        assert_eq!(output[0]["netRevenue"], true);
    }

    #[test]
    fn test_interpret_empty_response_file() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_file(&dir, "response.json", "");

        let output = interpret(&Settings::default(), &bids_file(&dir), &path)
            .expect("should interpret response");
        assert_eq!(output, json!([]));
    }

    #[test]
    fn test_syncs_always_one_image_pixel() {
        let output = syncs(
            &Settings::default(),
            SyncOptions {
                iframe_enabled: true,
                pixel_enabled: false,
            },
        )
        .expect("should list syncs");

        assert_eq!(output.as_array().map(Vec::len), Some(1));
        assert_eq!(output[0]["type"], "image");
    }

    #[test]
    fn test_disabled_adapter_is_reported() {
        let mut settings = Settings::default();
        settings.adapter.enabled = false;

        let result = syncs(&settings, SyncOptions::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
