use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::device::DeviceType;

/// Subset of an `OpenRTB` 2.x bid request sent to Playground XYZ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenRtbRequest {
    /// Auction id of the first bid request in the batch.
    pub id: String,
    pub imp: Vec<Imp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regs: Option<Regs>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Imp {
    pub id: String,
    pub banner: Banner,
    pub ext: ImpExt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(default)]
    pub format: Vec<Format>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Format {
    pub w: u32,
    pub h: u32,
}

/// Impression extension keyed by sub-bidder namespace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpExt {
    pub appnexus: AppnexusImpExt,
    pub pxyz: PxyzImpExt,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppnexusImpExt {
    /// Serialized as `null` on the legacy publisher-id path.
    pub placement_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PxyzImpExt {
    pub adapter: AdapterInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdapterInfo {
    pub vendor: String,
    pub prebid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    pub domain: String,
    pub name: String,
    pub page: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub devicetype: DeviceType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub ext: UserExt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserExt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Regs {
    pub ext: RegsExt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegsExt {
    /// 1 when GDPR applies, 0 otherwise.
    pub gdpr: u8,
}

/// One bid from the `seatbid[].bid[]` arrays of a Playground XYZ response.
///
/// Every field is optional so that partial bids still deserialize. Bids are
/// decoded one at a time, so a malformed entry does not affect its neighbours.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Bid {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub impid: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub adid: Option<String>,
    #[serde(default)]
    pub adm: Option<String>,
    #[serde(default)]
    pub adomain: Option<Vec<String>>,
    #[serde(default)]
    pub iurl: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub cid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub crid: Option<String>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
    #[serde(default)]
    pub ext: Option<Value>,
}

/// Accepts an identifier sent either as a JSON string or as a number.
fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct LenientIdVisitor;

    impl<'de> Visitor<'de> for LenientIdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number identifier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientIdVisitor)
}
