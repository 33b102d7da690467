//! Device classification from the user agent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::openrtb::Device;

static MOBILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(ios|ipod|ipad|iphone|android)").expect("mobile user agent regex should compile")
});

static CONNECTED_TV_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(smart[-]?tv|hbbtv|appletv|googletv|hdmi|netcast\.tv|viera|nettv|roku|\bdtv\b|sonydtv|inettvbrowser|\btv\b)",
    )
    .expect("connected TV user agent regex should compile")
});

/// `OpenRTB` device type, serialized as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    PersonalComputer,
    ConnectedTv,
}

impl DeviceType {
    /// Classify a user agent. Mobile wins over connected TV.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if MOBILE_PATTERN.is_match(user_agent) {
            Self::Mobile
        } else if CONNECTED_TV_PATTERN.is_match(user_agent) {
            Self::ConnectedTv
        } else {
            Self::PersonalComputer
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Mobile => 1,
            Self::PersonalComputer => 2,
            Self::ConnectedTv => 3,
        }
    }
}

impl Serialize for DeviceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            1 => Ok(Self::Mobile),
            2 => Ok(Self::PersonalComputer),
            3 => Ok(Self::ConnectedTv),
            other => Err(serde::de::Error::custom(format!(
                "unsupported device type {other}"
            ))),
        }
    }
}

/// Device details the host collects from the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub user_agent: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl DeviceInfo {
    /// Build the wire `device` object.
    #[must_use]
    pub fn to_openrtb(&self) -> Device {
        Device {
            ua: Some(self.user_agent.clone()),
            language: self.language.clone(),
            devicetype: DeviceType::from_user_agent(&self.user_agent),
        }
    }
}
