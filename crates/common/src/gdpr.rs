//! GDPR consent passthrough.
//!
//! The consent string is forwarded untouched; it is never decoded here.

use serde::{Deserialize, Serialize};

use crate::openrtb::{Regs, RegsExt, User, UserExt};

/// Consent data the host's consent management module attaches to a bidder request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GdprConsent {
    #[serde(default)]
    pub consent_string: Option<String>,
    /// `None` when the CMP did not say whether GDPR applies.
    #[serde(default)]
    pub gdpr_applies: Option<bool>,
}

impl GdprConsent {
    /// `regs.ext.gdpr` flag. An unknown applicability is sent as 0.
    #[must_use]
    pub fn gdpr_flag(&self) -> u8 {
        u8::from(self.gdpr_applies.unwrap_or(false))
    }
}

/// Build the `user` and `regs` objects for the outgoing payload.
///
/// Both are omitted when the host supplied no consent object. `regs` is always
/// present otherwise; `user` only when there is a consent string to carry.
#[must_use]
pub fn consent_signals(consent: Option<&GdprConsent>) -> (Option<User>, Option<Regs>) {
    let Some(consent) = consent else {
        return (None, None);
    };

    let user = consent.consent_string.as_ref().map(|consent_string| User {
        ext: UserExt {
            consent: Some(consent_string.clone()),
        },
    });

    let regs = Regs {
        ext: RegsExt {
            gdpr: consent.gdpr_flag(),
        },
    };

    (user, Some(regs))
}
