use std::fmt;

use serde::{Deserialize, Serialize};

use super::tier::Tier;

/// The authenticated caller, as reported by the auth backend.
///
/// Sessions are snapshots: they are replaced wholesale on refresh and
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, alias = "subscriptionTier")]
    pub tier: Tier,
    #[serde(default)]
    pub profile_id: String,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            tier: Tier::None,
            profile_id: String::new(),
        }
    }

    pub fn member(tier: Tier, profile_id: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            tier,
            profile_id: profile_id.into(),
        }
    }
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
