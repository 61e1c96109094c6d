//! Credential context passed through to the source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque profile/region identifiers for the remote source.
///
/// The engine never interprets these values. They travel unchanged with every
/// fetch request so the source can resolve credentials for them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CredentialContext {
    /// Named credential profile, `None` for the source's default.
    pub profile: Option<String>,

    /// Region identifier, `None` for the source's default.
    pub region: Option<String>,
}

impl CredentialContext {
    #[must_use]
    pub fn new(profile: Option<String>, region: Option<String>) -> Self {
        Self { profile, region }
    }
}

impl fmt::Display for CredentialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}",
            self.profile.as_deref().unwrap_or("default"),
            self.region.as_deref().unwrap_or("default")
        )
    }
}
