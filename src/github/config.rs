//! Configuration for fetching and cloning repositories

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits for the GitHub and npm collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Results per page (max 100)
    pub per_page: u8,
    /// Pages fetched per listing before stopping
    pub max_pages: u32,
    /// Issues and commits older than this are not fetched
    pub lookback_months: u32,
    /// Timeout for cloning a repository
    #[serde(with = "duration_secs")]
    pub clone_timeout: Duration,
    /// npm registry used to resolve package names
    pub registry_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_pages: 5,
            lookback_months: 12,
            clone_timeout: Duration::from_secs(120),
            registry_url: "https://registry.npmjs.org".to_string(),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
