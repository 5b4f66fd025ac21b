use serde::{Deserialize, Serialize};

/// The slice of a Nexus mod record the relay reports on
///
/// Only `mod_id` is required on the wire. Everything else degrades to a
/// placeholder when the notification is rendered, and a missing
/// `updated_timestamp` is treated as "no update".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModInfo {
    pub mod_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub updated_timestamp: Option<i64>,
    #[serde(default)]
    pub mod_downloads: Option<u64>,
    #[serde(default)]
    pub mod_unique_downloads: Option<u64>,
    #[serde(default)]
    pub picture_url: Option<String>,
}
