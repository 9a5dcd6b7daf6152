use serde::{Deserialize, Serialize};

/// Outcome of the legacy single-shot pin route, which predates the `data` envelope and uses its
/// own casing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "strict", serde(deny_unknown_fields))]
pub struct PinResult {
    #[serde(rename = "IpfsHash")]
    pub cid: String,

    #[serde(rename = "PinSize")]
    pub size: u64,

    #[serde(rename = "Timestamp")]
    pub timestamp: String,

    #[serde(rename = "isDuplicate", default)]
    pub is_duplicate: bool,
}
