use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type PinnedFileId = String;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "strict", serde(deny_unknown_fields))]
pub struct PinnedFile {
    pub id: PinnedFileId,
    #[serde(default)]
    pub name: String,
    pub cid: String,
    pub created_at: String,
    pub size: u64,

    /// Greater than one for directory pins.
    #[serde(default)]
    pub number_of_files: u64,

    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,

    // Only reported by the upload route
    #[serde(default)]
    pub is_duplicate: bool,

    #[serde(default)]
    pub keyvalues: Option<HashMap<String, serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_minimal_listing_entry() {
        let parsed: PinnedFile = serde_json::from_value(json!({
            "id": "f1",
            "name": "a.txt",
            "cid": "bafy1",
            "created_at": "2024-09-01T12:00:00Z",
            "size": 10
        }))
        .unwrap();

        assert_eq!(parsed.number_of_files, 0);
        assert_eq!(parsed.group_id, None);
        assert!(!parsed.is_duplicate);
        assert!(parsed.keyvalues.is_none());
    }

    #[test]
    fn test_field_for_field_round_trip() {
        let source = json!({
            "id": "f1",
            "name": "photos",
            "cid": "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
            "created_at": "2024-09-01T12:00:00Z",
            "size": 4_294_967_296u64,
            "number_of_files": 12,
            "mime_type": "application/x-directory",
            "user_id": "u1",
            "group_id": "g1",
            "is_duplicate": true,
            "keyvalues": { "nested": { "a": [1, 2] }, "flag": true }
        });

        let parsed: PinnedFile = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), source);
    }
}
