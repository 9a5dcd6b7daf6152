use serde::{Deserialize, Serialize};

use crate::api::models::PinnedFile;

/// One page of a file listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "strict", serde(deny_unknown_fields))]
pub struct FilePage {
    #[serde(default)]
    files: Vec<PinnedFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_page_token: Option<String>,
}

impl FilePage {
    pub fn files(&self) -> &[PinnedFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<PinnedFile> {
        self.files
    }

    pub fn new(files: Vec<PinnedFile>, next_page_token: Option<String>) -> Self {
        Self {
            files,
            next_page_token,
        }
    }

    /// Token for the following page. The service sends an empty token on the last page, that is
    /// treated the same as no token.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}
