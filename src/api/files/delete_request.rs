use reqwest::Method;

use crate::api::client::ApiRequest;

pub(crate) struct DeleteRequest<'a> {
    file_id: &'a str,
}

impl<'a> DeleteRequest<'a> {
    pub(crate) fn new(file_id: &'a str) -> Self {
        Self { file_id }
    }
}

impl ApiRequest for DeleteRequest<'_> {
    // No committed shape, usually `{"data": null}`
    type Response = serde_json::Value;

    const METHOD: Method = Method::DELETE;

    fn path(&self) -> Vec<&str> {
        vec!["v3", "files", self.file_id]
    }
}
