use reqwest::Method;
use serde::Serialize;

use crate::api::client::{ApiError, ApiRequest, PreparedRequest};
use crate::api::models::{DataEnvelope, PinnedFile};

#[derive(Serialize)]
pub(crate) struct UpdateRequest<'a> {
    #[serde(skip)]
    file_id: &'a str,

    name: &'a str,
}

impl<'a> UpdateRequest<'a> {
    pub(crate) fn new(file_id: &'a str, name: &'a str) -> Self {
        Self { file_id, name }
    }
}

impl ApiRequest for UpdateRequest<'_> {
    type Response = DataEnvelope<PinnedFile>;

    const METHOD: Method = Method::PUT;

    fn add_payload(&mut self, request: PreparedRequest) -> Result<PreparedRequest, ApiError> {
        request.json(&*self)
    }

    fn path(&self) -> Vec<&str> {
        vec!["v3", "files", self.file_id]
    }
}
