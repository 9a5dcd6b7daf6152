use crate::api::client::ApiRequest;
use crate::api::models::{DataEnvelope, PinnedFile};

pub(crate) struct GetRequest<'a> {
    file_id: &'a str,
}

impl<'a> GetRequest<'a> {
    pub(crate) fn new(file_id: &'a str) -> Self {
        Self { file_id }
    }
}

impl ApiRequest for GetRequest<'_> {
    type Response = DataEnvelope<PinnedFile>;

    fn path(&self) -> Vec<&str> {
        vec!["v3", "files", self.file_id]
    }
}
