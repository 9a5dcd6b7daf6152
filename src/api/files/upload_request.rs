use reqwest::Method;

use crate::api::client::{ApiError, ApiHost, ApiRequest, MultipartForm, PreparedRequest};
use crate::api::models::{DataEnvelope, PinnedFile};

pub(crate) struct UploadRequest {
    form: Option<MultipartForm>,
}

impl UploadRequest {
    pub(crate) fn new(form: MultipartForm) -> Self {
        Self { form: Some(form) }
    }
}

impl ApiRequest for UploadRequest {
    type Response = DataEnvelope<PinnedFile>;

    const HOST: ApiHost = ApiHost::Uploads;

    const METHOD: Method = Method::POST;

    fn add_payload(&mut self, request: PreparedRequest) -> Result<PreparedRequest, ApiError> {
        let form = self.form.take().ok_or(ApiError::RequestReused)?;
        Ok(request.multipart(form))
    }

    fn path(&self) -> Vec<&str> {
        vec!["v3", "files"]
    }
}
