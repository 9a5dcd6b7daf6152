use reqwest::Method;

use crate::api::client::{ApiError, ApiRequest, MultipartForm, PreparedRequest};
use crate::api::models::PinResult;

pub(crate) struct PinFileRequest {
    form: Option<MultipartForm>,
}

impl PinFileRequest {
    pub(crate) fn new(form: MultipartForm) -> Self {
        Self { form: Some(form) }
    }
}

impl ApiRequest for PinFileRequest {
    type Response = PinResult;

    const METHOD: Method = Method::POST;

    fn add_payload(&mut self, request: PreparedRequest) -> Result<PreparedRequest, ApiError> {
        let form = self.form.take().ok_or(ApiError::RequestReused)?;
        Ok(request.multipart(form))
    }

    fn path(&self) -> Vec<&str> {
        vec!["pinning", "pinFileToIPFS"]
    }
}
