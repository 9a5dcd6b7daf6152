use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::api::client::{ApiError, ApiHost, PreparedRequest};

pub(crate) trait ApiRequest {
    type Response: DeserializeOwned;

    const HOST: ApiHost = ApiHost::Api;

    const METHOD: Method = Method::GET;

    fn add_payload(&mut self, request: PreparedRequest) -> Result<PreparedRequest, ApiError> {
        Ok(request)
    }

    /// Path segments below the host's base URL. They are escaped individually.
    fn path(&self) -> Vec<&str>;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
