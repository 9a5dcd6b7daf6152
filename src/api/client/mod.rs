mod credential;
mod endpoints;
mod error;
mod mime_type;
mod request;
mod response;
mod traits;
mod transport;

pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use credential::Credential;
pub use endpoints::{ApiHost, Endpoints, DEFAULT_API_URL, DEFAULT_UPLOADS_URL};
pub use error::{ApiClientError, ApiError, TransportError};
pub use mime_type::{default_content_type, ContentTypeInference};
pub use request::{FormPart, MultipartForm, PartValue, PreparedRequest, RequestBody, UploadStream};
pub use transport::{BodyStream, HttpTransport, RawResponse, ReqwestTransport};

pub(crate) use mime_type::default_inference;
pub(crate) use traits::ApiRequest;

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Everything needed to talk to the service: the credential, where the routes live, and the
/// transport carrying requests. Nothing in here changes after construction so clones can be
/// used concurrently without coordination.
#[derive(Clone)]
pub struct ApiClient {
    credential: Arc<Credential>,
    endpoints: Endpoints,
    inference: ContentTypeInference,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn infer_content_type(&self) -> &ContentTypeInference {
        &self.inference
    }

    pub fn new(
        credential: Credential,
        endpoints: Endpoints,
        inference: ContentTypeInference,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            credential: Arc::new(credential),
            endpoints,
            inference,
            transport,
        }
    }

    /// Builds, sends and decodes a single request. Exactly one attempt is made.
    pub(crate) async fn send_request<R: ApiRequest>(
        &self,
        mut request: R,
    ) -> Result<R::Response, ApiError> {
        let mut url = self.endpoints.route(R::HOST, &request.path())?;

        let query = request.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let prepared = PreparedRequest::new(R::METHOD, url, &self.credential)?;
        let prepared = request.add_payload(prepared)?;

        tracing::debug!(method = %prepared.method(), url = %prepared.url(), "sending API request");

        let response = self.transport.send(prepared).await.map_err(|err| {
            tracing::debug!(%err, "API request failed in transport");
            ApiError::Transport(err)
        })?;

        response::decode(response).await
    }
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("credential", &self.credential)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
