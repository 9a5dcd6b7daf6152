use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;
use tokio::io::AsyncRead;

use crate::api::client::{
    default_inference, ApiClient, ApiClientError, ApiError, ContentTypeInference, Credential,
    Endpoints, HttpTransport, ReqwestTransport, DEFAULT_API_URL, DEFAULT_UPLOADS_URL,
};
use crate::api::files::{self, FilePager, ListFilesQuery};
use crate::api::models::{FilePage, PinResult, PinnedFile};
use crate::api::pinning;

/// The main entry point for working with a pinning service.
///
/// Cloning is cheap and every clone shares the same credential and transport. Operations on the
/// same client can run concurrently, each one makes exactly one request attempt and never retries.
#[derive(Clone, Debug)]
pub struct PinningClient {
    api: ApiClient,
}

impl PinningClient {
    /// The underlying client, for use with the free functions in [`crate::api::files`].
    pub fn api_client(&self) -> &ApiClient {
        &self.api
    }

    pub fn builder(token: impl Into<String>) -> PinningClientBuilder {
        PinningClientBuilder {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            uploads_url: DEFAULT_UPLOADS_URL.to_string(),
            inference: None,
            transport: None,
        }
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<serde_json::Value, ApiError> {
        files::delete(&self.api, file_id).await
    }

    /// A lazy, restartable walk over every page of the listing.
    pub fn files(&self) -> FilePager {
        FilePager::new(self.api.clone(), ListFilesQuery::default())
    }

    pub fn files_matching(&self, filters: ListFilesQuery) -> FilePager {
        FilePager::new(self.api.clone(), filters)
    }

    /// Looks up a single file through its own resource path. A missing file is reported as
    /// [`ApiError::NotFound`].
    pub async fn get_file(&self, file_id: &str) -> Result<PinnedFile, ApiError> {
        files::get(&self.api, file_id).await
    }

    /// Fetches one page of the listing. `None` starts from the first page, otherwise pass the
    /// token returned by the previous page.
    pub async fn list_files(&self, page_token: Option<&str>) -> Result<FilePage, ApiError> {
        files::list(&self.api, &ListFilesQuery::default(), page_token).await
    }

    pub async fn list_files_matching(
        &self,
        filters: &ListFilesQuery,
        page_token: Option<&str>,
    ) -> Result<FilePage, ApiError> {
        files::list(&self.api, filters, page_token).await
    }

    /// Client for the hosted service using the default reqwest transport.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiClientError> {
        Self::builder(token).build()
    }

    /// Pins a local file through the legacy pinning route.
    ///
    /// Unlike every other operation this one never returns an error. Failures are logged and
    /// reported as `None`, callers that need to react to a failure should use
    /// [`PinningClient::upload_reader`] instead.
    pub async fn pin_file_legacy(&self, path: impl AsRef<Path>) -> Option<PinResult> {
        let path = path.as_ref();

        match pinning::pin_file(&self.api, path).await {
            Ok(result) => {
                tracing::info!(
                    path = %path.display(),
                    cid = %result.cid,
                    size = result.size,
                    duplicate = result.is_duplicate,
                    "pinned file"
                );

                Some(result)
            }
            Err(err) => {
                tracing::error!(path = %path.display(), %err, "failed to pin file");
                None
            }
        }
    }

    pub async fn rename_file(
        &self,
        file_id: &str,
        new_name: &str,
    ) -> Result<PinnedFile, ApiError> {
        files::rename(&self.api, file_id, new_name).await
    }

    /// Uploads a stream of bytes as a new file. An empty `group_id` is treated as no group.
    pub async fn upload_file<S>(
        &self,
        stream: S,
        name: &str,
        group_id: Option<&str>,
    ) -> Result<PinnedFile, ApiError>
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static,
    {
        files::upload(&self.api, stream, name, group_id).await
    }

    pub async fn upload_reader<R>(
        &self,
        reader: R,
        name: &str,
        group_id: Option<&str>,
    ) -> Result<PinnedFile, ApiError>
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        files::upload_reader(&self.api, reader, name, group_id).await
    }
}

pub struct PinningClientBuilder {
    token: String,
    api_url: String,
    uploads_url: String,
    inference: Option<ContentTypeInference>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl PinningClientBuilder {
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn build(self) -> Result<PinningClient, ApiClientError> {
        let credential = Credential::validate(self.token)?;
        let endpoints = Endpoints::new(&self.api_url, &self.uploads_url)?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        let inference = self.inference.unwrap_or_else(default_inference);

        tracing::debug!(
            api_url = %endpoints.api_url(),
            uploads_url = %endpoints.uploads_url(),
            "built pinning client"
        );

        Ok(PinningClient {
            api: ApiClient::new(credential, endpoints, inference, transport),
        })
    }

    /// Replaces the extension based guess used for the content type of uploaded files.
    pub fn content_type_inference<F>(mut self, inference: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.inference = Some(Arc::new(inference));
        self
    }

    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn uploads_url(mut self, url: impl Into<String>) -> Self {
        self.uploads_url = url.into();
        self
    }
}
