//! Client for a remote pinning service. The endpoints default to the hosted Pinata API but accept
//! custom base URLs, so any service speaking the same protocol can be targeted.
//!
//! [`PinningClient`] is the entry point. The free functions under [`files`] and [`pinning`] offer
//! the same operations against a bare [`ApiClient`] for callers that want to compose their own
//! facade.

pub mod files;
pub mod models;
pub mod pinning;

pub(crate) mod client;

mod pinning_client;

pub use client::{
    default_content_type, ApiClient, ApiClientError, ApiError, ApiHost, BodyStream,
    ContentTypeInference, Credential, Endpoints, FormPart, HttpTransport, MultipartForm,
    PartValue, PreparedRequest, RawResponse, ReqwestTransport, RequestBody, TransportError,
    UploadStream, DEFAULT_API_URL, DEFAULT_UPLOADS_URL,
};
pub use files::{FilePager, ListFilesQuery};
pub use models::{FilePage, PinResult, PinnedFile};
pub use pinning_client::{PinningClient, PinningClientBuilder};
