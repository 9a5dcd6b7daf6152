use std::fmt::{self, Debug, Formatter};
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode};

use crate::api::client::{
    ApiClientError, MultipartForm, PartValue, PreparedRequest, RequestBody, TransportError,
};

/// Response body as handed back by a transport, read lazily by the response decoder.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// The capability used to actually move requests over the network. Implementations perform each
/// request exactly once, any retry, timeout or cancellation policy belongs to the transport
/// itself.
///
/// Any HTTP status, including error statuses, is a successful send. Only failures to complete the
/// exchange at all are reported as a [`TransportError`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError>;
}

pub struct RawResponse {
    status: StatusCode,
    body: BodyStream,
}

impl RawResponse {
    /// Convenience for transports that already hold the complete body.
    pub fn from_bytes(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(body) });

        Self::new(status, Box::pin(stream))
    }

    pub fn into_body(self) -> BodyStream {
        self.body
    }

    pub fn new(status: StatusCode, body: BodyStream) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Debug for RawResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// The default transport backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wraps an existing client, keeping whatever timeouts, proxies or TLS settings it was built
    /// with.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn new() -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .user_agent(crate::version::user_agent())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        let (method, url, headers, body) = request.into_parts();
        let mut builder = self.client.request(method, url).headers(headers);

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart(form) => builder.multipart(reqwest_form(form)?),
        };

        let response = builder.send().await?;
        let status = response.status();

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));

        Ok(RawResponse::new(status, Box::pin(body)))
    }
}

fn reqwest_form(form: MultipartForm) -> Result<Form, TransportError> {
    let mut reqwest_form = Form::new();

    for part in form.into_parts() {
        reqwest_form = match part.value {
            PartValue::Text(value) => reqwest_form.text(part.name, value),
            PartValue::Stream {
                file_name,
                content_type,
                body,
            } => {
                let stream_part = Part::stream(Body::wrap_stream(body))
                    .file_name(file_name)
                    .mime_str(&content_type)?;

                reqwest_form.part(part.name, stream_part)
            }
        };
    }

    Ok(reqwest_form)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::api::client::utils::consume_stream_into_bytes;

    #[tokio::test]
    async fn test_raw_response_from_bytes() {
        let response = RawResponse::from_bytes(StatusCode::CREATED, "hello");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = consume_stream_into_bytes(response.into_body()).await.unwrap();
        assert_eq!(body.as_ref(), b"hello");
    }

    #[test]
    fn test_stream_parts_become_reqwest_parts() {
        let body: crate::api::client::UploadStream =
            Box::pin(futures::stream::iter(vec![Ok(Bytes::from_static(b"abc"))]));
        let form = MultipartForm::default()
            .text("name", "a.txt")
            .stream("file", "a.txt", "text/plain".to_string(), body);

        let reqwest_form = reqwest_form(form).unwrap();
        assert!(!reqwest_form.boundary().is_empty());
    }

    #[test]
    fn test_invalid_content_type_is_a_transport_error() {
        let body: crate::api::client::UploadStream =
            Box::pin(futures::stream::iter(vec![Ok(Bytes::from_static(b"abc"))]));
        let form =
            MultipartForm::default().stream("file", "a.txt", "not a mime type".to_string(), body);

        assert!(matches!(reqwest_form(form), Err(TransportError::Http(_))));
    }
}
