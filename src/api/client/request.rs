use std::fmt::{self, Debug, Formatter};
use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;

use crate::api::client::{ApiError, ContentTypeInference, Credential};

/// Caller supplied file contents. Handed to the transport as-is so large files are never held in
/// memory.
pub type UploadStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync>>;

/// A fully described request, ready to be handed to an [`HttpTransport`].
///
/// [`HttpTransport`]: crate::api::HttpTransport
pub struct PreparedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: RequestBody,
}

impl PreparedRequest {
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn into_parts(self) -> (Method, Url, HeaderMap, RequestBody) {
        (self.method, self.url, self.headers, self.body)
    }

    /// Sets the JSON payload of the request.
    pub(crate) fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        let encoded = serde_json::to_vec(payload)?;
        self.body = RequestBody::Json(Bytes::from(encoded));
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Replaces the payload with a multipart form. The transport is responsible for the
    /// `Content-Type` header as only it knows the boundary in use.
    pub(crate) fn multipart(mut self, form: MultipartForm) -> Self {
        self.headers.remove(CONTENT_TYPE);
        self.body = RequestBody::Multipart(form);
        self
    }

    /// A JSON request with no payload yet. All requests start out this way and carry the bearer
    /// credential.
    pub(crate) fn new(method: Method, url: Url, credential: &Credential) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, credential.header_value()?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            method,
            url,
            headers,
            body: RequestBody::Empty,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Debug for PreparedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

pub enum RequestBody {
    Empty,
    Json(Bytes),
    Multipart(MultipartForm),
}

impl Debug for RequestBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(bytes) => write!(f, "Json({} bytes)", bytes.len()),
            RequestBody::Multipart(form) => f.debug_tuple("Multipart").field(form).finish(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub(crate) fn stream(
        mut self,
        name: &str,
        file_name: &str,
        content_type: String,
        body: UploadStream,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: PartValue::Stream {
                file_name: file_name.to_string(),
                content_type,
                body,
            },
        });
        self
    }

    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: PartValue::Text(value.to_string()),
        });
        self
    }

    /// The shape expected by both upload routes: an optional `name` field and `group_id` field,
    /// followed by the streamed `file` part. An empty group is the same as no group at all.
    ///
    /// The inferred content type must be a valid MIME type, a bad value from a custom inference
    /// is rejected here rather than by whichever transport ends up encoding the form.
    pub(crate) fn file_upload(
        body: UploadStream,
        file_name: &str,
        name_field: bool,
        group_id: Option<&str>,
        inference: &ContentTypeInference,
    ) -> Result<Self, ApiError> {
        let content_type = inference(file_name);
        if content_type.parse::<mime::Mime>().is_err() {
            tracing::warn!(
                %content_type,
                file_name,
                "content type inference returned an invalid type"
            );
            return Err(ApiError::InvalidArgument(
                "inferred content type is not a valid MIME type",
            ));
        }

        let mut form = Self::default();

        if name_field {
            form = form.text("name", file_name);
        }

        if let Some(group_id) = group_id.filter(|id| !id.is_empty()) {
            form = form.text("group_id", group_id);
        }

        Ok(form.stream("file", file_name, content_type, body))
    }
}

#[derive(Debug)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

pub enum PartValue {
    Text(String),
    Stream {
        file_name: String,
        content_type: String,
        body: UploadStream,
    },
}

impl Debug for PartValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PartValue::Text(value) => f.debug_tuple("Text").field(value).finish(),
            PartValue::Stream {
                file_name,
                content_type,
                ..
            } => f
                .debug_struct("Stream")
                .field("file_name", file_name)
                .field("content_type", content_type)
                .finish_non_exhaustive(),
        }
    }
}
