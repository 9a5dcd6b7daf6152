use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

use crate::api::client::utils::consume_stream_into_bytes;
use crate::api::client::{
    ApiClient, Credential, Endpoints, HttpTransport, PartValue, PreparedRequest, RawResponse,
    RequestBody, TransportError,
};

pub(crate) const TEST_TOKEN: &str = "test-token";

pub(crate) enum Reply {
    Respond(StatusCode, Bytes),
    Fail(std::io::ErrorKind),
}

#[derive(Debug)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RecordedBody,
}

#[derive(Debug, PartialEq)]
pub(crate) enum RecordedBody {
    Empty,
    Json(Bytes),
    Multipart(Vec<RecordedPart>),
}

#[derive(Debug, PartialEq)]
pub(crate) struct RecordedPart {
    pub(crate) name: String,
    pub(crate) file_name: Option<String>,
    pub(crate) content_type: Option<String>,
    pub(crate) data: Bytes,
}

impl RecordedRequest {
    pub(crate) fn json_body(&self) -> &[u8] {
        match &self.body {
            RecordedBody::Json(bytes) => bytes,
            other => panic!("expected a JSON body, found {other:?}"),
        }
    }

    pub(crate) fn parts(&self) -> &[RecordedPart] {
        match &self.body {
            RecordedBody::Multipart(parts) => parts,
            other => panic!("expected a multipart body, found {other:?}"),
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }
}

/// Replies with canned responses in order and records every request it sees. Multipart streams
/// are drained the way a real transport would drain them.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub(crate) fn client(self: &Arc<Self>) -> ApiClient {
        let endpoints = Endpoints::new("https://api.test/", "https://uploads.test/").unwrap();
        let credential = Credential::validate(TEST_TOKEN).unwrap();
        let inference = Arc::new(crate::api::client::default_content_type);

        ApiClient::new(credential, endpoints, inference, self.clone())
    }

    pub(crate) fn fail_with(self: &Arc<Self>, kind: std::io::ErrorKind) -> Arc<Self> {
        self.replies.lock().unwrap().push_back(Reply::Fail(kind));
        self.clone()
    }

    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(self: &Arc<Self>, status: u16, body: impl Into<Bytes>) -> Arc<Self> {
        let status = StatusCode::from_u16(status).unwrap();
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Respond(status, body.into()));
        self.clone()
    }

    pub(crate) fn reply_json(self: &Arc<Self>, status: u16, body: serde_json::Value) -> Arc<Self> {
        self.reply(status, body.to_string())
    }

    pub(crate) fn requests(&self) -> std::sync::MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        let (method, url, headers, body) = request.into_parts();

        let body = match body {
            RequestBody::Empty => RecordedBody::Empty,
            RequestBody::Json(bytes) => RecordedBody::Json(bytes),
            RequestBody::Multipart(form) => {
                let mut parts = Vec::new();

                for part in form.into_parts() {
                    let recorded = match part.value {
                        PartValue::Text(value) => RecordedPart {
                            name: part.name,
                            file_name: None,
                            content_type: None,
                            data: Bytes::from(value),
                        },
                        PartValue::Stream {
                            file_name,
                            content_type,
                            body,
                        } => RecordedPart {
                            name: part.name,
                            file_name: Some(file_name),
                            content_type: Some(content_type),
                            data: consume_stream_into_bytes(body).await?,
                        },
                    };

                    parts.push(recorded);
                }

                RecordedBody::Multipart(parts)
            }
        };

        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url,
            headers,
            body,
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock transport ran out of replies");

        match reply {
            Reply::Respond(status, body) => Ok(RawResponse::from_bytes(status, body)),
            Reply::Fail(kind) => Err(TransportError::Io(std::io::Error::new(kind, "mock failure"))),
        }
    }
}
