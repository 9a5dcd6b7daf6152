use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::client::utils::{
    consume_stream_into_bytes, consume_stream_prefix, truncate_for_display,
};
use crate::api::client::{ApiError, RawResponse, TransportError};

const MAX_REPORTED_BODY_CHARS: usize = 512;

/// Error bodies past this size are left unread, proxies can answer with whole HTML pages.
const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Turns a raw response into the expected shape. Success statuses must carry a JSON body matching
/// `T`, every other status becomes an [`ApiError::Status`] no matter what the body holds.
pub(crate) async fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        // The body is only a hint on error paths, failing to read it must not mask the status
        let body = consume_stream_prefix(response.into_body(), MAX_ERROR_BODY_BYTES).await;
        let reason = error_reason(status, body.as_deref().unwrap_or_default());
        tracing::warn!(status = status.as_u16(), %reason, "API responded with an error status");

        return Err(ApiError::Status {
            status_code: status.as_u16(),
            reason,
        });
    }

    let body = consume_stream_into_bytes(response.into_body())
        .await
        .map_err(TransportError::Io)?;
    tracing::trace!(status = status.as_u16(), len = body.len(), "decoding API response");

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::empty_body());
    }

    serde_json::from_slice(&body).map_err(|err| ApiError::Decode {
        body: truncate_for_display(&String::from_utf8_lossy(&body), MAX_REPORTED_BODY_CHARS),
        cause: Some(err),
    })
}

/// Best effort description of a failed request. Structured error bodies are preferred, then any
/// plain text the service sent, then the canonical reason phrase of the status.
fn error_reason(status: StatusCode, body: &[u8]) -> String {
    if let Ok(raw_error) = serde_json::from_slice::<RawApiError>(body) {
        if let Some(message) = raw_error.message() {
            return message;
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return truncate_for_display(text, MAX_REPORTED_BODY_CHARS);
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawApiError {
    Nested { error: RawErrorDetails },
    Flat { error: String },
    Message { message: String },
    Msg { msg: String },
}

#[derive(Debug, Deserialize)]
struct RawErrorDetails {
    reason: Option<String>,
    details: Option<String>,
}

impl RawApiError {
    fn message(self) -> Option<String> {
        let message = match self {
            RawApiError::Nested { error } => match (error.reason, error.details) {
                (Some(reason), Some(details)) => format!("{reason}: {details}"),
                (Some(only), None) | (None, Some(only)) => only,
                (None, None) => return None,
            },
            RawApiError::Flat { error } => error,
            RawApiError::Message { message } => message,
            RawApiError::Msg { msg } => msg,
        };

        Some(message).filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::api::models::{DataEnvelope, PinnedFile};

    fn response(status: u16, body: &'static str) -> RawResponse {
        RawResponse::from_bytes(StatusCode::from_u16(status).unwrap(), body)
    }

    fn pinned_file_json() -> serde_json::Value {
        json!({
            "id": "0191b5a4-0ad5-7b1e-a4f3-bc2c4b1a9d0e",
            "name": "a.txt",
            "cid": "bafkreigh2akiscaildcqabsyg3dfr6chu3fgpregiymsck7e7aqa4s52zy",
            "created_at": "2024-09-01T12:00:00.000Z",
            "size": 10,
            "number_of_files": 1,
            "mime_type": "text/plain",
            "user_id": "user-1",
            "group_id": null,
            "is_duplicate": false,
            "keyvalues": { "env": "prod", "version": 3 }
        })
    }

    #[tokio::test]
    async fn test_success_decodes_expected_shape() {
        let body = json!({ "data": pinned_file_json() }).to_string();
        let raw = RawResponse::from_bytes(StatusCode::OK, body);

        let decoded: DataEnvelope<PinnedFile> = decode(raw).await.unwrap();
        let expected: PinnedFile = serde_json::from_value(pinned_file_json()).unwrap();

        assert_eq!(decoded.data, expected);
        assert_eq!(decoded.data.size, 10);
        assert_eq!(decoded.data.keyvalues.unwrap()["version"], json!(3));
    }

    #[tokio::test]
    async fn test_all_success_statuses_decode() {
        for status in [200, 201, 202, 299] {
            let raw = RawResponse::from_bytes(StatusCode::from_u16(status).unwrap(), "{}");
            let decoded: serde_json::Value = decode(raw).await.unwrap();
            assert_eq!(decoded, json!({}));
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_text_body() {
        let err = decode::<serde_json::Value>(response(500, "Server Error"))
            .await
            .unwrap_err();

        match err {
            ApiError::Status {
                status_code,
                reason,
            } => {
                assert_eq!(status_code, 500);
                assert_eq!(reason, "Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_keeps_code_for_any_body() {
        let bodies = [
            "",
            "<html>bad gateway</html>",
            "{\"not\": \"an error shape\"}",
            "{ truncated json",
        ];

        for status in [199, 300, 301, 400, 401, 403, 404, 429, 502, 503] {
            for body in bodies {
                let err = decode::<serde_json::Value>(response(status, body))
                    .await
                    .unwrap_err();
                assert_eq!(err.status_code(), Some(status), "status {status} body {body:?}");
            }
        }
    }

    #[tokio::test]
    async fn test_error_status_prefers_structured_reason() {
        let body = r#"{"error":{"reason":"INVALID_CREDENTIALS","details":"token expired"}}"#;
        let err = decode::<serde_json::Value>(response(401, body))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Status { status_code: 401, ref reason } if reason == "INVALID_CREDENTIALS: token expired"
        ));

        let err = decode::<serde_json::Value>(response(403, r#"{"error":"forbidden"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { ref reason, .. } if reason == "forbidden"));

        let err = decode::<serde_json::Value>(response(400, r#"{"msg":"bad request"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { ref reason, .. } if reason == "bad request"));
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_reason_phrase() {
        let err = decode::<serde_json::Value>(response(404, "  \n"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status { status_code: 404, ref reason } if reason == "Not Found"
        ));
    }

    #[tokio::test]
    async fn test_error_status_reads_only_a_bounded_body() {
        // Never ends, reading it in full would never return
        let stream = futures::stream::repeat_with(|| {
            Ok::<_, std::io::Error>(Bytes::from_static(b"<html>proxy error page</html>"))
        });
        let raw = RawResponse::new(StatusCode::BAD_GATEWAY, Box::pin(stream));

        let err = decode::<serde_json::Value>(raw).await.unwrap_err();
        match err {
            ApiError::Status {
                status_code,
                reason,
            } => {
                assert_eq!(status_code, 502);
                assert!(reason.starts_with("<html>proxy error page</html>"));
                assert_eq!(reason.chars().count(), MAX_REPORTED_BODY_CHARS + 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_survives_broken_body_stream() {
        let stream = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ]);
        let raw = RawResponse::new(StatusCode::BAD_GATEWAY, Box::pin(stream));

        let err = decode::<serde_json::Value>(raw).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Status { status_code: 502, ref reason } if reason == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn test_empty_success_body() {
        let err = decode::<serde_json::Value>(response(200, ""))
            .await
            .unwrap_err();

        match err {
            ApiError::Decode { body, cause } => {
                assert_eq!(body, "empty body");
                assert!(cause.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let err = decode::<DataEnvelope<PinnedFile>>(response(200, "not json at all"))
            .await
            .unwrap_err();

        match err {
            ApiError::Decode { body, cause } => {
                assert_eq!(body, "not json at all");
                assert!(cause.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_shape_is_a_decode_error() {
        let err = decode::<DataEnvelope<PinnedFile>>(response(200, r#"{"data":{"id":5}}"#))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode { cause: Some(_), .. }));
    }

    #[tokio::test]
    async fn test_broken_success_stream_is_transport_error() {
        let stream = futures::stream::iter(vec![Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "eof",
        ))]);
        let raw = RawResponse::new(StatusCode::OK, Box::pin(stream));

        let err = decode::<serde_json::Value>(raw).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::Io(_))));
    }
}
