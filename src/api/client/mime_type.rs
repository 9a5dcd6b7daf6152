use std::sync::Arc;

/// Maps a file name onto the content type declared for its multipart part.
pub type ContentTypeInference = Arc<dyn Fn(&str) -> String + Send + Sync>;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Guesses from the file extension, falling back to `application/octet-stream` for anything
/// unrecognized.
#[cfg(feature = "mime-type")]
pub fn default_content_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

#[cfg(not(feature = "mime-type"))]
pub fn default_content_type(_name: &str) -> String {
    FALLBACK_CONTENT_TYPE.to_string()
}

pub(crate) fn default_inference() -> ContentTypeInference {
    Arc::new(default_content_type)
}
