//! The legacy single-shot pinning route. Superseded by [`crate::api::files::upload`] but still
//! served.

mod pin_file_request;

use pin_file_request::PinFileRequest;

use std::path::Path;

use tokio_util::io::ReaderStream;

use crate::api::client::{ApiClient, ApiError, MultipartForm};
use crate::api::models::PinResult;

/// Pins a local file, named after the last component of its path.
pub async fn pin_file(client: &ApiClient, path: &Path) -> Result<PinResult, ApiError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::InvalidArgument("path must end in a UTF-8 file name"))?
        .to_string();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(ApiError::LocalFile)?;
    if !metadata.is_file() {
        return Err(ApiError::InvalidArgument("path must point at a regular file"));
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(ApiError::LocalFile)?;

    let form = MultipartForm::file_upload(
        Box::pin(ReaderStream::new(file)),
        &file_name,
        false,
        None,
        client.infer_content_type(),
    )?;

    client.send_request(PinFileRequest::new(form)).await
}
