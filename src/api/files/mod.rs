//! Operations on pinned files through the v3 files routes.

mod delete_request;
mod file_pager;
mod get_request;
mod list_files_query;
mod list_request;
mod update_request;
mod upload_request;

pub use file_pager::FilePager;
pub use list_files_query::ListFilesQuery;

use delete_request::DeleteRequest;
use get_request::GetRequest;
use list_request::ListRequest;
use update_request::UpdateRequest;
use upload_request::UploadRequest;

use bytes::Bytes;
use futures::Stream;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::api::client::{ApiClient, ApiError, MultipartForm};
use crate::api::models::{FilePage, PinnedFile};

pub async fn delete(client: &ApiClient, file_id: &str) -> Result<serde_json::Value, ApiError> {
    require_file_id(file_id)?;

    let response = client
        .send_request(DeleteRequest::new(file_id))
        .await
        .map_err(|err| err.for_file_id(file_id))?;

    tracing::debug!(file_id, "deleted file");

    let confirmation = match response {
        serde_json::Value::Object(mut body) if body.contains_key("data") => {
            body.remove("data").unwrap_or_default()
        }
        other => other,
    };

    Ok(confirmation)
}

pub async fn get(client: &ApiClient, file_id: &str) -> Result<PinnedFile, ApiError> {
    require_file_id(file_id)?;

    let response = client
        .send_request(GetRequest::new(file_id))
        .await
        .map_err(|err| err.for_file_id(file_id))?;

    Ok(response.data)
}

/// Fetches a single page of the listing. Passing no token starts from the first page.
pub async fn list(
    client: &ApiClient,
    filters: &ListFilesQuery,
    page_token: Option<&str>,
) -> Result<FilePage, ApiError> {
    let page_token = page_token.filter(|token| !token.is_empty());
    let response = client
        .send_request(ListRequest::new(filters, page_token))
        .await?;

    tracing::trace!(
        count = response.data.files().len(),
        more = response.data.next_page_token().is_some(),
        "received file page"
    );

    Ok(response.data)
}

pub async fn rename(
    client: &ApiClient,
    file_id: &str,
    new_name: &str,
) -> Result<PinnedFile, ApiError> {
    require_file_id(file_id)?;
    require_non_empty(new_name, "new file name must not be empty")?;

    let response = client
        .send_request(UpdateRequest::new(file_id, new_name))
        .await
        .map_err(|err| err.for_file_id(file_id))?;

    Ok(response.data)
}

/// Uploads the contents of `stream` as a new file named `name`. The stream is handed to the
/// transport directly and is either read to its end or dropped when the request fails, it is
/// never buffered in full.
pub async fn upload<S>(
    client: &ApiClient,
    stream: S,
    name: &str,
    group_id: Option<&str>,
) -> Result<PinnedFile, ApiError>
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static,
{
    require_non_empty(name, "file name must not be empty")?;

    let form = MultipartForm::file_upload(
        Box::pin(stream),
        name,
        true,
        group_id,
        client.infer_content_type(),
    )?;

    let response = client.send_request(UploadRequest::new(form)).await?;
    let file = response.data;

    tracing::debug!(file_id = %file.id, cid = %file.cid, size = file.size, "uploaded file");

    Ok(file)
}

/// Same as [`upload`] for anything implementing [`AsyncRead`], such as an open
/// [`tokio::fs::File`].
pub async fn upload_reader<R>(
    client: &ApiClient,
    reader: R,
    name: &str,
    group_id: Option<&str>,
) -> Result<PinnedFile, ApiError>
where
    R: AsyncRead + Send + Sync + 'static,
{
    upload(client, ReaderStream::new(reader), name, group_id).await
}

/// Ids become a single path segment. `.` and `..` would be resolved away by URL path handling and
/// retarget the request at the collection itself.
fn require_file_id(file_id: &str) -> Result<(), ApiError> {
    require_non_empty(file_id, "file id must not be empty")?;

    if matches!(file_id, "." | "..") {
        return Err(ApiError::InvalidArgument(
            "file id can't be a relative path segment",
        ));
    }

    Ok(())
}

fn require_non_empty(value: &str, message: &'static str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::InvalidArgument(message));
    }

    Ok(())
}
