use futures::Stream;

use crate::api::client::{ApiClient, ApiError};
use crate::api::files::ListFilesQuery;
use crate::api::models::{FilePage, PinnedFile};

#[derive(Clone, Debug, PartialEq, Eq)]
enum PagerState {
    Start,
    Next(String),
    Finished,
}

/// Walks a listing page by page, always requesting the next page with exactly the token the
/// previous page returned. Nothing is fetched until a page is asked for, and the only state
/// carried between requests is that token.
///
/// Pages are handed over as the service returns them, no deduplication or reordering across pages
/// takes place.
#[derive(Clone, Debug)]
pub struct FilePager {
    client: ApiClient,
    filters: ListFilesQuery,
    state: PagerState,
}

impl FilePager {
    /// Fetches every remaining page, flattening the files into a single list.
    pub async fn collect_all(mut self) -> Result<Vec<PinnedFile>, ApiError> {
        let mut files = Vec::new();

        while let Some(page) = self.next_page().await? {
            files.extend(page.into_files());
        }

        Ok(files)
    }

    pub fn is_finished(&self) -> bool {
        self.state == PagerState::Finished
    }

    /// Starts a listing at the first page. Use [`FilePager::resume`] to pick up from a token.
    pub fn new(client: ApiClient, filters: ListFilesQuery) -> Self {
        Self {
            client,
            filters,
            state: PagerState::Start,
        }
    }

    /// Fetches the next page, or `None` once a page without a continuation token has been seen.
    ///
    /// A failed request leaves the pager untouched, calling this again retries the same page.
    pub async fn next_page(&mut self) -> Result<Option<FilePage>, ApiError> {
        let page_token = match &self.state {
            PagerState::Start => None,
            PagerState::Next(token) => Some(token.as_str()),
            PagerState::Finished => return Ok(None),
        };

        let page = super::list(&self.client, &self.filters, page_token).await?;

        self.state = match page.next_page_token() {
            Some(token) => PagerState::Next(token.to_string()),
            None => PagerState::Finished,
        };

        Ok(Some(page))
    }

    /// The token the next request will carry, useful for persisting a position in the listing.
    pub fn page_token(&self) -> Option<&str> {
        match &self.state {
            PagerState::Next(token) => Some(token),
            _ => None,
        }
    }

    /// Goes back to the first page. The next request is identical to the very first one made.
    pub fn reset(&mut self) {
        self.state = PagerState::Start;
    }

    /// Continues a listing from a token returned by an earlier page.
    pub fn resume(client: ApiClient, filters: ListFilesQuery, page_token: String) -> Self {
        let state = if page_token.is_empty() {
            PagerState::Start
        } else {
            PagerState::Next(page_token)
        };

        Self {
            client,
            filters,
            state,
        }
    }

    /// The remaining pages as a stream. The stream ends after the last page or the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<FilePage, ApiError>> {
        futures::stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok(page.map(|page| (page, pager)))
        })
    }
}
