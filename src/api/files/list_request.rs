use crate::api::client::ApiRequest;
use crate::api::files::ListFilesQuery;
use crate::api::models::{DataEnvelope, FilePage};

pub(crate) struct ListRequest<'a> {
    filters: &'a ListFilesQuery,
    page_token: Option<&'a str>,
}

impl<'a> ListRequest<'a> {
    pub(crate) fn new(filters: &'a ListFilesQuery, page_token: Option<&'a str>) -> Self {
        Self {
            filters,
            page_token,
        }
    }
}

impl ApiRequest for ListRequest<'_> {
    type Response = DataEnvelope<FilePage>;

    fn path(&self) -> Vec<&str> {
        vec!["v3", "files"]
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.filters.query_pairs();

        if let Some(token) = self.page_token {
            query.push(("pageToken", token.to_string()));
        }

        query
    }
}
