use reqwest::Url;

use crate::api::client::{ApiClientError, ApiError};

pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud/";

pub const DEFAULT_UPLOADS_URL: &str = "https://uploads.pinata.cloud/";

/// The service splits uploads onto their own host, every other route lives on the API host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiHost {
    Api,
    Uploads,
}

#[derive(Clone, Debug)]
pub struct Endpoints {
    api_url: Url,
    uploads_url: Url,
}

impl Endpoints {
    pub fn new(api_url: &str, uploads_url: &str) -> Result<Self, ApiClientError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            uploads_url: parse_base_url(uploads_url)?,
        })
    }

    /// Routes for the hosted Pinata service.
    pub fn hosted() -> Result<Self, ApiClientError> {
        Self::new(DEFAULT_API_URL, DEFAULT_UPLOADS_URL)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn uploads_url(&self) -> &Url {
        &self.uploads_url
    }

    /// Appends the route's path segments to the matching base URL. Each segment is percent
    /// encoded, so identifiers can't escape their position in the path.
    pub(crate) fn route(&self, host: ApiHost, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = match host {
            ApiHost::Api => self.api_url.clone(),
            ApiHost::Uploads => self.uploads_url.clone(),
        };

        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{url} can't hold a path")));
        }

        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ApiError::InvalidUrl(format!(
                "'{segment}' can't be used as a path segment"
            )));
        }

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiClientError> {
    let url = Url::parse(raw)?;

    if url.cannot_be_a_base() {
        return Err(ApiClientError::UnsupportedUrl(raw.to_string()));
    }

    Ok(url)
}
