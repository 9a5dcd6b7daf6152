/// Server side filters applied to every page of a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilesQuery {
    pub cid: Option<String>,
    pub group: Option<String>,
    pub limit: Option<u32>,
    pub mime_type: Option<String>,
    pub name: Option<String>,
}

impl ListFilesQuery {
    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let text_filters = [
            ("name", &self.name),
            ("group", &self.group),
            ("cid", &self.cid),
            ("mimeType", &self.mime_type),
        ];

        for (key, value) in text_filters {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                pairs.push((key, value.clone()));
            }
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}
