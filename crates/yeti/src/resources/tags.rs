//! Tag operations.

use serde_json::Value;
use tracing::instrument;

use crate::client::YetiClient;
use crate::endpoints::{NewTagRequest, TAGS, TagSearchRequest};
use crate::error::{Error, UsageError};
use crate::types::YetiObject;

use super::{Pagination, ResultPage, take_list};

impl YetiClient {
    /// Create a tag.
    #[instrument(skip(self))]
    pub async fn new_tag(&self, name: &str, description: Option<&str>) -> Result<YetiObject, Error> {
        let body = NewTagRequest {
            name,
            description: description.filter(|d| !d.is_empty()),
        };
        self.post_json(&format!("{}/", TAGS), &body).await
    }

    /// Search tags by name. An empty name is a usage error.
    #[instrument(skip(self))]
    pub async fn search_tags(&self, name: &str, pagination: Pagination) -> Result<ResultPage, Error> {
        if name.is_empty() {
            return Err(UsageError::EmptySearch { fields: "name" }.into());
        }

        let body = TagSearchRequest {
            name,
            count: pagination.count,
            page: pagination.page,
        };
        let response: Value = self
            .post_json(&format!("{}/search", TAGS), &body)
            .await?;

        Ok(ResultPage {
            items: take_list(response, "tags")?,
            pagination,
        })
    }
}
