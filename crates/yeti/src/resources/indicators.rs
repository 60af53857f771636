//! Indicator operations.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::YetiClient;
use crate::endpoints::{INDICATORS, NewIndicatorRequest, PatchIndicatorRequest, TagObjectsRequest};
use crate::error::{Error, UsageError};
use crate::types::YetiObject;

use super::{Pagination, ResultPage, is_blank};

/// Filters for [`YetiClient::search_indicators`]. Empty fields are left out.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IndicatorQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "is_blank")]
    pub indicator_type: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl IndicatorQuery {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn indicator_type(mut self, indicator_type: impl Into<String>) -> Self {
        self.indicator_type = Some(indicator_type.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        is_blank(&self.name)
            && is_blank(&self.indicator_type)
            && is_blank(&self.pattern)
            && is_blank(&self.description)
            && self.tags.is_empty()
    }
}

/// Selection for [`YetiClient::get_yara_bundle`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct YaraBundleRequest {
    /// Indicator IDs to include.
    pub ids: Vec<String>,
    /// Include rules carrying any of these tags.
    pub tags: Vec<String>,
    /// Drop rules carrying any of these tags.
    pub exclude_tags: Vec<String>,
    /// Overlays to apply to the bundle.
    pub overlays: Vec<String>,
}

impl YetiClient {
    /// Find an indicator by name and type. Returns `None` on 404.
    #[instrument(skip(self))]
    pub async fn find_indicator(
        &self,
        name: &str,
        indicator_type: &str,
    ) -> Result<Option<YetiObject>, Error> {
        self.find_object(
            &format!("{}/", INDICATORS),
            &[("name", name), ("type", indicator_type)],
        )
        .await
    }

    /// Search indicators.
    ///
    /// # Errors
    ///
    /// Returns a usage error, without sending anything, if `query` is empty.
    #[instrument(skip(self))]
    pub async fn search_indicators(
        &self,
        query: &IndicatorQuery,
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        if query.is_empty() {
            return Err(UsageError::EmptySearch {
                fields: "name, indicator_type, pattern, description, or tags",
            }
            .into());
        }
        self.search_collection(INDICATORS, "indicators", query, pagination)
            .await
    }

    /// Fetch indicators by exact name.
    #[instrument(skip(self))]
    pub async fn get_multiple_indicators(
        &self,
        names: &[String],
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        self.get_multiple(INDICATORS, "indicators", names, pagination)
            .await
    }

    /// Create an indicator, then tag it when `tags` is non-empty.
    ///
    /// Returns the indicator as created, before tagging.
    #[instrument(skip(self, indicator))]
    pub async fn new_indicator(
        &self,
        indicator: &Value,
        tags: &[String],
    ) -> Result<YetiObject, Error> {
        let created: YetiObject = self
            .post_json(&format!("{}/", INDICATORS), &NewIndicatorRequest { indicator })
            .await?;

        if !tags.is_empty() {
            let id = match created.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(Value::Number(id)) => id.to_string(),
                _ => return Err(Error::integrity("created indicator has no id")),
            };
            debug!(%id, "Tagging new indicator");
            let _: Value = self
                .post_json(
                    &format!("{}/tag", INDICATORS),
                    &TagObjectsRequest {
                        tags,
                        ids: vec![id.as_str()],
                    },
                )
                .await?;
        }

        Ok(created)
    }

    /// Patch an indicator.
    #[instrument(skip(self, indicator))]
    pub async fn patch_indicator(
        &self,
        yeti_id: &str,
        indicator: &Value,
    ) -> Result<YetiObject, Error> {
        self.patch_json(
            &format!("{}/{}", INDICATORS, yeti_id),
            &PatchIndicatorRequest { indicator },
        )
        .await
    }

    /// Build a Yara bundle, returned as the server's JSON object.
    #[instrument(skip(self))]
    pub async fn get_yara_bundle(&self, request: &YaraBundleRequest) -> Result<Value, Error> {
        self.post_json(&format!("{}/yara/bundle", INDICATORS), request)
            .await
    }
}
