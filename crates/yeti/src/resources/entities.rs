//! Entity operations.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::client::YetiClient;
use crate::endpoints::{ENTITIES, NewEntityRequest};
use crate::error::{Error, UsageError};
use crate::types::YetiObject;

use super::{Pagination, ResultPage, is_blank};

/// Filters for [`YetiClient::search_entities`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct EntityQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "is_blank")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl EntityQuery {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
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

    pub fn is_empty(&self) -> bool {
        is_blank(&self.name)
            && is_blank(&self.entity_type)
            && is_blank(&self.description)
            && self.tags.is_empty()
    }
}

impl YetiClient {
    /// Find an entity by name and type. Returns `None` on 404.
    #[instrument(skip(self))]
    pub async fn find_entity(
        &self,
        name: &str,
        entity_type: &str,
    ) -> Result<Option<YetiObject>, Error> {
        self.find_object(
            &format!("{}/", ENTITIES),
            &[("name", name), ("type", entity_type)],
        )
        .await
    }

    /// Search entities. An empty query is a usage error.
    #[instrument(skip(self))]
    pub async fn search_entities(
        &self,
        query: &EntityQuery,
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        if query.is_empty() {
            return Err(UsageError::EmptySearch {
                fields: "name, entity_type, description, or tags",
            }
            .into());
        }
        self.search_collection(ENTITIES, "entities", query, pagination)
            .await
    }

    /// Fetch entities by exact name.
    #[instrument(skip(self))]
    pub async fn get_multiple_entities(
        &self,
        names: &[String],
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        self.get_multiple(ENTITIES, "entities", names, pagination)
            .await
    }

    /// Create an entity. Tags, if any, are applied in the same call.
    #[instrument(skip(self, entity))]
    pub async fn new_entity(&self, entity: &Value, tags: &[String]) -> Result<YetiObject, Error> {
        let body = NewEntityRequest {
            entity,
            tags: (!tags.is_empty()).then_some(tags),
        };
        self.post_json(&format!("{}/", ENTITIES), &body).await
    }
}
