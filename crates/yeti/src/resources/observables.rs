//! Observable operations, including the bloom filter lookup.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::client::YetiClient;
use crate::endpoints::{
    BLOOM_SEARCH, BloomSearchRequest, BulkObservablesRequest, NewObservableRequest, OBSERVABLES,
};
use crate::error::{Error, UsageError};
use crate::types::YetiObject;

use super::{Pagination, ResultPage, is_blank};

/// Filters for [`YetiClient::search_observables`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ObservableQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub value: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "is_blank")]
    pub observable_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ObservableQuery {
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn observable_type(mut self, observable_type: impl Into<String>) -> Self {
        self.observable_type = Some(observable_type.into());
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
        is_blank(&self.value) && is_blank(&self.observable_type) && self.tags.is_empty()
    }
}

/// Outcome of [`YetiClient::add_observables_bulk`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BulkAddResult {
    /// Observables created or updated.
    #[serde(default)]
    pub added: Vec<YetiObject>,
    /// Values the server could not add.
    #[serde(default)]
    pub failed: Vec<String>,
}

/// A value found in one or more bloom filters.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BloomHit {
    pub value: String,
    /// Names of the filters that matched.
    pub hits: Vec<String>,
}

impl YetiClient {
    /// Find an observable by value and type. Returns `None` on 404.
    #[instrument(skip(self))]
    pub async fn find_observable(
        &self,
        value: &str,
        observable_type: &str,
    ) -> Result<Option<YetiObject>, Error> {
        self.find_object(
            &format!("{}/", OBSERVABLES),
            &[("value", value), ("type", observable_type)],
        )
        .await
    }

    /// Search observables. An empty query is a usage error.
    #[instrument(skip(self))]
    pub async fn search_observables(
        &self,
        query: &ObservableQuery,
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        if query.is_empty() {
            return Err(UsageError::EmptySearch {
                fields: "value, observable_type, or tags",
            }
            .into());
        }
        self.search_collection(OBSERVABLES, "observables", query, pagination)
            .await
    }

    /// Add a single observable.
    ///
    /// `tags` is sent as `null` when empty.
    #[instrument(skip(self))]
    pub async fn add_observable(
        &self,
        value: &str,
        observable_type: &str,
        tags: &[String],
    ) -> Result<YetiObject, Error> {
        let body = NewObservableRequest {
            value,
            observable_type,
            tags: (!tags.is_empty()).then_some(tags),
        };
        self.post_json(&format!("{}/", OBSERVABLES), &body).await
    }

    /// Add many observables at once.
    ///
    /// Each entry needs a `value` and a `type`. Non-empty `tags` are set on
    /// every entry, replacing any tags it carried.
    #[instrument(skip(self, observables), fields(count = observables.len()))]
    pub async fn add_observables_bulk(
        &self,
        observables: Vec<Value>,
        tags: &[String],
    ) -> Result<BulkAddResult, Error> {
        let observables = if tags.is_empty() {
            observables
        } else {
            observables
                .into_iter()
                .map(|mut observable| {
                    if let Some(fields) = observable.as_object_mut() {
                        fields.insert("tags".to_string(), Value::from(tags.to_vec()));
                    }
                    observable
                })
                .collect()
        };

        self.post_json(
            &format!("{}/bulk", OBSERVABLES),
            &BulkObservablesRequest { observables },
        )
        .await
    }

    /// Check values against the server's bloom filters.
    #[instrument(skip(self, values), fields(count = values.len()))]
    pub async fn search_bloom(&self, values: &[String]) -> Result<Vec<BloomHit>, Error> {
        self.post_json(BLOOM_SEARCH, &BloomSearchRequest { values })
            .await
    }
}
