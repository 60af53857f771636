//! Tagging, linking and graph traversal.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::client::YetiClient;
use crate::endpoints::{GRAPH_ADD, GRAPH_SEARCH, LinkObjectsRequest, TagObjectsRequest};
use crate::error::Error;
use crate::types::{ObjectRef, YetiLinkObject, YetiObject};

use super::Pagination;

/// Which edges a graph search follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Outbound,
    Inbound,
    Any,
}

/// Parameters of [`YetiClient::search_graph`].
///
/// # Example
///
/// ```
/// use yeti::GraphSearch;
///
/// let search = GraphSearch::new("indicator/42", ["malware"]).include_original(false);
/// assert_eq!(search.graph, "links");
/// assert_eq!(search.max_hops, 1);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct GraphSearch {
    /// Starting vertex as `<root_type>/<id>`, e.g. `dfiq/12`.
    pub source: String,
    /// Graph to walk, usually `links`.
    pub graph: String,
    /// Object types to return.
    pub target_types: Vec<String>,
    pub min_hops: u32,
    pub max_hops: u32,
    pub direction: Direction,
    /// Include the source vertex in the results.
    pub include_original: bool,
}

impl GraphSearch {
    pub fn new<I, S>(source: impl Into<String>, target_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: source.into(),
            graph: "links".to_string(),
            target_types: target_types.into_iter().map(Into::into).collect(),
            min_hops: 1,
            max_hops: 1,
            direction: Direction::Outbound,
            include_original: true,
        }
    }

    pub fn graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = graph.into();
        self
    }

    pub fn hops(mut self, min_hops: u32, max_hops: u32) -> Self {
        self.min_hops = min_hops;
        self.max_hops = max_hops;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn include_original(mut self, include_original: bool) -> Self {
        self.include_original = include_original;
        self
    }
}

#[derive(Debug, Serialize)]
struct GraphSearchRequest<'a> {
    count: u32,
    page: u32,
    #[serde(flatten)]
    search: &'a GraphSearch,
}

impl YetiClient {
    /// Tag an object returned by the server.
    ///
    /// The object's `root_type` selects the collection endpoint.
    #[instrument(skip(self, object))]
    pub async fn tag_object(&self, object: &YetiObject, tags: &[String]) -> Result<Value, Error> {
        let reference = ObjectRef::from_object(object)?;
        let endpoint = reference.collection()?.endpoint();

        let body = TagObjectsRequest {
            tags,
            ids: vec![reference.id()],
        };
        self.post_json(&format!("{}/tag", endpoint), &body).await
    }

    /// Link two objects returned by the server.
    #[instrument(skip(self, source, target))]
    pub async fn link_objects(
        &self,
        source: &YetiObject,
        target: &YetiObject,
        link_type: &str,
        description: Option<&str>,
    ) -> Result<YetiLinkObject, Error> {
        let body = LinkObjectsRequest {
            source: ObjectRef::from_object(source)?.to_string(),
            target: ObjectRef::from_object(target)?.to_string(),
            link_type,
            description,
        };
        self.post_json(GRAPH_ADD, &body).await
    }

    /// Walk the graph from `search.source`.
    ///
    /// The response (`vertices`, `paths`, `total`) is returned as-is.
    #[instrument(skip(self))]
    pub async fn search_graph(
        &self,
        search: &GraphSearch,
        pagination: Pagination,
    ) -> Result<Value, Error> {
        let body = GraphSearchRequest {
            count: pagination.count,
            page: pagination.page,
            search,
        };
        self.post_json(GRAPH_SEARCH, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn graph_search_defaults() {
        let body = GraphSearchRequest {
            count: 0,
            page: 0,
            search: &GraphSearch::new("source", ["type"]),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "count": 0,
                "page": 0,
                "source": "source",
                "graph": "links",
                "min_hops": 1,
                "max_hops": 1,
                "direction": "outbound",
                "include_original": true,
                "target_types": ["type"]
            })
        );
    }

    #[test]
    fn builder_overrides() {
        let search = GraphSearch::new("dfiq/1", Vec::<String>::new())
            .graph("tagged")
            .hops(1, 3)
            .direction(Direction::Any);
        let value = serde_json::to_value(&search).unwrap();
        assert_eq!(value["graph"], "tagged");
        assert_eq!(value["max_hops"], 3);
        assert_eq!(value["direction"], "any");
    }
}
