//! Yeti API endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Exchanges an API key for an access token.
pub const API_TOKEN: &str = "/api/v2/auth/api-token";

/// Header carrying the API key on the token exchange.
pub const API_KEY_HEADER: &str = "x-yeti-apikey";

pub const INDICATORS: &str = "/api/v2/indicators";
pub const ENTITIES: &str = "/api/v2/entities";
pub const OBSERVABLES: &str = "/api/v2/observables";
pub const DFIQ: &str = "/api/v2/dfiq";
pub const TAGS: &str = "/api/v2/tags";
pub const BLOOM_SEARCH: &str = "/api/v2/bloom/search";
pub const GRAPH_ADD: &str = "/api/v2/graph/add";
pub const GRAPH_SEARCH: &str = "/api/v2/graph/search";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response from the token exchange.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Body of every `<resource>/search` call.
#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a, Q: Serialize> {
    pub query: &'a Q,
    pub count: u32,
    pub page: u32,
}

/// Body of `<resource>/get/multiple`.
#[derive(Debug, Serialize)]
pub(crate) struct GetMultipleRequest<'a> {
    pub names: &'a [String],
    pub count: u32,
    pub page: u32,
}

/// Body of `<resource>/tag`.
#[derive(Debug, Serialize)]
pub(crate) struct TagObjectsRequest<'a> {
    pub tags: &'a [String],
    pub ids: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewIndicatorRequest<'a> {
    pub indicator: &'a Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct PatchIndicatorRequest<'a> {
    pub indicator: &'a Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewEntityRequest<'a> {
    pub entity: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewObservableRequest<'a> {
    pub value: &'a str,
    #[serde(rename = "type")]
    pub observable_type: &'a str,
    pub tags: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkObservablesRequest {
    pub observables: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BloomSearchRequest<'a> {
    pub values: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct DfiqYamlRequest<'a> {
    pub dfiq_type: &'a str,
    pub dfiq_yaml: &'a str,
    pub update_indicators: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct PatchDfiqRequest<'a> {
    pub dfiq_type: &'a str,
    pub dfiq_object: &'a Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct DfiqArchiveRequest<'a> {
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<DfiqTypeFilter<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DfiqTypeFilter<'a> {
    #[serde(rename = "type")]
    pub dfiq_type: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewTagRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TagSearchRequest<'a> {
    pub name: &'a str,
    pub count: u32,
    pub page: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct LinkObjectsRequest<'a> {
    pub source: String,
    pub target: String,
    pub link_type: &'a str,
    pub description: Option<&'a str>,
}
