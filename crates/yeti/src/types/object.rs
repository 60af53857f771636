//! Object references and root types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, UsageError};

/// A Yeti object as returned by the API.
///
/// Objects are passed through without client-side schema validation.
pub type YetiObject = serde_json::Value;

/// A link object returned by the graph API.
pub type YetiLinkObject = serde_json::Value;

/// The top-level collection an object belongs to (its `root_type`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootType {
    Indicator,
    Entity,
    Observable,
    Dfiq,
}

impl RootType {
    /// API path of this collection, relative to the root URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            RootType::Indicator => "/api/v2/indicators",
            RootType::Entity => "/api/v2/entities",
            RootType::Observable => "/api/v2/observables",
            RootType::Dfiq => "/api/v2/dfiq",
        }
    }

    /// The `root_type` string as the server spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            RootType::Indicator => "indicator",
            RootType::Entity => "entity",
            RootType::Observable => "observable",
            RootType::Dfiq => "dfiq",
        }
    }
}

impl fmt::Display for RootType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RootType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indicator" => Ok(RootType::Indicator),
            "entity" => Ok(RootType::Entity),
            "observable" => Ok(RootType::Observable),
            "dfiq" => Ok(RootType::Dfiq),
            other => Err(UsageError::ObjectReference {
                reason: format!("unknown root_type '{}'", other),
            }
            .into()),
        }
    }
}

/// The `id` and `root_type` of a server-side object.
///
/// The raw `root_type` string is kept so graph links can reference object
/// kinds this client has no endpoint for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    root_type: String,
    id: String,
}

impl ObjectRef {
    /// Build a reference from explicit parts.
    pub fn new(root_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            root_type: root_type.into(),
            id: id.into(),
        }
    }

    /// Extract the reference from an object returned by the API.
    ///
    /// # Errors
    ///
    /// Returns a usage error if `id` or `root_type` is missing.
    pub fn from_object(object: &YetiObject) -> Result<Self, Error> {
        let id = match object.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => {
                return Err(UsageError::ObjectReference {
                    reason: "object has no 'id'".to_string(),
                }
                .into());
            }
        };

        let root_type = object
            .get("root_type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| UsageError::ObjectReference {
                reason: "object has no 'root_type'".to_string(),
            })?;

        Ok(Self::new(root_type, id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    /// Resolve the root type to a known collection.
    pub fn collection(&self) -> Result<RootType, Error> {
        self.root_type.parse()
    }
}

/// Formats as `<root_type>/<id>`, the graph API's vertex notation.
impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.root_type, self.id)
    }
}
