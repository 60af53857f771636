//! DFIQ (Digital Forensics Investigative Questions) operations.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::YetiClient;
use crate::endpoints::{DFIQ, DfiqArchiveRequest, DfiqTypeFilter, DfiqYamlRequest, PatchDfiqRequest};
use crate::error::{Error, UsageError};
use crate::multipart;
use crate::request::Request;
use crate::types::YetiObject;

use super::{Pagination, ResultPage, is_blank};

const ARCHIVE_FIELD: &str = "archive";
const ARCHIVE_FILENAME: &str = "archive.zip";
const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Filters for [`YetiClient::search_dfiq`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct DfiqQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "is_blank")]
    pub dfiq_type: Option<String>,
}

impl DfiqQuery {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn dfiq_type(mut self, dfiq_type: impl Into<String>) -> Self {
        self.dfiq_type = Some(dfiq_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.name) && is_blank(&self.dfiq_type)
    }
}

impl YetiClient {
    /// Find a DFIQ object by name and type. Returns `None` on 404.
    #[instrument(skip(self))]
    pub async fn find_dfiq(&self, name: &str, dfiq_type: &str) -> Result<Option<YetiObject>, Error> {
        self.find_object(
            &format!("{}/", DFIQ),
            &[("name", name), ("type", dfiq_type)],
        )
        .await
    }

    /// Search DFIQ objects. An empty query is a usage error.
    #[instrument(skip(self))]
    pub async fn search_dfiq(
        &self,
        query: &DfiqQuery,
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        if query.is_empty() {
            return Err(UsageError::EmptySearch {
                fields: "name or dfiq_type",
            }
            .into());
        }
        self.search_collection(DFIQ, "dfiq", query, pagination).await
    }

    /// Create a DFIQ object from its YAML definition.
    #[instrument(skip(self, dfiq_yaml))]
    pub async fn new_dfiq_from_yaml(
        &self,
        dfiq_type: &str,
        dfiq_yaml: &str,
        update_indicators: bool,
    ) -> Result<YetiObject, Error> {
        let body = DfiqYamlRequest {
            dfiq_type,
            dfiq_yaml,
            update_indicators,
        };
        self.post_json(&format!("{}/from_yaml", DFIQ), &body).await
    }

    /// Replace a DFIQ object with a new YAML definition.
    #[instrument(skip(self, dfiq_yaml))]
    pub async fn patch_dfiq_from_yaml(
        &self,
        dfiq_type: &str,
        dfiq_yaml: &str,
        yeti_id: &str,
        update_indicators: bool,
    ) -> Result<YetiObject, Error> {
        let body = DfiqYamlRequest {
            dfiq_type,
            dfiq_yaml,
            update_indicators,
        };
        self.patch_json(&format!("{}/{}", DFIQ, yeti_id), &body)
            .await
    }

    /// Patch a DFIQ object previously returned by the server.
    ///
    /// The object must carry its `id` and `type`.
    #[instrument(skip(self, dfiq_object))]
    pub async fn patch_dfiq(&self, dfiq_object: &Value) -> Result<YetiObject, Error> {
        let missing = |field: &str| UsageError::ObjectReference {
            reason: format!("DFIQ object has no '{}'", field),
        };
        let dfiq_type = dfiq_object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| missing("type"))?;
        let id = match dfiq_object.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(missing("id").into()),
        };

        let body = PatchDfiqRequest {
            dfiq_type,
            dfiq_object,
        };
        self.patch_json(&format!("{}/{}", DFIQ, id), &body).await
    }

    /// Download a ZIP archive of DFIQ YAML, optionally limited to one type.
    #[instrument(skip(self))]
    pub async fn download_dfiq_archive(&self, dfiq_type: Option<&str>) -> Result<Vec<u8>, Error> {
        let body = DfiqArchiveRequest {
            count: 0,
            query: dfiq_type
                .filter(|t| !t.is_empty())
                .map(|dfiq_type| DfiqTypeFilter { dfiq_type }),
        };
        let request = Request::post(self.endpoint(&format!("{}/to_archive", DFIQ)))
            .json(serde_json::to_value(&body)?);
        self.dispatch(request).await
    }

    /// Upload a ZIP archive of DFIQ YAML read from `archive_path`.
    ///
    /// Returns the per-type counts the server reports.
    #[instrument(skip(self, archive_path), fields(path = %archive_path.as_ref().display()))]
    pub async fn upload_dfiq_archive(
        &self,
        archive_path: impl AsRef<Path>,
    ) -> Result<BTreeMap<String, u64>, Error> {
        let data = tokio::fs::read(archive_path.as_ref()).await?;
        self.upload_dfiq_archive_bytes(&data).await
    }

    /// Upload an in-memory ZIP archive of DFIQ YAML.
    #[instrument(skip(self, archive), fields(size = archive.len()))]
    pub async fn upload_dfiq_archive_bytes(
        &self,
        archive: &[u8],
    ) -> Result<BTreeMap<String, u64>, Error> {
        let encoded = multipart::encode_single_file(
            ARCHIVE_FIELD,
            ARCHIVE_FILENAME,
            archive,
            ARCHIVE_CONTENT_TYPE,
        );

        let request = Request::post(self.endpoint(&format!("{}/from_archive", DFIQ)))
            .header("Content-Type", encoded.content_type)
            .binary(encoded.body);

        let counts: BTreeMap<String, u64> = self.dispatch_json(request).await?;
        info!(?counts, "DFIQ archive uploaded");
        Ok(counts)
    }
}
