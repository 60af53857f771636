//! Domain operations over the request pipeline.
//!
//! Each resource module adds methods to [`YetiClient`]. They all follow the
//! same shape: assemble a JSON body from the non-empty parameters, dispatch,
//! decode. "find" lookups map a 404 to `None`; "search" calls refuse to run
//! without at least one filter.

mod dfiq;
mod entities;
mod graph;
mod indicators;
mod observables;
mod tags;

pub use dfiq::DfiqQuery;
pub use entities::EntityQuery;
pub use graph::{Direction, GraphSearch};
pub use indicators::{IndicatorQuery, YaraBundleRequest};
pub use observables::{BloomHit, BulkAddResult, ObservableQuery};

use serde::Serialize;
use serde_json::Value;

use crate::client::YetiClient;
use crate::endpoints::{GetMultipleRequest, SearchRequest};
use crate::error::{Error, UsageError};
use crate::request::Request;
use crate::types::YetiObject;

/// Page size and page index of a search.
///
/// A `count` of 0 asks the server for every match in one response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub count: u32,
    pub page: u32,
}

impl Pagination {
    /// Every match, in a single page.
    pub const ALL: Pagination = Pagination { count: 0, page: 0 };

    pub fn new(count: u32, page: u32) -> Self {
        Self { count, page }
    }

    /// The first page of `count` results.
    pub fn first(count: u32) -> Self {
        Self { count, page: 0 }
    }

    /// The page after this one.
    pub fn next(&self) -> Self {
        Self {
            count: self.count,
            page: self.page + 1,
        }
    }
}

/// One page of search results.
#[derive(Clone, Debug)]
pub struct ResultPage {
    /// Objects on this page.
    pub items: Vec<YetiObject>,
    /// The pagination this page was requested with.
    pub pagination: Pagination,
}

impl ResultPage {
    /// Whether no further page can hold results.
    ///
    /// A page holding fewer items than requested ends the results.
    pub fn is_last(&self) -> bool {
        self.pagination.count == 0 || self.items.len() < self.pagination.count as usize
    }

    /// Pagination for the following page, if there may be one.
    pub fn next_page(&self) -> Option<Pagination> {
        (!self.is_last()).then(|| self.pagination.next())
    }
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Pull the list stored under `key` out of a search response.
fn take_list(mut response: Value, key: &str) -> Result<Vec<YetiObject>, Error> {
    match response.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(Error::integrity(format!(
            "response has no '{}' list",
            key
        ))),
    }
}

impl YetiClient {
    /// `GET <path>?<params>`, mapping 404 to `None`.
    pub(crate) async fn find_object(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<YetiObject>, Error> {
        let request = params
            .iter()
            .fold(Request::get(self.endpoint(path)), |request, (name, value)| {
                request.query(*name, *value)
            });

        match self.dispatch_json(request).await {
            Ok(object) => Ok(Some(object)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// `POST <path>/search` with `{"query", "count", "page"}`.
    pub(crate) async fn search_collection<Q: Serialize>(
        &self,
        path: &str,
        result_key: &str,
        query: &Q,
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        let body = SearchRequest {
            query,
            count: pagination.count,
            page: pagination.page,
        };
        let response: Value = self
            .post_json(&format!("{}/search", path), &body)
            .await?;

        Ok(ResultPage {
            items: take_list(response, result_key)?,
            pagination,
        })
    }

    /// `POST <path>/get/multiple` with a list of names.
    pub(crate) async fn get_multiple(
        &self,
        path: &str,
        result_key: &str,
        names: &[String],
        pagination: Pagination,
    ) -> Result<ResultPage, Error> {
        if names.is_empty() {
            return Err(UsageError::EmptySearch { fields: "names" }.into());
        }

        let body = GetMultipleRequest {
            names,
            count: pagination.count,
            page: pagination.page,
        };
        let response: Value = self
            .post_json(&format!("{}/get/multiple", path), &body)
            .await?;

        Ok(ResultPage {
            items: take_list(response, result_key)?,
            pagination,
        })
    }

    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: serde::de::DeserializeOwned,
    {
        let request = Request::post(self.endpoint(path)).json(serde_json::to_value(body)?);
        self.dispatch_json(request).await
    }

    pub(crate) async fn patch_json<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: serde::de::DeserializeOwned,
    {
        let request = Request::patch(self.endpoint(path)).json(serde_json::to_value(body)?);
        self.dispatch_json(request).await
    }
}
