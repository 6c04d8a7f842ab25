use std::{marker::PhantomData, time::Duration};

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::{ClientId, ServiceCode},
    error::ApiError,
    protocol::{self, Client, Service},
};
use tracing::{debug, warn};

use crate::{
    record::ListRecord,
    source::{DataSource, SourceError},
};

/// Backend routes of one entity kind.
pub trait RestResource: ListRecord + Serialize + DeserializeOwned {
    fn collection_route() -> String;

    fn create_route() -> String;

    fn update_request(id: &Self::Id) -> (Method, String);

    fn status_request(id: &Self::Id, active: bool) -> (Method, String);

    /// Places `id` into the body sent for an update.
    fn with_id(self, id: &Self::Id) -> Self;
}

impl RestResource for Client {
    fn collection_route() -> String {
        protocol::client_collection_route().to_string()
    }

    fn create_route() -> String {
        protocol::client_collection_route().to_string()
    }

    fn update_request(id: &ClientId) -> (Method, String) {
        (Method::PUT, protocol::client_item_route(*id))
    }

    fn status_request(id: &ClientId, active: bool) -> (Method, String) {
        (Method::PATCH, protocol::client_status_route(*id, active))
    }

    fn with_id(mut self, id: &ClientId) -> Self {
        self.id = Some(*id);
        self
    }
}

impl RestResource for Service {
    fn collection_route() -> String {
        protocol::service_collection_route().to_string()
    }

    fn create_route() -> String {
        protocol::service_save_route().to_string()
    }

    fn update_request(_code: &ServiceCode) -> (Method, String) {
        (Method::PUT, protocol::service_update_route().to_string())
    }

    fn status_request(code: &ServiceCode, active: bool) -> (Method, String) {
        (Method::PUT, protocol::service_status_route(code, active))
    }

    fn with_id(mut self, code: &ServiceCode) -> Self {
        self.code = Some(code.clone());
        self
    }
}

/// [`DataSource`] backed by the console's REST API.
///
/// The bearer credential is attached to every request as-is; obtaining and
/// refreshing it is the session store's job.
pub struct RestDataSource<R> {
    http: HttpClient,
    base_url: String,
    bearer_token: Option<String>,
    _record: PhantomData<fn() -> R>,
}

impl<R: RestResource> RestDataSource<R> {
    pub fn new(base_url: impl Into<String>, bearer_token: Option<String>) -> Self {
        Self::with_http_client(HttpClient::new(), base_url, bearer_token)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SourceError::Unavailable(format!("failed to build http client: {err}")))?;
        Ok(Self::with_http_client(http, base_url, bearer_token))
    }

    pub fn with_http_client(
        http: HttpClient,
        base_url: impl Into<String>,
        bearer_token: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            bearer_token: bearer_token.filter(|token| !token.trim().is_empty()),
            _record: PhantomData,
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn request(&self, method: Method, route: &str) -> (String, RequestBuilder) {
        let url = self.url(route);
        let mut builder = self.http.request(method, &url);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        (url, builder)
    }

    async fn send(
        &self,
        operation: &'static str,
        url: String,
        builder: RequestBuilder,
    ) -> Result<Response, SourceError> {
        let res = builder.send().await.map_err(|err| SourceError::Transport {
            url: url.clone(),
            message: err.to_string(),
        })?;

        let status = res.status();
        if status.is_success() {
            debug!(kind = R::KIND, operation, %status, "backend request succeeded");
            return Ok(res);
        }

        let fallback = status.to_string();
        let body = res.text().await.unwrap_or_default();
        let message = ApiError::message_from_body(&body, &fallback);
        warn!(kind = R::KIND, operation, %status, %message, "backend rejected request");
        Err(SourceError::Rejected {
            operation,
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        res: Response,
    ) -> Result<T, SourceError> {
        res.json::<T>().await.map_err(|err| SourceError::Decode {
            operation,
            message: err.to_string(),
        })
    }
}

/// Decodes a collection row by row; rows that do not fit `R` are dropped.
fn decode_rows<R: RestResource>(rows: Vec<Value>) -> Vec<R> {
    let total = rows.len();
    let records: Vec<R> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(kind = R::KIND, index, error = %err, "skipping undecodable row");
                None
            }
        })
        .collect();
    if records.len() < total {
        warn!(
            kind = R::KIND,
            skipped = total - records.len(),
            total,
            "collection decoded partially"
        );
    }
    records
}

#[async_trait]
impl<R: RestResource> DataSource<R> for RestDataSource<R> {
    async fn fetch_all(&self) -> Result<Vec<R>, SourceError> {
        let (url, builder) = self.request(Method::GET, &R::collection_route());
        let res = self.send("fetch_all", url, builder).await?;
        let rows: Vec<Value> = Self::decode("fetch_all", res).await?;
        Ok(decode_rows(rows))
    }

    async fn create(&self, record: R) -> Result<R, SourceError> {
        let (url, builder) = self.request(Method::POST, &R::create_route());
        let res = self.send("create", url, builder.json(&record)).await?;
        Self::decode("create", res).await
    }

    async fn update(&self, id: &R::Id, record: R) -> Result<R, SourceError> {
        let (method, route) = R::update_request(id);
        let (url, builder) = self.request(method, &route);
        let res = self
            .send("update", url, builder.json(&record.with_id(id)))
            .await?;
        Self::decode("update", res).await
    }

    async fn set_status(&self, id: &R::Id, active: bool) -> Result<(), SourceError> {
        let (method, route) = R::status_request(id, active);
        let (url, builder) = self.request(method, &route);
        self.send("set_status", url, builder).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/rest_tests.rs"]
mod tests;
