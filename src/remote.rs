//! The people-chart transport: one call returns one employee and whatever
//! part of its subtree the server decided to inline.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::error::TransportError;
use crate::model::{EmployeeId, RawNode};

mod envelope;
mod http_client;
pub use self::envelope::decode_people_chart;

pub const PEOPLE_CHART_PATH: &str = "/relationship/people_chart";

/// Fetch one employee's payload. Implementations make exactly one outbound
/// call per invocation and never retry.
pub trait SubtreeFetcher {
    fn fetch_subtree(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = Result<RawNode, TransportError>>;
}

impl<F: SubtreeFetcher + ?Sized> SubtreeFetcher for &F {
    fn fetch_subtree(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = Result<RawNode, TransportError>> {
        (**self).fetch_subtree(id)
    }
}

pub struct HttpSubtreeFetcher {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpSubtreeFetcher {
    pub fn new(base_url: &str, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("orgchart");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SubtreeFetcher for HttpSubtreeFetcher {
    async fn fetch_subtree(&self, id: EmployeeId) -> Result<RawNode, TransportError> {
        tracing::debug!(%id, "fetching people chart");
        let mut req = self
            .client
            .get(self.url(&format!("{}/{}", PEOPLE_CHART_PATH, id)));
        if let Some(auth) = self.auth() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let resp = req
            .send()
            .await
            .map_err(|err| TransportError::request(id, err.to_string()))?;
        let body = self
            .ensure_ok(resp, id)?
            .bytes()
            .await
            .map_err(|err| TransportError::request(id, format!("read body: {}", err)))?;
        decode_people_chart(id, &body)
    }
}
