//! Jira REST adapter.
//!
//! Implements the `jib-core` tracker port against the Jira REST API
//! (`issue/{key}` and `project` resources, JSON bodies).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use jib_core::{
    config::Config,
    domain::{IssueKey, IssueSummary},
    errors::Error,
    ports::TrackerPort,
    util::join_url,
    Result,
};

#[derive(Clone, Debug)]
pub struct JiraClient {
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct IssueBody {
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct ProjectBody {
    key: String,
}

impl JiraClient {
    /// Build a client with a bounded per-request timeout. Cookies are not
    /// stored (server session cookies must not leak between lookups).
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.http_timeout)
            .build()
            .map_err(|e| Error::Http(format!("http client build: {e}")))?;
        Ok(Self { http })
    }

    fn api_url(cfg: &Config, resource: &str) -> String {
        let api_base = join_url(&cfg.jira_url, &cfg.rest_api_suffix);
        join_url(&api_base, resource)
    }
}

#[async_trait]
impl TrackerPort for JiraClient {
    async fn fetch_issue(&self, cfg: &Config, key: &IssueKey) -> Result<Option<IssueSummary>> {
        let url = Self::api_url(cfg, &format!("issue/{key}"));

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("issue request: {e}")))?;

        if !resp.status().is_success() {
            debug!(%key, status = %resp.status(), "issue fetch returned non-success");
            return Ok(None);
        }

        let body: IssueBody = resp
            .json()
            .await
            .map_err(|e| Error::Http(format!("issue body: {e}")))?;

        Ok(Some(IssueSummary {
            key: key.clone(),
            title: body.fields.summary,
        }))
    }

    async fn fetch_projects(&self, cfg: &Config) -> Result<Vec<String>> {
        let url = Self::api_url(cfg, "project");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("project request: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::Http(format!(
                "project fetch returned {}",
                resp.status()
            )));
        }

        let body: Vec<ProjectBody> = resp
            .json()
            .await
            .map_err(|e| Error::Http(format!("project body: {e}")))?;

        Ok(body.into_iter().map(|p| p.key).collect())
    }
}
