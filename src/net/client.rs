//! HTTP client for the path-finding server
//!
//! Two read-only endpoints:
//! - `GET /list-building` returns the building directory
//! - `GET /find-path?start=..&end=..` returns a route
//!
//! Any non-success status becomes `MapError::BadStatus`; connection
//! failures and unparseable bodies become `MapError::Transport`.
//! No timeouts are configured: a hung request simply never resolves.

use reqwest::Url;

use crate::error::{MapError, MapResult};
use crate::state::data::{BuildingDirectory, Route};

/// Cheap to clone; clones share one connection pool
#[derive(Debug, Clone)]
pub struct CampusClient {
    http: reqwest::Client,
    base_url: String,
}

impl CampusClient {
    pub fn new(base_url: &str) -> MapResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        // Validate once up front so endpoint construction can only fail on bad codes
        Url::parse(&base_url)
            .map_err(|e| MapError::Config(format!("invalid server URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| MapError::Config(format!("HTTP client build failed: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the building directory endpoint
    pub fn list_buildings_url(&self) -> MapResult<Url> {
        self.endpoint("list-building")
    }

    /// URL of the path endpoint with both short codes as query parameters
    pub fn find_path_url(&self, start: &str, end: &str) -> MapResult<Url> {
        let mut url = self.endpoint("find-path")?;
        url.query_pairs_mut().append_pair("start", start).append_pair("end", end);
        Ok(url)
    }

    /// Fetch the short code to long name mapping
    pub async fn list_buildings(&self) -> MapResult<BuildingDirectory> {
        let body = self.get_text(self.list_buildings_url()?).await?;
        BuildingDirectory::from_json(&body)
            .map_err(|e| MapError::Transport(format!("invalid building list: {e}")))
    }

    /// Fetch the shortest route between two buildings
    pub async fn find_path(&self, start: &str, end: &str) -> MapResult<Route> {
        let body = self.get_text(self.find_path_url(start, end)?).await?;
        Route::from_json(&body).map_err(|e| MapError::Transport(format!("invalid path response: {e}")))
    }

    fn endpoint(&self, name: &str) -> MapResult<Url> {
        let raw = format!("{}/{name}", self.base_url);
        Url::parse(&raw).map_err(|e| MapError::Config(format!("invalid endpoint URL '{raw}': {e}")))
    }

    async fn get_text(&self, url: Url) -> MapResult<String> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "unexpected status");
            return Err(MapError::bad_status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
