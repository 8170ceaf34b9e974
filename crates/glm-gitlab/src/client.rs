//! Build variable listing.
//!
//! GitLab pages list endpoints and reports the full size in `X-Total`.
//! When the first page is short of that total, the request is re-issued
//! asking for `per_page=<total>`. Servers cap `per_page`, so if the
//! re-issued page is still short the remaining pages are followed through
//! `X-Next-Page`.

use glm_core::{BuildVariable, ProjectRef, Settings};
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use crate::error::GitlabError;
use crate::source::VariableSource;

const API_PATH: &str = "/api/v4";

/// GitLab REST client authenticated with a private token.
pub struct GitlabClient {
    http: reqwest::Client,
    api_url: String,
    token: SecretString,
    sudo: String,
}

/// One response of the variable list endpoint.
struct Page {
    items: Vec<BuildVariable>,
    total: Option<usize>,
    next_page: Option<u64>,
}

impl GitlabClient {
    /// `base_url` may be the instance root or already end in `/api/v4`.
    /// Every request impersonates `sudo` through the `Sudo` header.
    pub fn new(
        base_url: &str,
        token: SecretString,
        sudo: impl Into<String>,
    ) -> Result<Self, GitlabError> {
        let api_url = api_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("glm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GitlabError::ClientInit { source: e })?;

        Ok(Self {
            http,
            api_url,
            token,
            sudo: sudo.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GitlabError> {
        Self::new(
            &settings.base_url,
            settings.token.clone(),
            settings.user_role.clone(),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn list_page(
        &self,
        project: &ProjectRef,
        per_page: Option<usize>,
        page: Option<u64>,
    ) -> Result<Page, GitlabError> {
        let url = format!(
            "{api}/projects/{id}/variables",
            api = self.api_url,
            id = project_segment(project),
        );

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(per_page) = per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .header("PRIVATE-TOKEN", self.token.expose_secret())
            .header("Sudo", &self.sudo)
            .send()
            .await
            .map_err(|e| GitlabError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<body unavailable: {e}>"),
            };
            return Err(GitlabError::Status { url, status, body });
        }

        let total = header_number(response.headers(), "x-total");
        let next_page = header_number(response.headers(), "x-next-page");
        let items: Vec<BuildVariable> = response
            .json()
            .await
            .map_err(|e| GitlabError::Decode { url, source: e })?;

        Ok(Page {
            items,
            total: total.map(|t| t as usize),
            next_page,
        })
    }
}

impl VariableSource for GitlabClient {
    async fn fetch_build_variables(
        &self,
        project: &ProjectRef,
    ) -> Result<Vec<BuildVariable>, GitlabError> {
        tracing::info!(%project, "getting build vars from project");

        let first = self.list_page(project, None, None).await?;
        let total = match first.total {
            Some(total) if total > first.items.len() => total,
            _ => return Ok(first.items),
        };

        tracing::debug!(
            received = first.items.len(),
            total,
            "first page short of total, requesting all variables in one page"
        );

        let full = self.list_page(project, Some(total), None).await?;
        let mut vars = full.items;
        let mut next = full.next_page;

        while vars.len() < total {
            let Some(page) = next else { break };
            tracing::debug!(page, received = vars.len(), total, "following next page");
            let more = self.list_page(project, Some(total), Some(page)).await?;
            vars.extend(more.items);
            next = more.next_page;
        }

        Ok(vars)
    }
}

/// Normalize a user-supplied base URL to the v4 API root.
fn api_url(base_url: &str) -> Result<String, GitlabError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| GitlabError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GitlabError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }

    if trimmed.ends_with(API_PATH) {
        Ok(trimmed.to_owned())
    } else {
        Ok(format!("{trimmed}{API_PATH}"))
    }
}

/// Path segment identifying a project: the numeric ID, or the
/// namespaced path percent-encoded as a single segment.
fn project_segment(project: &ProjectRef) -> String {
    match project {
        ProjectRef::Id(id) => id.to_string(),
        ProjectRef::Path(path) => urlencoding::encode(path).into_owned(),
    }
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        // arch-lint: allow(no-silent-result-drop) reason="pagination headers are advisory; a non-ASCII value is treated as absent"
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        // arch-lint: allow(no-silent-result-drop) reason="a non-numeric pagination header is treated as absent"
        .and_then(|v| v.parse().ok())
}
