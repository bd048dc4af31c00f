use anyhow::{Context, Result};
use release_selector::{Release, ReleaseSource};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

mod structs;

pub const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "release-info/0.1";
const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github+json";
const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
const GITHUB_API_VERSION: &str = "2022-11-28";

pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
}

fn default_github_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT_HEADER));
    headers.insert(
        HeaderName::from_static(GITHUB_API_VERSION_HEADER),
        HeaderValue::from_static(GITHUB_API_VERSION),
    );

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("GITHUB_TOKEN is not a valid header value")?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

impl GithubClient {
    pub fn new(api_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_github_headers(token)?)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn releases_url(&self, repo: &str) -> String {
        format!("{}/repos/{repo}/releases", self.api_url)
    }
}

impl ReleaseSource for GithubClient {
    async fn list_releases(&self, repo: &str) -> Result<(Vec<Release>, u16)> {
        let url = self.releases_url(repo);
        debug!("GET {url}");

        let res = self.client.get(&url).send().await?.error_for_status()?;
        let status = res.status();
        if status != StatusCode::OK {
            return Ok((Vec::new(), status.as_u16()));
        }

        let json: Vec<structs::GithubRelease> = res
            .json()
            .await
            .context("Failed to parse releases list")?;

        for release in &json {
            debug!(
                "Release {} (draft: {}, prerelease: {}, published: {}) with {} asset(s), {} bytes",
                release.tag_name,
                release.draft,
                release.prerelease,
                release.published_at.as_deref().unwrap_or("never"),
                release.assets.len(),
                release.assets.iter().map(|a| a.size).sum::<i64>()
            );
        }

        Ok((
            json.into_iter().map(Release::from).collect(),
            status.as_u16(),
        ))
    }
}
