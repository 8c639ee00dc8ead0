//! Hosting API client: organization listing and Snakefile probing.
//!
//! The live showcase first lists an organization's repositories, then checks
//! each one for a `Snakefile` at a handful of conventional locations. Only
//! repositories where one is found are shown as pipelines.

mod probe;

use reqwest::{Client, RequestBuilder, header};
use tracing::{debug, error, info, instrument};

use showcase_shared::{GitHubSettings, Repository, Result, ShowcaseError};

pub use probe::{DetectedPipeline, ProbeOutcome, ProbeProgress, Prober, SilentProbe};

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("PipelineShowcase/", env!("CARGO_PKG_VERSION"));

/// Media type requested from the API.
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Header carrying the remaining request quota.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

// ---------------------------------------------------------------------------
// GitHubClient
// ---------------------------------------------------------------------------

/// Thin typed client over the two hosting API endpoints the showcase uses.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    settings: GitHubSettings,
}

impl GitHubClient {
    /// Build a client. Adds the token header when one was resolved.
    pub fn new(settings: GitHubSettings) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));

        if let Some(token) = &settings.token {
            let value = header::HeaderValue::from_str(&format!("token {token}"))
                .map_err(|_| ShowcaseError::config("API token contains invalid characters"))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ShowcaseError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    /// The organization this client lists.
    pub fn org(&self) -> &str {
        &self.settings.org
    }

    /// `GET /orgs/{org}/repos?sort=updated&per_page={n}`, a single page.
    ///
    /// Fails on transport errors, non-success statuses, and undecodable bodies.
    #[instrument(skip_all, fields(org = %self.settings.org))]
    pub async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{}/repos", self.settings.api_base, self.settings.org);
        let per_page = self.settings.max_repos.to_string();

        let response = self
            .get(&url)
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| ShowcaseError::Network(format!("{url}: {e}")))?;

        log_rate_limit(&response);

        let status = response.status();
        if !status.is_success() {
            return Err(ShowcaseError::Network(format!("{url}: HTTP {status}")));
        }

        let repos: Vec<Repository> = response
            .json()
            .await
            .map_err(|e| ShowcaseError::parse(format!("{url}: invalid repository listing: {e}")))?;

        info!(count = repos.len(), "repositories listed");
        Ok(repos)
    }

    /// Like [`list_repositories`](Self::list_repositories), but logs failures
    /// and returns an empty list instead.
    pub async fn fetch_repositories(&self) -> Vec<Repository> {
        match self.list_repositories().await {
            Ok(repos) => repos,
            Err(e) => {
                error!(error = %e, "error fetching repositories");
                Vec::new()
            }
        }
    }

    /// `GET /repos/{org}/{name}/contents/{path}`.
    ///
    /// `Ok(true)` on a success status, `Ok(false)` on any other status, and
    /// `Err` when the request itself could not be completed.
    pub(crate) async fn contents_exist(&self, repo: &str, path: &str) -> Result<bool> {
        let url = format!(
            "{}/repos/{}/{repo}/contents/{path}",
            self.settings.api_base, self.settings.org
        );

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| ShowcaseError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        debug!(repo, path, %status, "contents probe");
        Ok(status.is_success())
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }
}

fn log_rate_limit(response: &reqwest::Response) {
    if let Some(remaining) = response
        .headers()
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
    {
        debug!(remaining, "API rate limit remaining");
    }
}
