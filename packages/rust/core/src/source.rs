//! Where the pre-built pipelines document comes from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use showcase_shared::{PipelinesDocument, Result, ShowcaseError};

/// User-Agent string for document fetches.
const USER_AGENT: &str = concat!("PipelineShowcase/", env!("CARGO_PKG_VERSION"));

/// Timeout for fetching a remote document.
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Location of `pipelines-data.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticSource {
    /// A file on disk.
    Local(PathBuf),
    /// An http(s) URL.
    Remote(Url),
}

impl StaticSource {
    /// Interpret `spec` the way a page would: absolute http(s) URLs are
    /// fetched, anything else is a path relative to the page's directory.
    pub fn resolve(spec: &str, page_dir: &Path) -> Self {
        match Url::parse(spec) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(page_dir.join(spec)),
        }
    }

    /// Load and decode the document.
    #[instrument(skip_all, fields(source = %self))]
    pub async fn load(&self) -> Result<PipelinesDocument> {
        match self {
            Self::Local(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| ShowcaseError::io(path, e))?;
                serde_json::from_str(&content).map_err(|e| {
                    ShowcaseError::parse(format!("{}: invalid pipelines data: {e}", path.display()))
                })
            }
            Self::Remote(url) => fetch_document(url).await,
        }
    }
}

impl std::fmt::Display for StaticSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

async fn fetch_document(url: &Url) -> Result<PipelinesDocument> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| ShowcaseError::Network(format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| ShowcaseError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ShowcaseError::Network(format!(
            "failed to load pipelines data: {url}: HTTP {status}"
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ShowcaseError::Network(format!("{url}: failed to read body: {e}")))?;
    debug!(len = body.len(), "pipelines data fetched");

    serde_json::from_str(&body)
        .map_err(|e| ShowcaseError::parse(format!("{url}: invalid pipelines data: {e}")))
}
