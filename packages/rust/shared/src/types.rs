//! Core domain types: repository listings and the pre-built pipelines document.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// A repository as returned by the hosting API's organization listing.
///
/// Only the fields the showcase renders are kept; everything except `name`
/// may be absent or `null` in the API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name (path segment under the organization).
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language detected by the host.
    #[serde(default)]
    pub language: Option<String>,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    /// Fork count.
    #[serde(default)]
    pub forks_count: Option<u64>,
    /// Topic labels.
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    /// ISO 8601 timestamp of the last update.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Browser URL of the repository.
    #[serde(default)]
    pub html_url: Option<String>,
}

// ---------------------------------------------------------------------------
// PipelineRecord / PipelinesDocument
// ---------------------------------------------------------------------------

/// One entry of the pre-built `pipelines-data.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stars: Option<u64>,
    #[serde(default)]
    pub forks: Option<u64>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Candidate path where the Snakefile was found at build time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snakefile_location: Option<String>,
}

/// Root structure of `pipelines-data.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelinesDocument {
    /// When the document was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Number of pipelines recorded by the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// The pipelines themselves. A missing key means "none".
    #[serde(default)]
    pub pipelines: Option<Vec<PipelineRecord>>,
}

impl PipelinesDocument {
    /// The listed pipelines, treating a missing list as empty.
    pub fn pipelines(&self) -> &[PipelineRecord] {
        self.pipelines.as_deref().unwrap_or_default()
    }
}
