//! Sequential Snakefile probing.
//!
//! Every repository is checked against the candidate paths in order, one
//! request at a time, with a pause every few repositories to stay well inside
//! the API's anonymous rate limit.

use tracing::{info, warn};

use showcase_shared::{ProbeConfig, Repository};

use crate::GitHubClient;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Result of probing one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The candidate path that answered with a success status.
    pub location: Option<String>,
    /// Number of probe requests issued.
    pub requests: usize,
}

impl ProbeOutcome {
    pub fn found(&self) -> bool {
        self.location.is_some()
    }
}

/// A repository that contains a Snakefile.
#[derive(Debug, Clone)]
pub struct DetectedPipeline {
    pub repo: Repository,
    /// Candidate path where the Snakefile was found.
    pub location: String,
}

/// Progress callback for long probe runs.
pub trait ProbeProgress: Send + Sync {
    /// Called before probing repository `current` of `total` (1-based).
    fn checking(&self, current: usize, total: usize, name: &str);
    /// Called when a Snakefile is found.
    fn found(&self, name: &str, location: &str);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProbe;

impl ProbeProgress for SilentProbe {
    fn checking(&self, _current: usize, _total: usize, _name: &str) {}
    fn found(&self, _name: &str, _location: &str) {}
}

// ---------------------------------------------------------------------------
// Prober
// ---------------------------------------------------------------------------

/// Checks repositories for a Snakefile at the configured candidate paths.
#[derive(Debug, Clone)]
pub struct Prober {
    client: GitHubClient,
    config: ProbeConfig,
}

impl Prober {
    pub fn new(client: GitHubClient, config: ProbeConfig) -> Self {
        Self { client, config }
    }

    /// The underlying API client.
    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Probe candidates in order and stop at the first hit.
    ///
    /// A transport failure ends the scan early and counts as "not found".
    pub async fn probe(&self, repo: &Repository) -> ProbeOutcome {
        let mut requests = 0;

        for candidate in &self.config.candidates {
            requests += 1;
            match self.client.contents_exist(&repo.name, candidate).await {
                Ok(true) => {
                    return ProbeOutcome {
                        location: Some(candidate.clone()),
                        requests,
                    };
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(repo = %repo.name, error = %e, "error checking for Snakefile");
                    break;
                }
            }
        }

        ProbeOutcome {
            location: None,
            requests,
        }
    }

    /// Whether `repo` has a Snakefile at any candidate path.
    pub async fn has_pipeline_file(&self, repo: &Repository) -> bool {
        self.probe(repo).await.found()
    }

    /// Keep the repositories that contain a Snakefile, preserving order.
    pub async fn filter_pipelines(
        &self,
        repos: &[Repository],
        progress: &dyn ProbeProgress,
    ) -> Vec<DetectedPipeline> {
        let total = repos.len();
        let mut pipelines = Vec::new();

        for (index, repo) in repos.iter().enumerate() {
            progress.checking(index + 1, total, &repo.name);

            if self.config.exclude.iter().any(|name| name == &repo.name) {
                info!(repo = %repo.name, "excluded, skipping");
            } else {
                info!("checking {}/{}: {}", index + 1, total, repo.name);
                if let Some(location) = self.probe(repo).await.location {
                    info!(repo = %repo.name, %location, "found Snakefile");
                    progress.found(&repo.name, &location);
                    pipelines.push(DetectedPipeline {
                        repo: repo.clone(),
                        location,
                    });
                }
            }

            if pause_after(index, total, self.config.pause_every) && !self.config.pause.is_zero() {
                tokio::time::sleep(self.config.pause).await;
            }
        }

        pipelines
    }
}

/// Whether to pause after the repository at `index`: after every
/// `every`-th one, but never after the last.
pub(crate) fn pause_after(index: usize, total: usize, every: usize) -> bool {
    every > 0 && index + 1 < total && (index + 1) % every == 0
}
