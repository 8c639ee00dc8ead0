//! Page controllers for the live discovery and static-data flows.
//!
//! Each controller owns one container for the duration of a run: it writes a
//! loading placeholder, does its work, then replaces the placeholder with an
//! error message, an empty-result message, or the rendered cards. Failures
//! never leave the container.

use tracing::{error, info, instrument, warn};

use showcase_discovery::{ProbeProgress, Prober};
use showcase_render::{messages, pipeline_card, repo_card};
use showcase_shared::PageConfig;

use crate::page::{Container, Page, PageContainer};
use crate::source::StaticSource;

/// How a flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Cards were rendered; holds the card count.
    Rendered(usize),
    /// The data loaded but nothing qualified.
    Empty,
    /// The data could not be loaded.
    Failed,
}

/// Which flows [`render_page`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flows {
    #[default]
    All,
    Live,
    Static,
}

impl Flows {
    fn live(self) -> bool {
        matches!(self, Self::All | Self::Live)
    }

    fn static_data(self) -> bool {
        matches!(self, Self::All | Self::Static)
    }
}

/// Per-flow results of a [`render_page`] run. `None` means the flow did not
/// run (not selected, or its container is missing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageReport {
    pub live: Option<FlowOutcome>,
    pub static_data: Option<FlowOutcome>,
}

// ---------------------------------------------------------------------------
// Live discovery flow
// ---------------------------------------------------------------------------

/// List the organization, keep repositories with a Snakefile, render them.
#[instrument(skip_all, fields(org = %prober.client().org()))]
pub async fn display_repositories(
    prober: &Prober,
    container: &mut dyn Container,
    progress: &dyn ProbeProgress,
) -> FlowOutcome {
    container.set_inner_html(&messages::repos_loading(prober.client().org()));

    let repos = prober.client().fetch_repositories().await;
    if repos.is_empty() {
        container.set_inner_html(&messages::repos_unavailable());
        return FlowOutcome::Failed;
    }

    container.set_inner_html(&messages::repos_searching(repos.len()));

    let pipelines = prober.filter_pipelines(&repos, progress).await;
    if pipelines.is_empty() {
        info!(checked = repos.len(), "no Snakemake pipelines found");
        container.set_inner_html(&messages::no_snakemake_pipelines());
        return FlowOutcome::Empty;
    }

    let cards: Vec<String> = pipelines.iter().map(|p| repo_card(&p.repo)).collect();
    container.set_inner_html(&messages::repo_grid(&cards));

    info!(found = cards.len(), checked = repos.len(), "rendered pipeline grid");
    FlowOutcome::Rendered(cards.len())
}

// ---------------------------------------------------------------------------
// Static-data flow
// ---------------------------------------------------------------------------

/// Load the pre-built pipelines document and render one card per entry.
#[instrument(skip_all, fields(source = %source))]
pub async fn display_pipelines(source: &StaticSource, container: &mut dyn Container) -> FlowOutcome {
    container.set_inner_html(&messages::pipelines_loading());

    let document = match source.load().await {
        Ok(document) => document,
        Err(e) => {
            error!(error = %e, "error loading pipelines");
            container.set_inner_html(&messages::pipelines_failed());
            return FlowOutcome::Failed;
        }
    };

    let pipelines = document.pipelines();
    if pipelines.is_empty() {
        container.set_inner_html(&messages::no_pipelines());
        return FlowOutcome::Empty;
    }

    let cards: Vec<String> = pipelines.iter().map(pipeline_card).collect();
    container.set_inner_html(&cards.join("\n"));

    info!("loaded {} pipelines", cards.len());
    FlowOutcome::Rendered(cards.len())
}

// ---------------------------------------------------------------------------
// Whole page
// ---------------------------------------------------------------------------

/// Run the selected flows against `page`, one after the other. A flow whose
/// container is absent or malformed is skipped without touching the page.
pub async fn render_page(
    page: &mut Page,
    ids: &PageConfig,
    flows: Flows,
    prober: &Prober,
    source: &StaticSource,
    progress: &dyn ProbeProgress,
) -> PageReport {
    let mut report = PageReport::default();

    if flows.live() {
        if let Some(mut container) = writable(page, &ids.repos_container_id) {
            report.live = Some(display_repositories(prober, &mut container, progress).await);
        }
    }

    if flows.static_data() {
        if let Some(mut container) = writable(page, &ids.pipelines_container_id) {
            report.static_data = Some(display_pipelines(source, &mut container).await);
        }
    }

    report
}

fn writable<'p>(page: &'p mut Page, id: &str) -> Option<PageContainer<'p>> {
    match page.container(id) {
        Ok(container) => container,
        Err(e) => {
            warn!(id, error = %e, "skipping flow");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use showcase_discovery::{GitHubClient, SilentProbe};
    use showcase_shared::{GitHubSettings, ProbeConfig};
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Keeps every write so tests can check the placeholder sequence.
    #[derive(Default)]
    struct Recording {
        writes: Vec<String>,
    }

    impl Container for Recording {
        fn set_inner_html(&mut self, html: &str) {
            self.writes.push(html.to_string());
        }
    }

    impl Recording {
        fn last(&self) -> &str {
            self.writes.last().map(String::as_str).unwrap_or_default()
        }
    }

    fn prober_for(base: &str) -> Prober {
        let client = GitHubClient::new(GitHubSettings {
            api_base: base.to_string(),
            org: "OpenOmics".into(),
            max_repos: 100,
            token: None,
            timeout: Duration::from_secs(5),
        })
        .expect("client");
        let config = ProbeConfig {
            pause: Duration::ZERO,
            ..ProbeConfig::default()
        };
        Prober::new(client, config)
    }

    async fn mount_listing(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/orgs/OpenOmics/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn write_data(json: &str) -> (tempfile::TempDir, StaticSource) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pipelines-data.json");
        std::fs::write(&path, json).expect("write");
        (dir, StaticSource::Local(path))
    }

    #[tokio::test]
    async fn live_flow_renders_only_repos_with_snakefile() {
        let server = MockServer::start().await;
        mount_listing(
            &server,
            serde_json::json!([
                {"name": "RNA-seek", "html_url": "https://github.com/OpenOmics/RNA-seek"},
                {"name": "docs-site"}
            ]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/repos/OpenOmics/RNA-seek/contents/workflow/Snakefile"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut container = Recording::default();
        let outcome =
            display_repositories(&prober_for(&server.uri()), &mut container, &SilentProbe).await;

        assert_eq!(outcome, FlowOutcome::Rendered(1));
        assert!(container.writes[0].contains("Fetching OpenOmics repositories"));
        assert!(container.writes[1].contains("in 2 repositories"));
        assert!(container.last().contains("Found 1 Snakemake pipeline<"));
        assert!(container.last().contains("RNA-seek"));
        assert!(!container.last().contains("docs-site"));
    }

    #[tokio::test]
    async fn empty_listing_shows_unable_to_load_without_probing() {
        let server = MockServer::start().await;
        mount_listing(&server, serde_json::json!([])).await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/repos/.*$"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut container = Recording::default();
        let outcome =
            display_repositories(&prober_for(&server.uri()), &mut container, &SilentProbe).await;

        assert_eq!(outcome, FlowOutcome::Failed);
        assert_eq!(container.writes.len(), 2);
        assert!(container.last().contains("Unable to load repositories"));
    }

    #[tokio::test]
    async fn failed_listing_shows_unable_to_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/OpenOmics/repos"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let mut container = Recording::default();
        let outcome =
            display_repositories(&prober_for(&server.uri()), &mut container, &SilentProbe).await;

        assert_eq!(outcome, FlowOutcome::Failed);
        assert!(container.last().contains("Unable to load repositories"));
    }

    #[tokio::test]
    async fn no_snakefiles_shows_no_pipelines_found() {
        let server = MockServer::start().await;
        mount_listing(&server, serde_json::json!([{"name": "docs-site"}])).await;

        let mut container = Recording::default();
        let outcome =
            display_repositories(&prober_for(&server.uri()), &mut container, &SilentProbe).await;

        assert_eq!(outcome, FlowOutcome::Empty);
        assert!(container.last().contains("No Snakemake pipelines found"));
    }

    #[tokio::test]
    async fn static_flow_renders_every_entry() {
        let (_dir, source) = write_data(
            r#"{"pipelines": [
                {"name": "RNA-seek", "stars": 12, "topics": ["rna-seq"]},
                {"name": "chrom-seek", "updated_at": "garbage"}
            ]}"#,
        );

        let mut container = Recording::default();
        let outcome = display_pipelines(&source, &mut container).await;

        assert_eq!(outcome, FlowOutcome::Rendered(2));
        assert!(container.writes[0].contains("Loading pipelines"));
        assert_eq!(container.last().matches("class=\"pipeline-card\"").count(), 2);
        assert!(container.last().contains("Updated: Recently"));
    }

    #[tokio::test]
    async fn static_flow_with_empty_list_says_no_pipelines() {
        let (_dir, source) = write_data(r#"{"pipelines": []}"#);

        let mut container = Recording::default();
        assert_eq!(display_pipelines(&source, &mut container).await, FlowOutcome::Empty);
        assert!(container.last().contains("No pipelines found."));

        let (_dir, source) = write_data(r#"{"count": 0}"#);
        assert_eq!(display_pipelines(&source, &mut container).await, FlowOutcome::Empty);
    }

    #[tokio::test]
    async fn static_flow_failures_show_error_message() {
        let (_dir, source) = write_data("{ not json");
        let mut container = Recording::default();
        assert_eq!(display_pipelines(&source, &mut container).await, FlowOutcome::Failed);
        assert!(container.last().contains("Failed to load pipelines data"));

        let missing = StaticSource::Local(PathBuf::from("/definitely/not/here.json"));
        assert_eq!(display_pipelines(&missing, &mut container).await, FlowOutcome::Failed);
    }

    #[tokio::test]
    async fn render_page_skips_missing_containers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (_dir, source) = write_data(r#"{"pipelines": [{"name": "RNA-seek"}]}"#);
        let html = "<html><body><div id=\"pipelines-container\"></div></body></html>";
        let mut page = Page::new(html);

        let report = render_page(
            &mut page,
            &PageConfig::default(),
            Flows::All,
            &prober_for(&server.uri()),
            &source,
            &SilentProbe,
        )
        .await;

        assert_eq!(report.live, None);
        assert_eq!(report.static_data, Some(FlowOutcome::Rendered(1)));
        assert!(page.html().contains("pipeline-card"));
        assert!(!page.html().contains("Loading pipelines"));
    }

    #[tokio::test]
    async fn render_page_without_containers_leaves_page_untouched() {
        let (_dir, source) = write_data(r#"{"pipelines": []}"#);
        let html = "<html><body><p>About us</p></body></html>";
        let mut page = Page::new(html);

        let report = render_page(
            &mut page,
            &PageConfig::default(),
            Flows::All,
            &prober_for("http://127.0.0.1:9"),
            &source,
            &SilentProbe,
        )
        .await;

        assert_eq!(report, PageReport::default());
        assert_eq!(page.html(), html);
    }

    #[tokio::test]
    async fn render_page_honors_flow_selection() {
        let (_dir, source) = write_data(r#"{"pipelines": [{"name": "RNA-seek"}]}"#);
        let html = "<div id=\"github-repos-container\"></div><div id=\"pipelines-container\"></div>";
        let mut page = Page::new(html);

        let report = render_page(
            &mut page,
            &PageConfig::default(),
            Flows::Static,
            &prober_for("http://127.0.0.1:9"),
            &source,
            &SilentProbe,
        )
        .await;

        assert_eq!(report.live, None);
        assert_eq!(report.static_data, Some(FlowOutcome::Rendered(1)));
        assert!(page.html().contains("<div id=\"github-repos-container\"></div>"));
    }

    #[tokio::test]
    async fn render_page_skips_unclosed_container() {
        let (_dir, source) = write_data(r#"{"pipelines": [{"name": "RNA-seek"}]}"#);
        let html = "<body><div id=\"pipelines-container\"><p>old</p></body>";
        let mut page = Page::new(html);

        let report = render_page(
            &mut page,
            &PageConfig::default(),
            Flows::Static,
            &prober_for("http://127.0.0.1:9"),
            &source,
            &SilentProbe,
        )
        .await;

        assert_eq!(report.static_data, None);
        assert_eq!(page.html(), html);
    }
}
