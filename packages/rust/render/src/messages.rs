//! Fixed status markup written into page containers.

use crate::escape_html;

/// Placeholder while the organization listing is fetched.
pub fn repos_loading(org: &str) -> String {
    format!(
        r#"<div class="repo-loading">🔍 Fetching {} repositories...</div>"#,
        escape_html(org)
    )
}

/// Placeholder while repositories are probed for a Snakefile.
pub fn repos_searching(count: usize) -> String {
    format!(
        r#"
        <div class="repo-loading">
            🐍 Searching for Snakemake pipelines in {count} repositories...<br>
            <small>Checking common locations: Snakefile, workflow/Snakefile, etc.</small>
        </div>
    "#
    )
}

/// The listing failed or came back empty.
pub fn repos_unavailable() -> String {
    r#"<div class="repo-error">Unable to load repositories. Please check the organization name.</div>"#
        .to_string()
}

/// No repository contained a Snakefile.
pub fn no_snakemake_pipelines() -> String {
    r#"<div class="repo-error">No Snakemake pipelines found. Checked common locations: Snakefile, workflow/Snakefile, workflows/Snakefile, etc.</div>"#
        .to_string()
}

/// Count header plus the grid of repository cards.
pub fn repo_grid(cards: &[String]) -> String {
    let count = cards.len();
    let plural = if count == 1 { "" } else { "s" };
    format!(
        r#"
        <div class="pipeline-count">Found {count} Snakemake pipeline{plural}</div>
        <div class="repo-grid">{}</div>
    "#,
        cards.concat()
    )
}

/// Placeholder while the pipelines document loads.
pub fn pipelines_loading() -> String {
    r#"<div class="loading-message">Loading pipelines...</div>"#.to_string()
}

/// The pipelines document listed nothing.
pub fn no_pipelines() -> String {
    r#"<div class="no-pipelines">No pipelines found.</div>"#.to_string()
}

/// The pipelines document could not be loaded or decoded.
pub fn pipelines_failed() -> String {
    r#"
        <div class="error-message">
            <p>⚠️ Failed to load pipelines data.</p>
            <p>Please try refreshing the page or contact support if the problem persists.</p>
        </div>
    "#
    .to_string()
}
