//! HTML card rendering for repositories and pipelines.
//!
//! Renderers are pure: they take a record, substitute defaults for missing
//! fields, and return markup. All interpolated text is escaped.

mod format;
pub mod messages;

use std::fmt::Write as _;

use showcase_shared::{PipelineRecord, Repository};

pub use format::{
    DATE_FALLBACK, DATE_UNKNOWN, DEFAULT_LANGUAGE_COLOR, escape_html, format_date, language_color,
};

/// Topic tags shown on a live repository card.
pub const REPO_CARD_TOPICS: usize = 5;

/// Topic tags shown on a static pipeline card.
pub const PIPELINE_CARD_TOPICS: usize = 4;

// ---------------------------------------------------------------------------
// Live repository card
// ---------------------------------------------------------------------------

/// Render a card for a repository found by the live discovery flow.
pub fn repo_card(repo: &Repository) -> String {
    let name = escape_html(&repo.name);
    let url = escape_html(repo.html_url.as_deref().unwrap_or("#"));
    let language = repo.language.as_deref().unwrap_or("Snakemake");
    let description = repo
        .description
        .as_deref()
        .unwrap_or("Snakemake pipeline - No description available");
    let stars = repo.stargazers_count.unwrap_or(0);
    let forks = repo.forks_count.unwrap_or(0);

    let mut html = format!(
        r#"
        <div class="repo-card">
            <div class="repo-header">
                <h3>
                    <a href="{url}" target="_blank" rel="noopener">{name}</a>
                </h3>
                <span class="repo-badge snakemake">🐍 Snakemake</span>
            </div>
            <p class="repo-description">{description}</p>
            <div class="repo-meta">
                <span class="repo-language">
                    <span class="language-dot" style="background-color: {color}"></span>
                    {language}
                </span>
                <span class="repo-stars">⭐ {stars}</span>
                <span class="repo-forks">🔱 {forks}</span>
            </div>"#,
        description = escape_html(description),
        color = language_color(language),
        language = escape_html(language),
    );

    let topics = topic_tags(repo.topics.as_deref(), REPO_CARD_TOPICS);
    if !topics.is_empty() {
        let _ = write!(
            html,
            r#"
            <div class="repo-topics">{topics}</div>"#
        );
    }

    let _ = write!(
        html,
        r#"
            <div class="repo-actions">
                <a href="{url}" class="repo-button" target="_blank" rel="noopener">View Pipeline →</a>
            </div>
        </div>
"#
    );

    html
}

// ---------------------------------------------------------------------------
// Static pipeline card
// ---------------------------------------------------------------------------

/// Render a card for an entry of the pre-built pipelines document.
pub fn pipeline_card(pipeline: &PipelineRecord) -> String {
    let name = escape_html(pipeline.name.as_deref().unwrap_or("Unknown"));
    let description = escape_html(pipeline.description.as_deref().unwrap_or("Snakemake pipeline"));
    let url = escape_html(pipeline.url.as_deref().unwrap_or("#"));
    let language = escape_html(pipeline.language.as_deref().unwrap_or("Python"));
    let stars = pipeline.stars.unwrap_or(0);
    let forks = pipeline.forks.unwrap_or(0);
    let updated = escape_html(&format_date(pipeline.updated_at.as_deref()));

    let mut html = format!(
        r#"
            <div class="pipeline-card">
                <div class="pipeline-header">
                    <h4>
                        <a href="{url}" target="_blank" rel="noopener noreferrer">{name}</a>
                    </h4>
                </div>

                <p class="pipeline-description">{description}</p>"#
    );

    // Topics sit above the metadata row.
    let topics = topic_tags(pipeline.topics.as_deref(), PIPELINE_CARD_TOPICS);
    if !topics.is_empty() {
        let _ = write!(
            html,
            r#"
                <div class="pipeline-topics">{topics}</div>"#
        );
    }

    let _ = write!(
        html,
        r#"
                <div class="pipeline-meta">
                    <span class="meta-item">
                        <span class="meta-icon">💻</span>
                        <span class="meta-text">{language}</span>
                    </span>
                    <span class="meta-item">
                        <span class="meta-icon">⭐</span>
                        <span class="meta-text">{stars}</span>
                    </span>
                    <span class="meta-item">
                        <span class="meta-icon">🔱</span>
                        <span class="meta-text">{forks}</span>
                    </span>
                </div>
                <div class="pipeline-footer">
                    <span class="pipeline-updated">Updated: {updated}</span>
                    <a href="{url}" class="md-button md-button--primary" target="_blank" rel="noopener noreferrer">View Pipeline</a>
                </div>
            </div>
"#
    );

    html
}

/// At most `limit` topic tags, or an empty string when there are none.
fn topic_tags(topics: Option<&[String]>, limit: usize) -> String {
    topics
        .unwrap_or_default()
        .iter()
        .take(limit)
        .map(|topic| format!(r#"<span class="topic-tag">{}</span>"#, escape_html(topic)))
        .collect()
}
