//! Shared types, error model, and configuration for the pipeline showcase.
//!
//! This crate is the foundation depended on by all other showcase crates.
//! It provides:
//! - [`ShowcaseError`] — the unified error type
//! - Domain types ([`Repository`], [`PipelineRecord`], [`PipelinesDocument`])
//! - Configuration ([`AppConfig`], [`GitHubSettings`], [`ProbeConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_CANDIDATES, GitHubConfig, GitHubSettings, PageConfig, ProbeConfig,
    ProbePolicyConfig, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, ShowcaseError};
pub use types::{PipelineRecord, PipelinesDocument, Repository};
