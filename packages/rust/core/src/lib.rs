//! Page orchestration for the pipeline showcase.
//!
//! This crate ties discovery and rendering into the two page flows
//! (live discovery and static data) and applies them to HTML pages.

pub mod controller;
pub mod page;
pub mod source;

pub use controller::{
    FlowOutcome, Flows, PageReport, display_pipelines, display_repositories, render_page,
};
pub use page::{Container, Page, PageContainer};
pub use source::StaticSource;
