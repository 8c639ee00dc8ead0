//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use showcase_core::{FlowOutcome, Flows, Page, StaticSource, render_page};
use showcase_discovery::{GitHubClient, ProbeProgress, Prober};
use showcase_shared::{
    AppConfig, GitHubSettings, ProbeConfig, init_config, load_config, load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Pipeline showcase — render Snakemake pipeline cards into documentation pages.
#[derive(Parser)]
#[command(
    name = "pipeline-showcase",
    version,
    about = "Render an organization's Snakemake pipelines as cards in documentation pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.pipeline-showcase/showcase.toml.
    #[arg(long, global = true, env = "PIPELINE_SHOWCASE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Which page flows to run.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum FlowArg {
    All,
    Live,
    Static,
}

impl From<FlowArg> for Flows {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::All => Flows::All,
            FlowArg::Live => Flows::Live,
            FlowArg::Static => Flows::Static,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fill a page's pipeline containers, as a browser would on page load.
    Render {
        /// HTML page to render.
        #[arg(long)]
        page: PathBuf,

        /// Where to write the result (defaults to rewriting the page in place).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Pipelines document: http(s) URL or path relative to the page.
        #[arg(long)]
        data: Option<String>,

        /// Flows to run.
        #[arg(long, default_value = "all")]
        flow: FlowArg,
    },

    /// List the organization's repositories that contain a Snakefile.
    Discover,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "showcase=info,pipeline_showcase=info",
        1 => "showcase=debug,pipeline_showcase=debug",
        _ => "showcase=trace,pipeline_showcase=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Render {
            page,
            out,
            data,
            flow,
        } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_render(&config, &page, out.as_deref(), data.as_deref(), flow.into()).await
        }
        Command::Discover => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_discover(&config).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path.as_deref()).await,
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn build_prober(config: &AppConfig) -> Result<Prober> {
    let settings = GitHubSettings::from(config);
    if settings.token.is_none() {
        info!(
            env = %config.github.token_env,
            "no API token set, using anonymous requests"
        );
    }
    let client = GitHubClient::new(settings)?;
    Ok(Prober::new(client, ProbeConfig::from(config)))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_render(
    config: &AppConfig,
    page_path: &Path,
    out: Option<&Path>,
    data: Option<&str>,
    flows: Flows,
) -> Result<()> {
    let mut page = Page::load(page_path)?;

    let page_dir = page_path.parent().unwrap_or_else(|| Path::new("."));
    let source = StaticSource::resolve(data.unwrap_or(&config.page.pipelines_data), page_dir);
    let prober = build_prober(config)?;

    info!(page = %page_path.display(), %source, ?flows, "rendering page");

    let reporter = CliProgress::new();
    let report = render_page(&mut page, &config.page, flows, &prober, &source, &reporter).await;
    reporter.finish();

    let target = out.unwrap_or(page_path);
    page.save(target)?;

    println!();
    println!("  Page rendered: {}", target.display());
    println!("  Live flow:     {}", describe(report.live));
    println!("  Static flow:   {}", describe(report.static_data));
    println!();

    Ok(())
}

async fn cmd_discover(config: &AppConfig) -> Result<()> {
    let prober = build_prober(config)?;

    let repos = prober.client().list_repositories().await?;
    if repos.is_empty() {
        return Err(eyre!(
            "organization '{}' has no public repositories",
            config.github.org
        ));
    }

    let reporter = CliProgress::new();
    let pipelines = prober.filter_pipelines(&repos, &reporter).await;
    reporter.finish();

    println!();
    if pipelines.is_empty() {
        println!("  No Snakemake pipelines found in {} repositories.", repos.len());
    } else {
        println!(
            "  Found {} Snakemake pipeline(s) in {} repositories:",
            pipelines.len(),
            repos.len()
        );
        for pipeline in &pipelines {
            println!(
                "  {:<32} {:<24} ⭐ {}",
                pipeline.repo.name,
                pipeline.location,
                pipeline.repo.stargazers_count.unwrap_or(0)
            );
        }
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

fn describe(outcome: Option<FlowOutcome>) -> String {
    match outcome {
        None => "skipped (no container)".to_string(),
        Some(FlowOutcome::Rendered(n)) => format!("{n} card(s)"),
        Some(FlowOutcome::Empty) => "no pipelines".to_string(),
        Some(FlowOutcome::Failed) => "failed to load".to_string(),
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProbeProgress for CliProgress {
    fn checking(&self, current: usize, total: usize, name: &str) {
        self.spinner
            .set_message(format!("Checking [{current}/{total}] {name}"));
    }

    fn found(&self, name: &str, location: &str) {
        self.spinner.println(format!("  ✓ {name} ({location})"));
    }
}
