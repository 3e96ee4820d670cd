//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use coursechef_core::pipeline::{ProgressReporter, RunConfig, RunResult};
use coursechef_core::publisher::LocalPublisher;
use coursechef_shared::{Manifest, StagingPaths, init_config, load_config, validate};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// coursechef — import SCORM course packages into a channel tree.
#[derive(Parser)]
#[command(
    name = "coursechef",
    version,
    about = "Stage SCORM course archives and publish them as a channel tree.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full import pipeline and publish the channel tree.
    Run {
        /// Config file path (defaults to coursechef.toml in the working directory).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check the config and course manifest without touching the network.
    Validate {
        /// Config file path (defaults to coursechef.toml in the working directory).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

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
        0 => "coursechef=info",
        1 => "coursechef=debug",
        _ => "coursechef=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run { config } => cmd_run(config.as_deref()).await,
        Command::Validate { config } => cmd_validate(config.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_run(config_path: Option<&Path>) -> Result<()> {
    let chef = load_config(config_path)?;
    validate(&chef)?;

    let staging = StagingPaths::new(&chef.staging.root);
    let publisher = LocalPublisher::new(staging, env!("CARGO_PKG_VERSION"));

    let run_config = RunConfig {
        chef,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    info!(
        channel = %run_config.chef.channel.title,
        staging = %run_config.chef.staging.root,
        sources = run_config.chef.sources.len(),
        "starting chef run"
    );

    let reporter = CliProgress::new();
    let result = coursechef_core::pipeline::run(&run_config, &publisher, &reporter).await?;

    // Print summary
    println!();
    println!("  Channel tree published!");
    println!("  Courses:    {}", result.courses);
    println!("  Lessons:    {}", result.lessons);
    println!("  Documents:  {}", result.documents);
    println!(
        "  Downloaded: {} (skipped {})",
        result.fetch.downloaded, result.fetch.skipped
    );
    println!(
        "  Unpacked:   {} (skipped {})",
        result.unpack.unpacked, result.unpack.skipped
    );
    println!("  Packaged:   {}", result.packaged);
    println!("  Tree:       {}", result.publish.tree_path.display());
    println!("  Time:       {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_validate(config_path: Option<&Path>) -> Result<()> {
    let chef = load_config(config_path)?;
    validate(&chef)?;

    let staging = StagingPaths::new(&chef.staging.root);
    let manifest = Manifest::load(&staging.manifest())?;

    println!();
    println!("  Configuration and manifest are valid.");
    println!("  Channel:   {}", chef.channel.title);
    println!("  Sources:   {}", chef.sources.len());
    println!("  Courses:   {}", manifest.course_count());
    println!("  Lessons:   {}", manifest.lesson_count());
    println!("  Documents: {}", manifest.document_count());
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let path = init_config(&cwd)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config = load_config(None)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
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
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn lesson_packaged(&self, course: &str, lesson: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Packaging [{current}/{total}] {course} / {lesson}"));
    }

    fn done(&self, _result: &RunResult) {
        self.spinner.finish_and_clear();
    }
}
