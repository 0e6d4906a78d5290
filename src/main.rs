use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use scope_grabber::config::{Config, ConfigOverrides};
use scope_grabber::fetcher::HackerOneClient;
use scope_grabber::grabber::{grab_scope, GrabOptions, GrabSummary};
use scope_grabber::output::{render_json, render_summary_table};
use scope_grabber::program::ProgramHandle;
use scope_grabber::workspace::ProgramWorkspace;
use scope_grabber::ScopeError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "Examples:
  scope-grabber -p paypal
  scope-grabber -p paypal -b
  scope-grabber -p paypal -o ~/recon --format json";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "scope-grabber",
    about = "Automating the boring stuff in Bug Bounty.",
    after_help = EXAMPLES
)]
struct Cli {
    /// The program name as it's registered in HackerOne.
    #[arg(short, long, required_unless_present = "init_config")]
    program: Option<ProgramHandle>,
    /// Directory the program folder is created in.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also download the Burp Suite config file of the program.
    #[arg(short = 'b', long = "burp")]
    burp: bool,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Scope export timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Write a config template to the config path and exit.
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        match err.downcast_ref::<ScopeError>() {
            Some(
                scope_err @ (ScopeError::Timeout { .. } | ScopeError::EmptyOrMissingScope { .. }),
            ) => eprintln!("{scope_err}"),
            _ => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    if cli.init_config {
        Config::write_template(&config_path)?;
        println!("Wrote config template to {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        root_dir: cli.output.clone(),
        timeout_secs: cli.timeout,
    });
    debug!("effective config: {config:?}");

    let program = cli
        .program
        .clone()
        .ok_or_else(|| anyhow!("a program name is required (-p)"))?;
    let workspace = ProgramWorkspace::prepare(&config.resolved_root_dir(), &program)
        .context("failed preparing program directory")?;
    let client = HackerOneClient::new(&config.http)?;

    let summary = grab_scope(
        &client,
        &program,
        &workspace,
        GrabOptions {
            include_proxy_config: cli.burp,
        },
    )
    .await?;
    print_summary(&summary, cli.format)
}

fn print_summary(summary: &GrabSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_summary_table(summary)),
        OutputFormat::Json => println!("{}", render_json(summary)?),
    }
    Ok(())
}
