use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use conventional_gate::cli::{run_gate, CommitRange};
use conventional_gate::config::{self, ClassificationConfig};
use conventional_gate::git::Git2Repository;
use conventional_gate::output::{ConsoleSink, GithubOutput, ReportFile, Sinks};
use conventional_gate::ui;

#[derive(clap::Parser)]
#[command(
    name = "conventional-gate",
    version,
    about = "Check that a change follows Conventional Commits and compute the next release version"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Path to the git repository")]
    repo: String,

    #[arg(short, long, help = "Base revision of the change (excluded)")]
    base: String,

    #[arg(long, default_value = "HEAD", help = "Head revision of the change")]
    head: String,

    #[arg(short, long, help = "Pull request title to validate")]
    title: Option<String>,

    #[arg(long, help = "Markdown file receiving the reports")]
    report_file: Option<String>,

    #[arg(long, help = "File receiving `version=<next>` (defaults to $GITHUB_OUTPUT)")]
    github_output: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => ui::display_success("Conventional commits check passed"),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

/// Returns whether the gate passed; errors are fatal configuration or repository problems
fn run(args: Args) -> Result<bool> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let classification = ClassificationConfig::from_config(&config)?;

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Cannot open git repository at '{}'", args.repo))?;

    let mut sinks = Sinks::new();
    sinks.push(ConsoleSink);
    if let Some(path) = &args.report_file {
        sinks.push(ReportFile::new(path));
    }
    match args.github_output.as_deref() {
        Some(path) => sinks.push(GithubOutput::new(path)),
        None => {
            if let Some(out) = GithubOutput::from_env() {
                sinks.push(out);
            }
        }
    }

    ui::display_status(&format!("Checking {}..{}", args.base, args.head));
    let range = CommitRange::new(args.base, args.head);
    let gate = run_gate(
        &repo,
        &range,
        args.title.as_deref(),
        &classification,
        &mut sinks,
    )?;

    if let Err(e) = gate.verdict() {
        ui::display_error(&e.to_string());
        return Ok(false);
    }
    for failure in gate
        .title
        .iter()
        .chain(std::iter::once(&gate.commits))
        .filter_map(|r| r.as_ref().err())
    {
        ui::display_warning(&failure.to_string());
    }
    Ok(true)
}
