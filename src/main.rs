//! repo-audit CLI: repository audit reports.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use repo_audit::config::ReportConfig;
use repo_audit::export::ViolationExport;
use repo_audit::input::ReportInput;
use repo_audit::report;

#[derive(Parser)]
#[command(name = "repo-audit", version, about = "Repository audit reports")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the HTML report.
    Report {
        /// Path to the JSON audit input.
        #[arg(long)]
        input: PathBuf,

        /// Report directory (removed and recreated).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Summary page title.
        #[arg(long)]
        title: Option<String>,
    },

    /// Print violations as JSON.
    Violations {
        /// Path to the JSON audit input.
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    match cli.command {
        Commands::Report {
            input,
            output,
            title,
        } => {
            if let Some(output) = output {
                config.output = output;
            }
            if let Some(title) = title {
                config.title = title;
            }
            let input = ReportInput::load(&input)?;
            let outcome = report::generate_report(&input, &config)?;
            let index = &outcome.aggregation.index;
            println!(
                "Wrote {} pages to {} ({} groups, {} artifacts, {} versions)",
                outcome.written.pages,
                config.output.display(),
                index.group_count(),
                index.artifact_count(),
                index.version_count(),
            );
        }

        Commands::Violations { input } => {
            let input = ReportInput::load(&input)?;
            let aggregation = report::aggregate(&input, &config)?;
            let export = ViolationExport::from_aggregation(&aggregation);
            println!("{}", serde_json::to_string_pretty(&export).into_diagnostic()?);
        }
    }

    Ok(())
}
