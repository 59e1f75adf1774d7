mod config;

use std::fmt::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_extraction::{
    DateWindow, LeadError, LeadPipeline, LeadReport, OpenAIGenerator, OutputFormat,
    SerpApiSearcher,
};

use crate::config::Config;

/// Find companies announcing investment or expansion plans in a sector.
#[derive(Parser, Debug)]
#[command(name = "lead-finder", version, about)]
struct Cli {
    /// Industry sector to search, e.g. "Automobile" or "Renewable Energy"
    sector: String,

    /// Start of the news window (YYYY-MM-DD). Defaults to 60 days before --to.
    #[arg(long, value_name = "YYYY-MM-DD")]
    from: Option<NaiveDate>,

    /// End of the news window (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    to: Option<NaiveDate>,

    /// Directory the CSV export is written to
    #[arg(long, short, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Reply format requested from the model
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Skip writing the CSV file
    #[arg(long)]
    no_csv: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    Pipe,
    Table,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Pipe => OutputFormat::PipeDelimited,
            FormatArg::Table => OutputFormat::MarkdownTable,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lead_extraction=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Lead search failed");
            eprintln!("{} {err:#}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let credentials = config.credentials.clone();

    if credentials.model_api_key.is_blank() {
        return Err(LeadError::authentication(
            "no language model key configured",
            "OPENAI_API_KEY",
        ))
        .context("Cannot start lead search");
    }

    let mut pipeline_config = config.pipeline();
    pipeline_config.extraction.output_format = cli.format.into();

    let searcher = SerpApiSearcher::new(credentials.search_api_key, pipeline_config.search.clone());
    let mut generator =
        OpenAIGenerator::from_config(credentials.model_api_key, &pipeline_config.extraction);
    if let Some(base_url) = &config.openai_base_url {
        generator = generator.with_base_url(base_url);
    }

    let window = DateWindow {
        from: cli.from,
        to: cli.to,
    };

    tracing::info!(sector = %cli.sector, model = generator.model(), "Starting lead-finder");

    let pipeline = LeadPipeline::new(searcher, generator, pipeline_config);
    let report = pipeline
        .run(&cli.sector, window)
        .await
        .with_context(|| format!("Lead search for '{}' failed", cli.sector.trim()))?;

    print!("{}", render_report(&report));

    if !cli.no_csv {
        let path = report
            .write_csv(&cli.output)
            .with_context(|| format!("Failed to write CSV to {}", cli.output.display()))?;
        println!();
        println!("{} {}", "CSV written to".bright_blue(), path.display());
    }

    Ok(())
}

/// Operator-facing summary of a run.
fn render_report(report: &LeadReport) -> String {
    let mut out = String::new();
    // Writing to a String never fails
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &LeadReport) -> fmt::Result {
    let heading = format!(
        "Investment leads: {} ({} to {})",
        report.sector(),
        report.date_from(),
        report.date_to()
    );
    writeln!(out, "{}", heading.bright_cyan().bold())?;
    writeln!(out)?;

    if report.is_empty() {
        writeln!(out, "{}", "No relevant leads found.".yellow())?;
    } else {
        for (i, lead) in report.leads().iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, lead.company_name.bold())?;
            writeln!(out, "   {}", lead.investment_summary)?;
            writeln!(out, "   {}", lead.source_url.dimmed())?;
        }
    }

    let dropped = report.dropped();
    writeln!(out)?;
    writeln!(
        out,
        "{} of {} results kept ({} irrelevant, {} unparseable, {} rate limited, {} failed)",
        report.total_accepted(),
        report.total_considered(),
        dropped.irrelevant,
        dropped.parse_failed,
        dropped.exhausted,
        dropped.failed
    )
}
