use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use invoice_report::config::{AppConfig, Config, LogFormat};
use invoice_report::invoices::{InvoiceDocument, InvoiceTotals};
use invoice_report::reports::{InvoiceRenderer, OutputFormat};
use invoice_report::DocumentRenderer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Pdf,
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => OutputFormat::Pdf,
            Format::Text => OutputFormat::Text,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "invoice-report", version, about = "Render invoice documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON or YAML billing document
    Render {
        /// Input document (.json, .yaml or .yml)
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Output file (stdout by default)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Pdf)]
        format: Format,
    },
    /// Print the computed totals as JSON
    Totals {
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
    },
}

fn init_tracing(app: &AppConfig) {
    // Logs go to stderr, stdout may carry the rendered document
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("invoice_report={}", app.log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => registry.with(fmt::layer().with_writer(io::stderr)).init(),
    }
}

fn load(input: &Path) -> anyhow::Result<InvoiceDocument> {
    InvoiceDocument::from_path(input)
        .with_context(|| format!("Failed to load document {}", input.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    init_tracing(&config.app);

    tracing::debug!(env = %config.app.env, "Configuration loaded");

    match cli.command {
        Command::Render {
            input,
            output,
            format,
        } => {
            let document = load(&input)?;
            let backend = OutputFormat::from(format)
                .backend(&config.report)
                .context("Failed to prepare the output backend")?;
            let renderer = InvoiceRenderer::from_settings(&config.report, backend)
                .context("Failed to prepare the renderer")?;
            let bytes = renderer
                .render(&document)
                .with_context(|| format!("Failed to render {}", input.display()))?;

            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(
                    File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?,
                ),
                None => Box::new(io::stdout()),
            };
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
        Command::Totals { input } => {
            let document = load(&input)?;
            document.validate()?;
            let totals = InvoiceTotals::compute(document.line_items(), document.currency())?;
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
    }

    Ok(())
}
