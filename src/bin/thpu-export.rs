//! Exports the THPU white paper to PDF or Word.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use thpu_backend::content::build_whitepaper;
use thpu_backend::export::{ApiClient, DEFAULT_API_URL, ExportFormat};

#[derive(Parser, Debug)]
#[command(name = "thpu-export")]
#[command(about = "Render the THPU white paper as a PDF or Word document")]
#[command(version)]
struct Cli {
    /// Output format
    format: Format,

    /// Output file (defaults to a per-format file name in the current directory)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Base URL of the white paper API
    #[arg(long, env = "THPU_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Render the built-in paper instead of fetching it from the API
    #[arg(long)]
    offline: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// A4 report with colored headings and figures
    Pdf,
    /// Letter-size plain text PDF
    SimplePdf,
    /// Word document with styles and a performance table
    Word,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => ExportFormat::Pdf,
            Format::SimplePdf => ExportFormat::SimplePdf,
            Format::Word => ExportFormat::Word,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "thpu_backend=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = ExportFormat::from(cli.format);
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    let paper = if cli.offline {
        tracing::info!("Using the built-in white paper");
        build_whitepaper()
    } else {
        let client = ApiClient::new(&cli.api_url)?;
        tracing::info!("Fetching white paper data from {}", client.base_url());
        client
            .fetch_whitepaper()
            .await
            .context("Failed to fetch white paper data")?
    };

    let bytes = tokio::task::spawn_blocking(move || format.render(&paper, Utc::now()))
        .await
        .context("Join error while rendering")??;

    tokio::fs::write(&output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Generated {} ({} bytes)", output.display(), bytes.len());
    println!("{}", output.display());

    Ok(())
}
