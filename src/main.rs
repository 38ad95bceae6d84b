use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use product_scraper::output::TableFormat;
use product_scraper::{pipeline, Settings};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "product_scraper",
    version,
    about = "Save a product page's spec tables, image and datasheet to a folder"
)]
struct Cli {
    /// Product page to scrape
    #[arg(short, long)]
    url: Option<String>,

    /// Destination folder (created if absent)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// CSS selector of the product image
    #[arg(long)]
    image_selector: Option<String>,

    /// Datasheet to download; pass "" to skip it
    #[arg(long)]
    datasheet_url: Option<String>,

    /// Encoding of the extracted table rows
    #[arg(short, long, value_enum)]
    format: Option<TableFormat>,

    /// Settings file (default: ./product_scraper.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply(self, settings: &mut Settings) {
        if let Some(url) = self.url {
            settings.page_url = url;
        }
        if let Some(out) = self.out {
            settings.output_dir = out;
        }
        if let Some(selector) = self.image_selector {
            settings.image_selector = selector;
        }
        if let Some(url) = self.datasheet_url {
            settings.datasheet_url = url;
        }
        if let Some(format) = self.format {
            settings.table_format = format;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    info!(settings = ?settings, "Starting product scraper");

    let report = pipeline::run(&settings).await?;
    report.print();

    println!("\nDone in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
