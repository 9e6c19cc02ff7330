mod config;
mod report;

use std::path::{Path, PathBuf};

use airtable_client::AirtableClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drive_client::{spreadsheet, Dataset, DriveClient, UploadAction};
use scraping::ai::HuggingFace;
use scraping::{
    Extractor, ExtractorConfig, FetcherConfig, HttpFetcher, NormalizerConfig, Pipeline,
    PipelineConfig, TranslationConfig, Translator,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Coffee data pipeline: Airtable exports and product-page characteristics.
#[derive(Parser)]
#[command(name = "coffee", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pull the Airtable table and upload it to Drive as a spreadsheet
    Upload {
        /// Spreadsheet name in the Drive folder
        #[arg(long, default_value = "airtable_communityt_data.xlsx")]
        filename: String,

        /// Always create a new file instead of replacing one with the same name
        #[arg(long)]
        no_replace: bool,
    },

    /// Scrape a product listing and extract each product's characteristics
    Scrape {
        /// Listing page URL
        listing_url: String,

        /// Write the spreadsheet locally instead of uploading it
        #[arg(long)]
        output: Option<PathBuf>,

        /// Spreadsheet name in the Drive folder
        #[arg(long, default_value = "coffee_characteristics.xlsx")]
        filename: String,

        /// Products processed at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Send the original text to the extractor untranslated
        #[arg(long)]
        no_translate: bool,

        /// Fall back to <body> on pages without a <main> element
        #[arg(long)]
        allow_missing_main: bool,
    },

    /// List the files in the Drive folder
    ListFiles,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,scraping=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(conf_dir = %config.conf_dir.display(), "configuration loaded");

    match cli.command {
        Command::Upload {
            filename,
            no_replace,
        } => run_upload(&config, &filename, !no_replace).await,
        Command::Scrape {
            listing_url,
            output,
            filename,
            concurrency,
            no_translate,
            allow_missing_main,
        } => {
            let pipeline_config = PipelineConfig::default()
                .with_concurrency(concurrency)
                .with_translation(!no_translate)
                .with_normalizer(
                    NormalizerConfig::default().with_require_primary_container(!allow_missing_main),
                );
            let dataset = run_scrape(&config, &listing_url, pipeline_config).await?;
            match output {
                Some(path) => write_local(&dataset, &path).await,
                None => upload(&config, &dataset, &filename, true).await,
            }
        }
        Command::ListFiles => run_list_files(&config).await,
    }
}

async fn run_upload(config: &Config, filename: &str, replace_if_exists: bool) -> Result<()> {
    let airtable = AirtableClient::new(config.airtable()?);
    let records = airtable
        .list_records()
        .await
        .context("Failed to pull Airtable records")?;

    let dataset = Dataset::from_records(records.iter().map(|r| &r.fields));
    info!(
        records = dataset.len(),
        columns = dataset.columns().len(),
        "airtable table pulled"
    );

    upload(config, &dataset, filename, replace_if_exists).await
}

async fn run_scrape(
    config: &Config,
    listing_url: &str,
    pipeline_config: PipelineConfig,
) -> Result<Dataset> {
    let translation = TranslationConfig::default();
    let extraction = ExtractorConfig::default();
    let hf = HuggingFace::new(&config.inference()?).with_models(&translation, &extraction);

    let pipeline = Pipeline::new(
        HttpFetcher::new(FetcherConfig::default())?,
        Translator::with_cl100k(hf.clone())?.with_config(translation),
        Extractor::new(hf).with_config(extraction),
    )
    .with_config(pipeline_config);

    let outcomes = pipeline
        .process_listing(listing_url)
        .await
        .with_context(|| format!("Failed to read listing {}", listing_url))?;

    Ok(report::outcomes_dataset(&outcomes))
}

async fn upload(
    config: &Config,
    dataset: &Dataset,
    filename: &str,
    replace_if_exists: bool,
) -> Result<()> {
    let drive = DriveClient::new(config.drive()?);
    drive
        .authenticate()
        .await
        .context("Drive authentication failed")?;

    let result = drive
        .upload_dataset_xlsx(dataset, filename, replace_if_exists)
        .await
        .with_context(|| format!("Failed to upload {}", filename))?;

    let link = result.file.web_view_link.as_deref().unwrap_or("-");
    match result.action {
        UploadAction::Updated => println!("Updated: {} -> {}", result.file.name, link),
        UploadAction::Created => println!("Uploaded: {} -> {}", result.file.name, link),
    }
    Ok(())
}

async fn write_local(dataset: &Dataset, path: &Path) -> Result<()> {
    let content = spreadsheet::build_xlsx(dataset)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

async fn run_list_files(config: &Config) -> Result<()> {
    let drive = DriveClient::new(config.drive()?);
    drive
        .authenticate()
        .await
        .context("Drive authentication failed")?;

    let files = drive.list_files().await?;
    if files.is_empty() {
        println!("The folder is empty or not accessible.");
    } else {
        println!("{} file(s) found:", files.len());
        for file in files {
            println!(" - {} ({})", file.name, file.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scrape_defaults() {
        let cli = Cli::parse_from(["coffee", "scrape", "https://shop.test/cafes"]);
        match cli.command {
            Command::Scrape {
                concurrency,
                output,
                no_translate,
                ..
            } => {
                assert_eq!(concurrency, 1);
                assert!(output.is_none());
                assert!(!no_translate);
            }
            _ => panic!("expected scrape"),
        }
    }
}
