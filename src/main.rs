use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::Parser;
use pdfsift_core::DocumentPipeline;
use pdfsift_extract::PdfExtractor;
use pdfsift_wiki::WikiOracle;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "pdfsift", version, about = "Derive structured metadata from a directory of PDFs")]
struct Cli {
    /// Directory containing the PDF files to process
    input_dir: PathBuf,

    /// Where to write the JSON records (defaults to the input directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = "pdfsift.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    tracing::debug!(?config, "configuration loaded");

    if !cli.input_dir.is_dir() {
        bail!("input directory does not exist: {}", cli.input_dir.display());
    }
    let out_dir = cli.output_dir.unwrap_or_else(|| cli.input_dir.clone());
    std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;

    let mut oracle = WikiOracle::new(Duration::from_secs(config.wiki.timeout_secs));
    if let Some(url) = config.wiki.base_url {
        oracle = oracle.with_base_url(url);
    }
    let pipeline = DocumentPipeline::new(oracle, config.chunking.max_chunk_words)
        .with_top_keywords(config.keywords.top_keywords);
    let extractor = PdfExtractor::default();

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(&cli.input_dir)
        .context("failed to read input directory")?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    inputs.sort();

    if inputs.is_empty() {
        println!("No PDF files found in {}", cli.input_dir.display());
        return Ok(());
    }

    let started = Instant::now();
    let mut written = 0usize;
    let mut skipped = 0usize;

    // One document at a time, one oracle call at a time, respecting the
    // external service's request budget.
    for path in &inputs {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<non-utf8 name>");
        println!("Processing: {name}");

        match pipeline.process(&extractor, path).await {
            Some(record) => {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let out_path = out_dir.join(format!("{stem}_metadata.json"));
                // One whole write per record, no partial output.
                let json =
                    serde_json::to_string_pretty(&record).context("failed to serialize record")?;
                std::fs::write(&out_path, json)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
                println!("Done: {name} -> {}", out_path.display());
                written += 1;
            }
            None => {
                println!("Skipped: {name} (unreadable or no extractable text)");
                skipped += 1;
            }
        }
    }

    println!(
        "Processed {written} document(s), skipped {skipped}, in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
