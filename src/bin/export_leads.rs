//! Batch export: fetch leads, run the pipeline and write CSV/JSON files.

use clap::Parser;
use rust_lead_pipeline::cities::CityCatalog;
use rust_lead_pipeline::config::Config;
use rust_lead_pipeline::export::ExportFormat;
use rust_lead_pipeline::pipeline::{LeadPipeline, LeadQuery};
use rust_lead_pipeline::source::RandomUserSource;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "export_leads", about = "Fetch, score and export leads")]
struct Args {
    /// Number of leads to fetch (defaults to FETCH_COUNT)
    #[arg(short, long)]
    count: Option<usize>,

    /// Output formats
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "csv")]
    format: Vec<ExportFormat>,

    /// Output directory (defaults to EXPORT_DIR)
    #[arg(short, long, env = "EXPORT_DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let count = args.count.unwrap_or(config.fetch_count).max(1);
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.export_dir));

    println!("=== Lead Export ===\n");

    let source = RandomUserSource::new(
        config.source_base_url.clone(),
        Arc::new(CityCatalog::default()),
        config.rng_seed,
    )?;
    let pipeline = LeadPipeline::from_config(&config);
    let mut rng = config.rng();

    let leads = pipeline
        .fetch_and_run(&source, count, &LeadQuery::default(), &mut rng)
        .await?;

    let high_potential = leads.iter().filter(|l| l.is_high_potential()).count();
    println!("📥 {} leads processed", leads.len());
    println!("🔥 High Potential: {}", high_potential);

    for format in args.format {
        let path = format.export_to_dir(&leads, &output_dir)?;
        println!("✅ Data exported to {}", path.display());
    }

    Ok(())
}
