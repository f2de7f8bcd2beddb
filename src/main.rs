use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use tracing::info;

use lead_extractor::{export_leads, ExtractorConfig, Lead, LeadExtractor, XlsxWriter};

#[derive(Parser)]
#[command(name = "lead_extractor", about = "Extract business leads from listing pages")]
struct Cli {
    /// Business category, e.g. "restaurants"
    #[arg(short, long)]
    category: String,

    /// One or more locations; each is searched independently
    #[arg(short, long = "location", required = true)]
    locations: Vec<String>,

    /// Print leads as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write one .xlsx file per location into this directory
    #[arg(short, long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ExtractorConfig::from_env().context("Failed to load LEADS_* configuration")?;
    let extractor = Arc::new(LeadExtractor::new(config));

    // One task per search; results come back in input order.
    let tasks = cli.locations.iter().cloned().map(|location| {
        let extractor = Arc::clone(&extractor);
        let category = cli.category.clone();
        tokio::spawn(async move {
            let leads = extractor.extract_leads(&category, &location).await;
            (location, leads)
        })
    });

    let mut results = Vec::new();
    for joined in join_all(tasks).await {
        results.push(joined.context("Extraction task panicked")?);
    }

    if cli.json {
        let by_location: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(location, leads)| Ok((location.clone(), serde_json::to_value(leads)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&by_location)?);
    } else {
        for (location, leads) in &results {
            print_table(&cli.category, location, leads);
        }
    }

    if let Some(dir) = &cli.export {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let prefix = &extractor.config().export_prefix;
        for (location, leads) in &results {
            let filename = export_leads(leads, prefix, &cli.category, location, dir, &XlsxWriter)
                .with_context(|| format!("Export failed for {}", location))?;
            info!(file = %filename, count = leads.len(), "Export finished");
        }
    }

    Ok(())
}

fn print_table(category: &str, location: &str, leads: &[Lead]) {
    println!("\n{} leads for {} in {}", leads.len(), category, location);
    println!(
        "{:>3} | {:<32} | {:<15} | {:<6} | {:<40}",
        "#", "Name", "Phone", "Rating", "Address"
    );
    println!("{}", "-".repeat(108));
    for (i, lead) in leads.iter().enumerate() {
        println!(
            "{:>3} | {:<32} | {:<15} | {:<6} | {:<40}",
            i + 1,
            truncate(&lead.name, 32),
            truncate(&lead.phone, 15),
            lead.rating.as_deref().unwrap_or("-"),
            truncate(&lead.address, 40)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
