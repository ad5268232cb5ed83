use anyhow::Context;
use clap::Parser;
use listing_scout::config::Cli;
use listing_scout::sources;
use listing_scout::{Listing, ListingCatalog};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    info!("🏠 Listing Scout");
    info!("================");

    let source = sources::from_location(&cli.source, cli.source_params())?;

    // A failed fetch leaves an empty catalog rather than aborting the run
    let listings = match source.fetch().await {
        Ok(listings) => listings,
        Err(err) => {
            warn!("Could not load listings from {} source: {:#}", source.source_name(), err);
            Vec::new()
        }
    };

    let criteria = cli.criteria();
    info!(
        "Applying {} active filter(s) to {} listings",
        criteria.active_count(),
        listings.len()
    );

    let mut catalog = ListingCatalog::new(listings);
    let total = catalog.len();
    let matches = catalog.filtered(&criteria);

    info!("✅ {} of {} listings match\n", matches.len(), total);

    for (i, listing) in matches.iter().enumerate() {
        print_listing(i + 1, listing);
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&matches)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} listings to {}", matches.len(), path.display());
    }

    Ok(())
}

fn print_listing(rank: usize, listing: &Listing) {
    let title = if listing.title.is_empty() { "(untitled)" } else { listing.title.as_str() };
    match listing.price {
        Some(price) => println!("{}. {} ({:.0})", rank, title, price),
        None => println!("{}. {}", rank, title),
    }

    let place: Vec<&str> = [listing.address.as_str(), listing.zip_code.as_str(), listing.city.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !place.is_empty() {
        println!("   {}", place.join(", "));
    }

    let mut specs = Vec::new();
    if let Some(kind) = &listing.kind {
        specs.push(kind.clone());
    }
    if let Some(surface) = listing.surface {
        specs.push(format!("{surface} m²"));
    }
    specs.push(format!("{} bedrooms", listing.effective_bedrooms()));
    specs.push(format!("{} bathrooms", listing.effective_bathrooms()));
    println!("   {}", specs.join(", "));

    if let Some(status) = listing.status {
        println!("   Status: {}", status);
    }
    if let Some(created_at) = listing.created_at {
        println!("   Listed: {}", created_at.format("%Y-%m-%d"));
    }
    println!("   ID: {}", listing.id);
    println!();
}
