//! Name Availability Example
//!
//! Checks whether an active company already holds a legally equivalent name.
//!
//! Run with: cargo run --example name_availability -- "Acme Widgets Ltd"

use companies_house_rs::{decode, Client, ClientConfig, SearchResults};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "Acme Widgets Ltd".to_string());

    let config = ClientConfig::load("companies_house.json").unwrap_or_else(|_| {
        tracing::warn!("Failed to load companies_house.json, using defaults");
        ClientConfig::default()
    });
    let client = Client::from_config(&config)?;

    let results: Option<SearchResults> = decode(client.search_name_availability(&name).await?)?;
    let matches = results.map(|r| r.items).unwrap_or_default();

    if matches.is_empty() {
        println!("✅ '{}' looks available", name);
    } else {
        println!("❌ '{}' conflicts with {} active companies:", name, matches.len());
        for item in matches {
            println!("   {}", item.title);
        }
    }

    Ok(())
}
