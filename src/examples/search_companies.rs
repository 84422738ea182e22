//! Company Search Example
//!
//! Pages through company search results.
//!
//! Run with: cargo run --example search_companies -- "marine and general"

use companies_house_rs::{decode, ApiError, Client, ClientConfig, SearchQuery, SearchResults};
use tracing_subscriber::EnvFilter;

const MAX_PAGES: usize = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("companies_house_rs=info")),
        )
        .init();

    let term = std::env::args().nth(1).unwrap_or_else(|| "marine and general".to_string());

    let config = ClientConfig::load("companies_house.json").unwrap_or_else(|_| {
        tracing::warn!("Failed to load companies_house.json, using defaults");
        ClientConfig::default()
    });
    let client = Client::from_config(&config)?;

    let mut query = SearchQuery::new(term.as_str()).items_per_page(20);

    for page in 1..=MAX_PAGES {
        let results: Option<SearchResults> = match client.search_companies(&query, None).await {
            Ok(value) => decode(value)?,
            Err(ApiError::RateLimited { response, .. }) => {
                if let Some(reset) = response.rate_limit().and_then(|r| r.reset) {
                    println!("Rate limited until {}", reset);
                } else {
                    println!("Rate limited");
                }
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let Some(results) = results else { break };

        println!("Page {} ({} total results)", page, results.total_results.unwrap_or(0));
        for item in &results.items {
            println!(
                "   {} {} - {}",
                item.company_number.as_deref().unwrap_or("--------"),
                item.title,
                item.company_status.as_deref().unwrap_or("unknown")
            );
        }

        match results.next_start_index() {
            Some(next) => query = query.start_index(next),
            None => break,
        }
    }

    Ok(())
}
