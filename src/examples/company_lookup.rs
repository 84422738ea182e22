//! Company Lookup Example
//!
//! Fetches a company profile and its registered office address.
//!
//! Run with: cargo run --example company_lookup -- 00000006
//!
//! The API key is read from `companies_house.json`:
//! `{"api_key": "your-key"}`

use companies_house_rs::{decode, Address, Client, ClientConfig, CompanyProfile};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("companies_house_rs=debug,company_lookup=info")),
        )
        .with_target(false)
        .init();

    let company_number = std::env::args().nth(1).unwrap_or_else(|| "00000006".to_string());

    let config = ClientConfig::load("companies_house.json").unwrap_or_else(|_| {
        tracing::warn!("Failed to load companies_house.json, using defaults");
        ClientConfig::default()
    });
    let client = Client::from_config(&config)?;

    let profile: Option<CompanyProfile> = decode(client.company_profile(&company_number).await?)?;
    let Some(profile) = profile else {
        println!("Company {} not found", company_number);
        return Ok(());
    };

    println!("{} ({})", profile.company_name, profile.company_number);
    if let Some(status) = &profile.company_status {
        println!("   Status: {}", status);
    }
    if let Some(created) = &profile.date_of_creation {
        println!("   Incorporated: {}", created);
    }
    if !profile.sic_codes.is_empty() {
        println!("   SIC codes: {}", profile.sic_codes.join(", "));
    }

    let address: Option<Address> =
        decode(client.registered_office_address(&company_number).await?)?;
    if let Some(address) = address {
        println!("   Registered office: {}", address.single_line());
    }

    Ok(())
}
