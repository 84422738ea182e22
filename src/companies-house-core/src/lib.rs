//! Companies House Core Library
//!
//! Plain data shared by the API client:
//! - Client configuration and base URL validation
//! - Request, response and search parameter values
//! - The error-code message table
//! - Typed resource models

pub mod config;
pub mod messages;
pub mod models;
pub mod resources;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use models::*;
pub use resources::{decode, Address, CompanyProfile, SearchItem, SearchResults};
