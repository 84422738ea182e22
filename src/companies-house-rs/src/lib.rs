//! Companies House Client Library
//!
//! HTTP client for the Companies House public data REST API.
//!
//! ```rust,no_run
//! use companies_house_rs::{Client, SearchQuery};
//!
//! # async fn run() -> companies_house_rs::Result<()> {
//! let client = Client::new("my-api-key")?;
//!
//! if let Some(profile) = client.company_profile("00000006").await? {
//!     println!("{}", profile["company_name"]);
//! }
//!
//! let results = client.search_companies(&SearchQuery::new("acme"), None).await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod response;
pub mod transport;

pub use client::Client;
pub use companies_house_core::{
    messages, Address, ApiRequest, ApiResponse, ClientConfig, CompanyProfile,
    ConfigError, RateLimit, Restriction, SearchItem, SearchQuery, SearchResults,
    DEFAULT_BASE_URL,
};
pub use response::decode;
pub use transport::{HttpTransport, Transport};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Unauthorised {
        message: String,
        response: Box<ApiResponse>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        response: Box<ApiResponse>,
    },

    #[error("{message}")]
    RateLimited {
        message: String,
        response: Box<ApiResponse>,
    },

    /// Any other non-success status
    #[error("{message}")]
    Api {
        message: String,
        response: Box<ApiResponse>,
    },

    #[error("Malformed JSON response from server (status {})", .response.status)]
    MalformedResponse { response: Box<ApiResponse> },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful body did not match the requested typed resource
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// The response that caused this error, if one was received.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            ApiError::Unauthorised { response, .. }
            | ApiError::NotFound { response, .. }
            | ApiError::RateLimited { response, .. }
            | ApiError::Api { response, .. }
            | ApiError::MalformedResponse { response } => Some(&**response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }

    /// Rate-limit headers of the failed response, mostly useful on `RateLimited`.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.response().and_then(ApiResponse::rate_limit)
    }

    /// The decoded error body, if it was JSON.
    pub fn body(&self) -> Option<serde_json::Value> {
        self.response().and_then(ApiResponse::json)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
