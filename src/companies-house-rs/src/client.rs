use crate::response::handle_response;
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use companies_house_core::{ApiRequest, ClientConfig, Restriction, SearchQuery};
use serde_json::Value;

/// Companies House REST API Client
///
/// Every method issues exactly one `GET` and returns the decoded JSON body,
/// `None` when the resource does not exist, or an [`ApiError`](crate::ApiError).
pub struct Client {
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client for the public API endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::new(api_key))
    }

    /// Create a client for a custom endpoint, failing if `base_url` is not a valid URL
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::new(api_key).with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        tracing::debug!(base_url = %transport.base_url(), "Client created");
        Ok(Self::with_transport(transport))
    }

    /// Use a custom transport, e.g. one shared with other clients or a test double
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Registered office address of a company
    #[tracing::instrument(skip(self))]
    pub async fn registered_office_address(&self, company_number: &str) -> Result<Option<Value>> {
        self.get(ApiRequest::new(format!(
            "/company/{}/registered-office-address",
            company_number
        )))
        .await
    }

    /// Company profile
    #[tracing::instrument(skip(self))]
    pub async fn company_profile(&self, company_number: &str) -> Result<Option<Value>> {
        self.get(ApiRequest::new(format!("/company/{}", company_number)))
            .await
    }

    /// Search across companies, officers and disqualified officers
    #[tracing::instrument(skip(self))]
    pub async fn search_all(&self, query: &SearchQuery) -> Result<Option<Value>> {
        self.get(ApiRequest::new("/search").with_query(query.to_query_pairs()))
            .await
    }

    /// Search companies
    ///
    /// `restrictions` is a space-separated list of filters, see [`Restriction`].
    #[tracing::instrument(skip(self))]
    pub async fn search_companies(
        &self,
        query: &SearchQuery,
        restrictions: Option<&str>,
    ) -> Result<Option<Value>> {
        let mut pairs = query.to_query_pairs();
        if let Some(restrictions) = restrictions.map(str::trim).filter(|r| !r.is_empty()) {
            pairs.push(("restrictions".to_string(), restrictions.to_string()));
        }

        self.get(ApiRequest::new("/search/companies").with_query(pairs))
            .await
    }

    /// Company name availability: active companies with a legally equivalent name
    pub async fn search_name_availability(&self, name: &str) -> Result<Option<Value>> {
        let restrictions = Restriction::join(&Restriction::NAME_AVAILABILITY);
        self.search_companies(&SearchQuery::new(name), Some(&restrictions))
            .await
    }

    async fn get(&self, request: ApiRequest) -> Result<Option<Value>> {
        tracing::debug!(path = %request.path, query = ?request.query, "GET");

        let response = self.transport.send(&request).await?;
        let status = response.status;

        match handle_response(response) {
            Ok(None) => {
                tracing::debug!(path = %request.path, "Resource not found");
                Ok(None)
            }
            Ok(body) => Ok(body),
            Err(e) => {
                tracing::warn!(path = %request.path, status, "Request failed: {}", e);
                Err(e)
            }
        }
    }
}
