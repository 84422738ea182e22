use crate::Result;
use companies_house_core::{ApiRequest, ApiResponse, ClientConfig};
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use std::time::Duration;
use url::Url;

/// Sends a request and hands back whatever the server answered.
///
/// Implementations must not treat non-2xx statuses as failures and must not
/// follow redirects; status inspection belongs to the client.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport authenticating with HTTP Basic auth
pub struct HttpTransport {
    client: HttpClient,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.validate()?;

        let mut builder = HttpClient::builder()
            .redirect(Policy::none())
            .user_agent(config.user_agent.clone());

        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        if config.insecure_skip_verify {
            tracing::warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key: config.credentials().map(str::to_string),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append the request path to the base URL path and attach the query.
    fn endpoint(&self, request: &ApiRequest) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), request.path);
        url.set_path(&path);
        url.set_query(None);

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
        }

        url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.endpoint(request);
        tracing::debug!(url = %url, "Sending request");

        let mut builder = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(api_key) = &self.api_key {
            builder = builder.basic_auth(api_key, Some(""));
        }

        let response = builder.send().await?;

        let mut api_response = ApiResponse::new(response.status().as_u16(), String::new());
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                api_response = api_response.with_header(name.as_str(), value);
            }
        }
        api_response.body = response.text().await?;

        tracing::debug!(status = api_response.status, bytes = api_response.body.len(), "Received response");
        Ok(api_response)
    }
}
