use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default page size applied by the API when `items_per_page` is omitted.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

/// Default offset applied by the API when `start_index` is omitted.
pub const DEFAULT_START_INDEX: u32 = 0;

/// A read-only request against the API. Every endpoint is a `GET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path relative to the base URL, always starting with `/`
    pub path: String,
    /// Only the parameters that must be sent, in order
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw HTTP response as handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Header names are stored lower-cased
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parse the body as JSON, `None` if it is not valid JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    pub fn rate_limit(&self) -> Option<RateLimit> {
        RateLimit::from_response(self)
    }
}

/// Rate-limit window reported in the `X-Ratelimit-*` response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub reset: Option<DateTime<Utc>>,
    pub window: Option<String>,
}

impl RateLimit {
    fn from_response(response: &ApiResponse) -> Option<Self> {
        let number = |name: &str| response.header(name).and_then(|v| v.trim().parse::<u32>().ok());

        let rate_limit = Self {
            limit: number("x-ratelimit-limit"),
            remaining: number("x-ratelimit-remain"),
            reset: response
                .header("x-ratelimit-reset")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            window: response.header("x-ratelimit-window").map(str::to_string),
        };

        if rate_limit.limit.is_none()
            && rate_limit.remaining.is_none()
            && rate_limit.reset.is_none()
            && rate_limit.window.is_none()
        {
            return None;
        }

        Some(rate_limit)
    }
}

/// Paging and query term shared by the search endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub items_per_page: u32,
    pub start_index: u32,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            start_index: DEFAULT_START_INDEX,
        }
    }

    pub fn items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn start_index(mut self, start_index: u32) -> Self {
        self.start_index = start_index;
        self
    }

    /// Query pairs to send. Values equal to their default, or empty, are left out.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if !self.q.is_empty() {
            pairs.push(("q".to_string(), self.q.clone()));
        }
        if self.items_per_page != DEFAULT_ITEMS_PER_PAGE {
            pairs.push((
                "items_per_page".to_string(),
                self.items_per_page.to_string(),
            ));
        }
        if self.start_index != DEFAULT_START_INDEX {
            pairs.push(("start_index".to_string(), self.start_index.to_string()));
        }

        pairs
    }
}

/// Filters accepted by `restrictions` on the company search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Restriction {
    ActiveCompanies,
    LegallyEquivalentCompanyName,
}

impl Restriction {
    /// Restrictions that together make up a company name availability search
    pub const NAME_AVAILABILITY: [Restriction; 2] = [
        Restriction::ActiveCompanies,
        Restriction::LegallyEquivalentCompanyName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Restriction::ActiveCompanies => "active-companies",
            Restriction::LegallyEquivalentCompanyName => "legally-equivalent-company-name",
        }
    }

    /// Space-separated token string as sent on the wire
    pub fn join(restrictions: &[Restriction]) -> String {
        restrictions
            .iter()
            .map(Restriction::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Restriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
