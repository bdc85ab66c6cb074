//! HTTP client for the quote and date services.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;
use crate::storage::EndpointsConfig;

/// Body of `GET /api/quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub id: i64,
    pub quote: String,
}

/// Body of `GET /date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateResponse {
    pub date: String,
}

/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: Client,
    quote_url: Url,
    date_url: Url,
}

impl ContentClient {
    pub fn new(endpoints: &EndpointsConfig) -> Result<Self, FetchError> {
        Ok(Self {
            http: Client::new(),
            quote_url: parse_url(&endpoints.quote_url)?,
            date_url: parse_url(&endpoints.date_url)?,
        })
    }

    pub fn quote_url(&self) -> &Url {
        &self.quote_url
    }

    pub fn date_url(&self) -> &Url {
        &self.date_url
    }

    pub async fn fetch_quote(&self) -> Result<QuoteResponse, FetchError> {
        self.get_json(&self.quote_url).await
    }

    pub async fn fetch_date(&self) -> Result<DateResponse, FetchError> {
        self.get_json(&self.date_url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "fetching");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|source| FetchError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
