use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    tracked::{TrackedStock, normalize_symbol},
};

/// Anything that can produce a fresh [`TrackedStock`] for a symbol.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> Result<TrackedStock, FetchError>;
}

#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_api: String,
}

impl QuoteClient {
    pub fn new(base_api: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_api))
    }

    pub fn with_client(client: Client, base_api: impl Into<String>) -> Self {
        Self {
            client,
            base_api: base_api.into(),
        }
    }

    /// Fetch the recent series for `symbol` in a single attempt.
    #[instrument(name = "fetch_quote", skip(self))]
    pub async fn fetch(&self, symbol: &str) -> Result<TrackedStock, FetchError> {
        let symbol =
            normalize_symbol(symbol).ok_or_else(|| FetchError::InvalidSymbol(symbol.to_string()))?;

        let url = format!(
            "{}/api/stocks/{}",
            self.base_api.trim_end_matches('/'),
            symbol
        );

        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                target: symbol,
                status,
            });
        }

        let body: QuoteResponse = res.json().await?;
        debug!(points = body.prices.len(), is_holiday = body.is_holiday, "quote received");

        body.into_tracked(symbol)
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn fetch_quote(&self, symbol: &str) -> Result<TrackedStock, FetchError> {
        self.fetch(symbol).await
    }
}

//
// Match GET /api/stocks/{symbol} JSON
//
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    #[serde(default)]
    pub is_holiday: bool,
}

impl QuoteResponse {
    pub fn into_tracked(self, symbol: String) -> Result<TrackedStock, FetchError> {
        if let Some(p) = self.prices.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(FetchError::Payload(format!("invalid price {p} for {symbol}")));
        }

        Ok(TrackedStock::from_series(
            symbol,
            self.dates,
            self.prices,
            self.is_holiday,
        ))
    }
}
