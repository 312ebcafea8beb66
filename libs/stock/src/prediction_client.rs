use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::FetchError, tracked::normalize_symbol};

#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_api: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictRequest<'a> {
    ticker: &'a str,
    prediction_date: String,
}

//
// Match POST /predict JSON
//
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    pub predicted_price: f64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub graph_path: String,
}

impl Prediction {
    /// The server reports an error percentage; zero means it has none.
    pub fn accuracy_percent(&self) -> Option<f64> {
        (self.accuracy != 0.0).then(|| 100.0 - self.accuracy)
    }
}

impl PredictionClient {
    pub fn new(base_api: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_api: base_api.into(),
        })
    }

    #[instrument(name = "predict", skip(self))]
    pub async fn predict(&self, ticker: &str, date: NaiveDate) -> Result<Prediction, FetchError> {
        let ticker =
            normalize_symbol(ticker).ok_or_else(|| FetchError::InvalidSymbol(ticker.to_string()))?;

        let url = format!("{}/predict", self.base_api.trim_end_matches('/'));
        let body = PredictRequest {
            ticker: &ticker,
            prediction_date: date.format("%Y-%m-%d").to_string(),
        };

        let res = self.client.post(url).json(&body).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                target: ticker,
                status,
            });
        }

        let prediction: Prediction = res.json().await?;
        if !prediction.predicted_price.is_finite() {
            return Err(FetchError::Payload(format!(
                "non-finite predicted price for {ticker}"
            )));
        }

        info!(predicted_price = prediction.predicted_price, "prediction received");
        Ok(prediction)
    }

    /// Absolute URL of the rendered prediction graph.
    pub fn graph_url(&self, prediction: &Prediction) -> String {
        format!(
            "{}/{}",
            self.base_api.trim_end_matches('/'),
            prediction.graph_path.trim_start_matches('/')
        )
    }
}
