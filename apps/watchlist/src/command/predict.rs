use chrono::NaiveDate;
use tracing::info;

use crate::{Data, Error};

pub async fn predict(data: &Data, ticker: &str, date: NaiveDate) -> Result<(), Error> {
    info!("predict: ticker={} date={}", ticker, date);

    let client = &data.prediction_client;
    let prediction = client.predict(ticker, date).await?;

    println!("Stock Prediction for {}", ticker.trim().to_uppercase());
    println!("Predicted value for {}: {:.2}", date.format("%Y-%m-%d"), prediction.predicted_price);
    match prediction.accuracy_percent() {
        Some(a) => println!("Prediction Accuracy: {a:.2}%"),
        None => println!("Prediction Accuracy: N/A"),
    }
    if !prediction.graph_path.is_empty() {
        println!("Prediction Graph: {}", client.graph_url(&prediction));
    }

    Ok(())
}
