use std::path::PathBuf;

use anyhow::{Context as _, bail};
use stock::{Preview, chart::render_price_chart};
use tracing::{debug, error, info};

use crate::{Data, Error};

pub async fn graph(data: &Data, symbol: &str, out: Option<PathBuf>) -> Result<(), Error> {
    let symbol = symbol.trim().to_uppercase();
    info!("Received chart command for symbol: {}", symbol);

    let stock = match data.store.get(&symbol) {
        Some(s) => {
            debug!("Using tracked data for {}", symbol);
            s
        }
        None => match data.controller.search(&symbol).await {
            Preview::Loaded(s) => s,
            Preview::Failed { message, .. } => bail!(message),
            other => bail!("no quote for {symbol}: {other:?}"),
        },
    };

    // rasterizing is CPU-bound
    let image_bytes = tokio::task::spawn_blocking(move || render_price_chart(&stock))
        .await?
        .inspect_err(|e| error!("Failed to generate chart for {}: {:?}", symbol, e))?;

    let path = out.unwrap_or_else(|| PathBuf::from(format!("{symbol}_chart.png")));
    std::fs::write(&path, &image_bytes)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(bytes = image_bytes.len(), "chart written");
    println!("Chart saved to {}", path.display());
    Ok(())
}
