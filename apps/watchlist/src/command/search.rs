use anyhow::bail;
use stock::{AddOutcome, Preview};
use tracing::info;

use crate::{Data, Error, command::describe_preview};

pub async fn search(data: &Data, symbol: &str, add: bool) -> Result<(), Error> {
    let preview = data.controller.search(symbol).await;
    println!("{}", describe_preview(&preview));

    if let Preview::Failed { .. } = preview {
        bail!("search failed for {}", symbol.trim().to_uppercase());
    }

    if add {
        match data.controller.confirm_add()? {
            AddOutcome::Added => println!("Added to watchlist."),
            AddOutcome::AlreadyTracked => println!("Already watching."),
        }
    }

    Ok(())
}

pub async fn refresh(data: &Data) -> Result<(), Error> {
    if data.store.is_empty() {
        println!("Your watchlist is empty.");
        return Ok(());
    }

    let report = data.controller.refresh().await;
    info!(
        updated = report.updated.len(),
        failed = report.failed.len(),
        "refresh finished"
    );

    println!(
        "Updated {}, unchanged {}, failed {}.",
        report.updated.len(),
        report.unchanged.len(),
        report.failed.len()
    );
    for (symbol, reason) in &report.failed {
        println!("  {symbol}: {reason}");
    }

    Ok(())
}
