use stock::{AddOutcome, Preview};
use tracing::{debug, info, warn};

use crate::{Data, Error};

pub async fn watch(data: &Data, raw_input: &str) -> Result<(), Error> {
    let controller = &data.controller;

    info!("watch: invoked raw_input={}", raw_input);

    let symbols: Vec<String> = raw_input
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        warn!("watch: no valid symbols raw_input={}", raw_input);
        println!("No valid symbols provided.");
        return Ok(());
    }

    let mut added: Vec<String> = Vec::new();
    let mut already: Vec<String> = Vec::new();
    let mut failed: Vec<String> = Vec::new();

    for sym in symbols {
        if data.store.contains(&sym) {
            debug!("watch: already_watched symbol={}", sym);
            already.push(sym);
            continue;
        }

        match controller.search(&sym).await {
            Preview::Loaded(_) => {}
            Preview::Failed { message, .. } => {
                println!("{message}");
                failed.push(sym);
                continue;
            }
            other => {
                warn!("watch: unexpected preview symbol={} preview={:?}", sym, other);
                failed.push(sym);
                continue;
            }
        }

        match controller.confirm_add()? {
            AddOutcome::Added => {
                debug!("watch: added symbol={}", sym);
                added.push(sym);
            }
            AddOutcome::AlreadyTracked => already.push(sym),
        }
    }

    info!(
        "watch: completed added_count={} already_count={} failed_count={}",
        added.len(),
        already.len(),
        failed.len()
    );

    if !added.is_empty() {
        println!("Now watching: {}", added.join(", "));
    }
    if !already.is_empty() {
        println!("Already watching: {}", already.join(", "));
    }
    if !failed.is_empty() {
        println!("Could not add: {}", failed.join(", "));
    }

    Ok(())
}
