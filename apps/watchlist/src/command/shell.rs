use std::sync::Arc;

use stock::{AddOutcome, ControllerError, Preview, WatchlistController, suggest::TickerSuggester};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_futures::Instrument;

use crate::{
    Data, Error,
    command::{describe_preview, list, search},
};

const HELP: &str = "\
commands:
  search <SYMBOL>   fetch a quote preview (a newer search replaces an older one)
  preview           show the current preview
  add               add the previewed stock to the watchlist
  dismiss           clear the preview
  remove <SYMBOL>   stop tracking a symbol
  list              show the watchlist
  refresh           re-fetch all tracked quotes
  suggest <PREFIX>  autocomplete a ticker
  quit";

pub async fn shell(data: &Data) -> Result<(), Error> {
    println!("{HELP}");

    let suggester = TickerSuggester::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            continue;
        };
        let arg = parts.next().unwrap_or_default();

        debug!(cmd, arg, "shell: command");

        match cmd {
            "search" | "s" => spawn_search(data, arg),
            "preview" | "p" => println!("{}", describe_preview(&data.controller.preview())),
            "add" | "a" => match data.controller.confirm_add() {
                Ok(AddOutcome::Added) => println!("Added to watchlist."),
                Ok(AddOutcome::AlreadyTracked) => println!("Already watching."),
                Err(ControllerError::NoPreview) => println!("Search for a stock first."),
                Err(e) => {
                    warn!(error = %e, "shell: add failed");
                    println!("{e}");
                }
            },
            "dismiss" | "d" => data.controller.dismiss(),
            "remove" | "rm" => println!("{}", remove_reply(&data.controller, arg)),
            "list" | "ls" => list(data),
            "refresh" => search::refresh(data).await?,
            "suggest" => println!("{}", suggester.suggest(arg).join(" ")),
            "help" | "h" => println!("{HELP}"),
            "quit" | "q" | "exit" => break,
            other => println!("unknown command {other:?}, try help"),
        }
    }

    Ok(())
}

fn remove_reply(controller: &WatchlistController, symbol: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return "usage: remove <SYMBOL>".to_string();
    }

    match controller.remove_by_symbol(&symbol) {
        Ok(true) => format!("{symbol} was deleted."),
        Ok(false) => format!("Not in watchlist: {symbol}"),
        Err(e) => e.to_string(),
    }
}

/// Run the search in the background so the prompt stays usable; the
/// controller drops the result if another search started meanwhile.
fn spawn_search(data: &Data, symbol: &str) {
    if symbol.trim().is_empty() {
        println!("usage: search <SYMBOL>");
        return;
    }

    let controller = Arc::clone(&data.controller);
    let symbol = symbol.trim().to_uppercase();
    let span = tracing::info_span!("shell_search", symbol = %symbol);

    tokio::spawn(
        async move {
            let preview = controller.search(&symbol).await;

            let current = match &preview {
                Preview::Loaded(s) => s.symbol == symbol,
                Preview::Failed { symbol: s, .. } => *s == symbol,
                _ => false,
            };
            if current {
                println!("{}", describe_preview(&preview));
            }
        }
        .instrument(span),
    );
}
