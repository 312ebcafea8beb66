mod account;
mod delete;
mod graph;
mod predict;
mod search;
mod shell;
mod watch;

use stock::{Preview, TrackedStock, suggest::TickerSuggester};

use crate::{Data, Error, cli::Commands};

pub async fn run(data: &Data, command: Commands) -> Result<(), Error> {
    match command {
        Commands::List => {
            list(data);
            Ok(())
        }
        Commands::Search(args) => search::search(data, &args.symbol, args.add).await,
        Commands::Add { symbols } => watch::watch(data, &symbols).await,
        Commands::Remove { symbols } => delete::delete(data, &symbols),
        Commands::Refresh => search::refresh(data).await,
        Commands::Chart(args) => graph::graph(data, &args.symbol, args.out).await,
        Commands::Suggest { prefix } => {
            let suggester = TickerSuggester::default();
            let hits = suggester.suggest(&prefix);
            if hits.is_empty() {
                println!("No suggestions for {prefix:?}.");
            } else {
                println!("{}", hits.join("\n"));
            }
            Ok(())
        }
        Commands::Predict { ticker, date } => predict::predict(data, &ticker, date).await,
        Commands::Login(args) => account::login(data, &args.email, &args.password).await,
        Commands::Signup(args) => account::signup(data, &args.email, &args.password).await,
        Commands::Logout => account::logout(data),
        Commands::Password { new_password } => account::password(data, &new_password).await,
        Commands::Shell => shell::shell(data).await,
    }
}

pub(crate) fn list(data: &Data) {
    let entries = data.store.snapshot();
    if entries.is_empty() {
        println!("Your watchlist is empty.");
        return;
    }

    for stock in &entries {
        println!("{}", summary(stock));
    }
}

pub(crate) fn summary(stock: &TrackedStock) -> String {
    let last = stock
        .last_price()
        .map(|p| format!("{p} USD"))
        .unwrap_or_else(|| "-".to_string());

    let range = match (stock.dates.first(), stock.dates.last()) {
        (Some(first), Some(last)) => format!("{first}..{last}"),
        _ => "no history".to_string(),
    };

    format!(
        "{:<10} {:<20} current={:<14} last={:<14} ({} points, {})",
        stock.symbol,
        stock.company_name,
        stock.price_label(),
        last,
        stock.prices.len(),
        range
    )
}

pub(crate) fn describe_preview(preview: &Preview) -> String {
    match preview {
        Preview::Empty => "No preview.".to_string(),
        Preview::Loading { symbol } => format!("Loading {symbol}..."),
        Preview::Loaded(stock) => summary(stock),
        Preview::Failed { message, .. } => message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_shows_market_closed() {
        let mut stock = TrackedStock::from_series(
            "AAPL",
            vec!["2024-01-02".into(), "2024-01-03".into()],
            vec![150.0, 151.2],
            false,
        );
        assert!(summary(&stock).contains("$151.20"));
        assert!(summary(&stock).contains("2024-01-02..2024-01-03"));

        stock.is_holiday = true;
        assert!(summary(&stock).contains("Market Closed"));
    }

    #[test]
    fn failed_preview_shows_message() {
        let preview = Preview::Failed {
            symbol: "X".into(),
            message: "Error fetching X".into(),
        };

        assert_eq!(describe_preview(&preview), "Error fetching X");
        assert_eq!(describe_preview(&Preview::Empty), "No preview.");
    }
}
