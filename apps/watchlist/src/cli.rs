use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Stock watchlist and price predictions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every tracked stock.
    List,

    /// Fetch a quote preview without tracking it.
    Search(SearchArgs),

    /// Fetch a quote and add it to the watchlist.
    Add {
        /// Ticker symbol(s), comma-separated (e.g., TSLA,MSFT)
        symbols: String,
    },

    /// Stop tracking one or more symbols.
    Remove {
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// Re-fetch quotes for every tracked stock.
    Refresh,

    /// Render a price chart to PNG.
    Chart(ChartArgs),

    /// Autocomplete a ticker prefix.
    Suggest { prefix: String },

    /// Ask the prediction service for a future price.
    Predict {
        ticker: String,
        /// Target date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Log in and remember the session.
    Login(CredentialArgs),

    /// Create an account and remember the session.
    Signup(CredentialArgs),

    /// Forget the saved session.
    Logout,

    /// Change the logged-in user's password.
    Password { new_password: String },

    /// Interactive search/add/remove loop on stdin.
    Shell,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub symbol: String,

    /// Add the result to the watchlist.
    #[arg(long)]
    pub add: bool,
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    pub symbol: String,

    /// Output file (defaults to <SYMBOL>_chart.png)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}
