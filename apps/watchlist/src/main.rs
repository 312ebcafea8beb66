use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use watchlist::{Data, cli::Cli, command, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    debug!(
        version = %config.version,
        data_dir = %config.data_dir.display(),
        "starting"
    );

    let data = Data::new(config)?;

    if let Err(e) = command::run(&data, cli.command).await {
        error!(error = ?e, "command failed");
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}
