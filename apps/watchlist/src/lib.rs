use std::sync::Arc;

use anyhow::Result;
use stock::{
    FileStorage, QuoteClient, Storage, WatchlistController, WatchlistStore,
    auth::{AuthClient, AuthSession},
    prediction_client::PredictionClient,
};

pub mod cli;
pub mod command;
pub mod config;

use config::Config;

pub struct Data {
    pub controller: Arc<WatchlistController>,
    pub store: Arc<WatchlistStore>,
    pub session: AuthSession,
    pub prediction_client: PredictionClient,
    pub config: Config,
}

impl Data {
    /// Build the single store and the clients for this process.
    pub fn new(config: Config) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.data_dir.clone()));

        let store = Arc::new(WatchlistStore::load(Arc::clone(&storage)));
        let quote_client = Arc::new(QuoteClient::new(config.stock_api.clone())?);
        let controller = Arc::new(WatchlistController::new(quote_client, Arc::clone(&store)));

        let session = AuthSession::new(AuthClient::new(config.auth_api.clone())?, storage);
        let prediction_client = PredictionClient::new(config.predict_api.clone())?;

        Ok(Self {
            controller,
            store,
            session,
            prediction_client,
            config,
        })
    }
}

pub type Error = anyhow::Error;
