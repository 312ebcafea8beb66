use std::{env::var, path::PathBuf};

const DEFAULT_API: &str = "https://stockwisely.onrender.com";
const DEFAULT_AUTH_API: &str = "http://localhost:5000";

#[derive(Clone, Debug)]
pub struct Config {
    pub stock_api: String,
    pub predict_api: String,
    pub auth_api: String,
    pub data_dir: PathBuf,
    pub version: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            stock_api: var("STOCK_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API.to_string()),
            predict_api: var("PREDICT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API.to_string()),
            auth_api: var("AUTH_API_BASE_URL").unwrap_or_else(|_| DEFAULT_AUTH_API.to_string()),
            data_dir: var("WATCHLIST_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".watchlist")),
            version: var("APP_VERSION").unwrap_or_else(|_| "Unknown".to_string()),
        }
    }
}
