mod controller;
mod error;
mod quote_client;
mod storage;
mod tracked;
mod watchlist_store;

pub mod auth;
pub mod chart;
pub mod prediction_client;
pub mod suggest;

pub use controller::{AddOutcome, Preview, RefreshReport, SearchTicket, WatchlistController};
pub use error::{AuthError, ControllerError, FetchError, StorageError, StoreError};
pub use quote_client::{QuoteClient, QuoteResponse, QuoteSource};
pub use storage::{AUTH_TOKEN_KEY, EMAIL_KEY, FileStorage, MemoryStorage, Storage, WATCHLIST_KEY};
pub use tracked::{MAX_HISTORY, TrackedStock, normalize_symbol};
pub use watchlist_store::WatchlistStore;
