use std::sync::Arc;

use futures::{StreamExt, stream};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};
use tracing_futures::Instrument;

use crate::{
    error::{ControllerError, FetchError},
    quote_client::QuoteSource,
    tracked::TrackedStock,
    watchlist_store::WatchlistStore,
};

const REFRESH_CONCURRENCY: usize = 8;

/// What the search panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Empty,
    Loading { symbol: String },
    Loaded(TrackedStock),
    Failed { symbol: String, message: String },
}

/// Issued by [`WatchlistController::begin_search`]; its result is only
/// applied while no newer search has started.
#[derive(Debug)]
pub struct SearchTicket {
    generation: u64,
    symbol: String,
}

impl SearchTicket {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyTracked,
}

#[derive(Debug, Default)]
pub struct RefreshReport {
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub failed: Vec<(String, String)>,
}

struct SearchState {
    generation: u64,
    preview: Preview,
}

pub struct WatchlistController {
    quotes: Arc<dyn QuoteSource>,
    store: Arc<WatchlistStore>,
    state: Mutex<SearchState>,
}

impl WatchlistController {
    pub fn new(quotes: Arc<dyn QuoteSource>, store: Arc<WatchlistStore>) -> Self {
        Self {
            quotes,
            store,
            state: Mutex::new(SearchState {
                generation: 0,
                preview: Preview::Empty,
            }),
        }
    }

    pub fn store(&self) -> &Arc<WatchlistStore> {
        &self.store
    }

    pub fn preview(&self) -> Preview {
        self.state.lock().preview.clone()
    }

    pub fn watchlist(&self) -> Vec<TrackedStock> {
        self.store.snapshot()
    }

    /// Start a search, superseding any in flight. Blank input is ignored.
    pub fn begin_search(&self, symbol: &str) -> Option<SearchTicket> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return None;
        }

        let mut state = self.state.lock();
        state.generation += 1;
        state.preview = Preview::Loading {
            symbol: symbol.clone(),
        };

        debug!(generation = state.generation, symbol = %symbol, "search: started");

        Some(SearchTicket {
            generation: state.generation,
            symbol,
        })
    }

    /// Apply a finished fetch. Returns false if the ticket is stale and the
    /// result was discarded.
    pub fn finish_search(
        &self,
        ticket: SearchTicket,
        result: Result<TrackedStock, FetchError>,
    ) -> bool {
        let mut state = self.state.lock();

        if ticket.generation != state.generation {
            debug!(
                generation = ticket.generation,
                current = state.generation,
                symbol = %ticket.symbol,
                "search: discarding stale result"
            );
            return false;
        }

        state.preview = match result {
            Ok(stock) => {
                info!(symbol = %stock.symbol, points = stock.prices.len(), "search: loaded");
                Preview::Loaded(stock)
            }
            Err(e) => {
                warn!(symbol = %ticket.symbol, error = %e, "search: failed");
                Preview::Failed {
                    message: format!("Error fetching {}: {e}", ticket.symbol),
                    symbol: ticket.symbol,
                }
            }
        };

        true
    }

    /// Fetch a quote into the preview slot and return the slot's state
    /// afterwards. A newer search started meanwhile wins.
    #[instrument(name = "search", skip(self))]
    pub async fn search(&self, symbol: &str) -> Preview {
        let Some(ticket) = self.begin_search(symbol) else {
            return self.preview();
        };

        let result = self.quotes.fetch_quote(&ticket.symbol).await;
        self.finish_search(ticket, result);

        self.preview()
    }

    /// Back to `Empty`; results of searches in flight are dropped.
    pub fn dismiss(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.preview = Preview::Empty;
    }

    /// Add the loaded preview to the watchlist.
    pub fn confirm_add(&self) -> Result<AddOutcome, ControllerError> {
        let stock = match self.preview() {
            Preview::Loaded(stock) => stock,
            _ => return Err(ControllerError::NoPreview),
        };

        if self.store.add(stock)? {
            Ok(AddOutcome::Added)
        } else {
            Ok(AddOutcome::AlreadyTracked)
        }
    }

    pub fn remove_by_symbol(&self, symbol: &str) -> Result<bool, ControllerError> {
        Ok(self.store.remove(symbol)?)
    }

    /// Re-fetch every tracked symbol. Failures keep the cached entry.
    #[instrument(name = "refresh", skip(self))]
    pub async fn refresh(&self) -> RefreshReport {
        let symbols = self.store.symbols();
        info!(total_symbols = symbols.len(), "refresh: started");

        let mut tasks = stream::iter(symbols)
            .map(|symbol| {
                let quotes = Arc::clone(&self.quotes);
                let span = tracing::info_span!("refresh_symbol", symbol = %symbol);

                async move {
                    let res = quotes.fetch_quote(&symbol).await;
                    (symbol, res)
                }
                .instrument(span)
            })
            .buffer_unordered(REFRESH_CONCURRENCY);

        let mut report = RefreshReport::default();

        while let Some((symbol, res)) = tasks.next().await {
            let stock = match res {
                Ok(stock) => stock,
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "refresh: fetch failed");
                    report.failed.push((symbol, e.to_string()));
                    continue;
                }
            };

            // keep the user's label across refreshes
            let stock = match self.store.get(&symbol) {
                Some(old) => stock.with_company_name(old.company_name),
                None => stock,
            };

            match self.store.replace(stock) {
                Ok(true) => report.updated.push(symbol),
                Ok(false) => report.unchanged.push(symbol),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "refresh: store update failed");
                    report.failed.push((symbol, e.to_string()));
                }
            }
        }

        info!(
            updated = report.updated.len(),
            unchanged = report.unchanged.len(),
            failed = report.failed.len(),
            "refresh: completed"
        );

        report
    }
}
