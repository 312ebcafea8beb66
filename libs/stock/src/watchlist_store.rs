use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{StorageError, StoreError},
    storage::{Storage, WATCHLIST_KEY},
    tracked::{TrackedStock, normalize_symbol},
};

/// The tracked stocks, kept in insertion order and written through to
/// [`Storage`] on every change.
///
/// A mutation is applied in memory only after the full list has been
/// persisted, so a failed write leaves both copies as they were.
pub struct WatchlistStore {
    storage: Arc<dyn Storage>,
    key: String,
    entries: Mutex<Vec<TrackedStock>>,
}

impl WatchlistStore {
    /// Load the watchlist saved under the default key.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        Self::load_with_key(storage, WATCHLIST_KEY)
    }

    /// Missing or malformed content yields an empty watchlist. Nothing is
    /// written back until the first mutation.
    pub fn load_with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();

        let entries = match storage.get(&key) {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(key = %key, error = %e, "watchlist: discarding malformed stored watchlist");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "watchlist: storage read failed, starting empty");
                Vec::new()
            }
        };

        info!(key = %key, count = entries.len(), "watchlist: loaded");

        Self {
            storage,
            key,
            entries: Mutex::new(entries),
        }
    }

    /// Add a stock.
    /// Returns true if it was newly added, false if the symbol is already tracked.
    pub fn add(&self, mut stock: TrackedStock) -> Result<bool, StoreError> {
        stock.fill_company_name();
        stock.validate().map_err(StoreError::InvalidEntry)?;

        let mut entries = self.entries.lock();
        if entries.iter().any(|s| s.symbol == stock.symbol) {
            debug!(symbol = %stock.symbol, "watchlist: already tracked");
            return Ok(false);
        }

        let symbol = stock.symbol.clone();
        let mut next = entries.clone();
        next.push(stock);

        self.persist(&next)?;
        *entries = next;

        info!(symbol = %symbol, count = entries.len(), "watchlist: added");
        Ok(true)
    }

    /// Remove a stock by symbol.
    /// Returns true if it existed.
    pub fn remove(&self, symbol: &str) -> Result<bool, StoreError> {
        let Some(symbol) = normalize_symbol(symbol) else {
            return Ok(false);
        };

        let mut entries = self.entries.lock();
        let Some(idx) = entries.iter().position(|s| s.symbol == symbol) else {
            debug!(symbol = %symbol, "watchlist: remove of untracked symbol");
            return Ok(false);
        };

        let mut next = entries.clone();
        next.remove(idx);

        self.persist(&next)?;
        *entries = next;

        info!(symbol = %symbol, count = entries.len(), "watchlist: removed");
        Ok(true)
    }

    /// Overwrite the entry for `stock.symbol` in place, keeping its position.
    /// Returns false without writing if the symbol is not tracked (or the
    /// data is identical).
    pub fn replace(&self, mut stock: TrackedStock) -> Result<bool, StoreError> {
        stock.fill_company_name();
        stock.validate().map_err(StoreError::InvalidEntry)?;

        let mut entries = self.entries.lock();
        let Some(idx) = entries.iter().position(|s| s.symbol == stock.symbol) else {
            debug!(symbol = %stock.symbol, "watchlist: replace of untracked symbol");
            return Ok(false);
        };

        if entries[idx] == stock {
            return Ok(false);
        }

        let mut next = entries.clone();
        next[idx] = stock;

        self.persist(&next)?;
        *entries = next;
        Ok(true)
    }

    /// Current entries, in insertion order.
    pub fn snapshot(&self) -> Vec<TrackedStock> {
        self.entries.lock().clone()
    }

    pub fn symbols(&self) -> Vec<String> {
        self.entries.lock().iter().map(|s| s.symbol.clone()).collect()
    }

    pub fn get(&self, symbol: &str) -> Option<TrackedStock> {
        let symbol = normalize_symbol(symbol)?;
        self.entries
            .lock()
            .iter()
            .find(|s| s.symbol == symbol)
            .cloned()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Total number of tracked stocks
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if there are no tracked stocks
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn persist(&self, entries: &[TrackedStock]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries).map_err(StorageError::Encode)?;
        self.storage.set(&self.key, &raw)
    }
}

fn decode(raw: &str) -> Result<Vec<TrackedStock>, StorageError> {
    let mut entries: Vec<TrackedStock> =
        serde_json::from_str(raw).map_err(|e| StorageError::Decode(e.to_string()))?;

    for entry in entries.iter_mut() {
        entry.fill_company_name();
    }

    for (i, entry) in entries.iter().enumerate() {
        entry.validate().map_err(StorageError::Decode)?;

        if entries[..i].iter().any(|s| s.symbol == entry.symbol) {
            return Err(StorageError::Decode(format!(
                "duplicate symbol {}",
                entry.symbol
            )));
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::storage::MemoryStorage;

    fn stock(symbol: &str, prices: &[f64]) -> TrackedStock {
        let dates = (1..=prices.len())
            .map(|d| format!("2024-03-{d:02}"))
            .collect();
        TrackedStock::from_series(symbol, dates, prices.to_vec(), false)
    }

    /// Counts writes and can be switched to fail them.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        writes: AtomicUsize,
        fail: AtomicBool,
    }

    impl Storage for CountingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn add_single_stock_sets_current_price() {
        let store = WatchlistStore::load(Arc::new(MemoryStorage::new()));

        assert!(store.add(stock("AAPL", &[150.0, 151.2])).unwrap());

        let entries = store.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].current_price, Some(151.2));
    }

    #[test]
    fn duplicate_add_keeps_first_payload_and_skips_write() {
        let storage = Arc::new(CountingStorage::default());
        let store = WatchlistStore::load(storage.clone());

        assert!(store.add(stock("AAPL", &[150.0, 151.2])).unwrap());
        assert!(!store.add(stock("AAPL", &[99.0])).unwrap());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("aapl").unwrap().current_price, Some(151.2));
        assert_eq!(storage.writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_absent_symbol_is_noop() {
        let storage = Arc::new(CountingStorage::default());
        let store = WatchlistStore::load(storage.clone());
        store.add(stock("TSLA", &[200.0])).unwrap();

        assert!(!store.remove("NFLX").unwrap());
        assert!(!store.remove("   ").unwrap());

        assert_eq!(store.symbols(), vec!["TSLA"]);
        assert_eq!(storage.writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_normalizes_symbol() {
        let store = WatchlistStore::load(Arc::new(MemoryStorage::new()));
        store.add(stock("MSFT", &[300.0])).unwrap();

        assert!(store.remove(" msft ").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn add_remove_sequences_track_membership() {
        let store = WatchlistStore::load(Arc::new(MemoryStorage::new()));

        for sym in ["AAPL", "GOOG", "AAPL", "AMZN", "GOOG"] {
            store.add(stock(sym, &[1.0])).unwrap();
        }
        store.remove("GOOG").unwrap();
        store.remove("GOOG").unwrap();
        store.add(stock("NVDA", &[1.0])).unwrap();
        store.add(stock("GOOG", &[2.0])).unwrap();

        assert_eq!(store.symbols(), vec!["AAPL", "AMZN", "NVDA", "GOOG"]);
    }

    #[test]
    fn failed_write_leaves_watchlist_unchanged() {
        let storage = Arc::new(CountingStorage::default());
        let store = WatchlistStore::load(storage.clone());
        store.add(stock("AAPL", &[1.0])).unwrap();

        storage.fail.store(true, Ordering::SeqCst);
        assert!(matches!(
            store.add(stock("META", &[1.0])),
            Err(StoreError::Storage(_))
        ));
        assert!(store.remove("AAPL").is_err());
        storage.fail.store(false, Ordering::SeqCst);

        assert_eq!(store.symbols(), vec!["AAPL"]);

        let reloaded = WatchlistStore::load(storage.clone());
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn load_of_empty_storage_does_not_write() {
        let storage = Arc::new(CountingStorage::default());
        let store = WatchlistStore::load(storage.clone());

        assert!(store.is_empty());
        assert_eq!(storage.writes.load(Ordering::SeqCst), 0);
        assert_eq!(storage.get(WATCHLIST_KEY).unwrap(), None);
    }

    #[test]
    fn load_of_corrupted_content_is_empty() {
        let storage = Arc::new(MemoryStorage::new());

        for raw in ["{not json", "null", "{\"symbol\":\"AAPL\"}", "[{\"symbol\":1}]"] {
            storage.set(WATCHLIST_KEY, raw).unwrap();
            assert!(WatchlistStore::load(storage.clone()).is_empty(), "{raw}");
        }
    }

    #[test]
    fn load_rejects_content_breaking_invariants() {
        let storage = Arc::new(MemoryStorage::new());
        let dup = vec![stock("AAPL", &[1.0]), stock("AAPL", &[2.0])];
        storage
            .set(WATCHLIST_KEY, &serde_json::to_string(&dup).unwrap())
            .unwrap();

        assert!(WatchlistStore::load(storage.clone()).is_empty());

        let mut bad = stock("AAPL", &[1.0]);
        bad.dates.push("2024-03-02".to_string());
        storage
            .set(WATCHLIST_KEY, &serde_json::to_string(&[bad]).unwrap())
            .unwrap();

        assert!(WatchlistStore::load(storage).is_empty());
    }

    #[test]
    fn reload_preserves_order_and_fields() {
        let storage = Arc::new(MemoryStorage::new());
        let store = WatchlistStore::load(storage.clone());

        let mut holiday = stock("BABA", &[80.5, 81.0]);
        holiday.is_holiday = true;
        store.add(stock("WMT", &[60.0, 61.5, 62.25])).unwrap();
        store.add(holiday).unwrap();
        store.add(stock("BA", &[]).with_company_name("Boeing")).unwrap();

        let reloaded = WatchlistStore::load(storage);
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn replace_updates_in_place_only_when_tracked() {
        let store = WatchlistStore::load(Arc::new(MemoryStorage::new()));
        store.add(stock("AAPL", &[1.0])).unwrap();
        store.add(stock("GOOG", &[1.0])).unwrap();

        assert!(store.replace(stock("AAPL", &[1.0, 2.0])).unwrap());
        assert!(!store.replace(stock("AAPL", &[1.0, 2.0])).unwrap());
        assert!(!store.replace(stock("TSLA", &[5.0])).unwrap());

        assert_eq!(store.symbols(), vec!["AAPL", "GOOG"]);
        assert_eq!(store.get("AAPL").unwrap().current_price, Some(2.0));
    }

    #[test]
    fn nan_current_price_is_rejected_and_not_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let store = WatchlistStore::load(storage.clone());
        let mut s = stock("AAPL", &[150.0]);
        s.current_price = Some(f64::NAN);

        assert!(matches!(store.add(s), Err(StoreError::InvalidEntry(_))));
        assert!(store.is_empty());
        assert_eq!(storage.get(WATCHLIST_KEY).unwrap(), None);
    }

    #[test]
    fn entry_without_company_name_loads_with_symbol_label() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                WATCHLIST_KEY,
                r#"[{"symbol":"AAPL","dates":["2024-03-01"],"prices":[150.0],"currentPrice":150.0},
                    {"symbol":"GOOG","companyName":"Alphabet","dates":[],"prices":[]}]"#,
            )
            .unwrap();

        let store = WatchlistStore::load(storage);

        assert_eq!(store.symbols(), vec!["AAPL", "GOOG"]);
        assert_eq!(store.get("AAPL").unwrap().company_name, "AAPL");
        assert_eq!(store.get("GOOG").unwrap().company_name, "Alphabet");
    }

    #[test]
    fn add_rejects_invalid_entry() {
        let store = WatchlistStore::load(Arc::new(MemoryStorage::new()));
        let mut s = stock("AAPL", &[1.0]);
        s.symbol = "aapl".to_string();

        assert!(matches!(store.add(s), Err(StoreError::InvalidEntry(_))));
        assert!(store.is_empty());
    }
}
