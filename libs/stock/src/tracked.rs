use serde::{Deserialize, Serialize};

/// Number of most recent date/price pairs kept per entry.
pub const MAX_HISTORY: usize = 30;

/// Trim and uppercase a ticker symbol.
/// Returns `None` for blank input or characters that never appear in a ticker.
pub fn normalize_symbol(symbol: &str) -> Option<String> {
    let symbol = symbol.trim().to_uppercase();

    if symbol.is_empty() {
        return None;
    }

    let valid = symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    valid.then_some(symbol)
}

/// One watchlist entry with its cached recent price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedStock {
    pub symbol: String,
    #[serde(default)]
    pub company_name: String,
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub is_holiday: bool,
}

impl TrackedStock {
    /// Build an entry from a raw date/price series.
    ///
    /// The series are aligned to the shorter of the two and cut down to the
    /// [`MAX_HISTORY`] most recent pairs.
    pub fn from_series(
        symbol: impl Into<String>,
        mut dates: Vec<String>,
        mut prices: Vec<f64>,
        is_holiday: bool,
    ) -> Self {
        let symbol = symbol.into();

        let len = dates.len().min(prices.len());
        dates.truncate(len);
        prices.truncate(len);

        let start = len.saturating_sub(MAX_HISTORY);
        let dates = dates.split_off(start);
        let prices = prices.split_off(start);

        Self {
            company_name: symbol.clone(),
            symbol,
            current_price: prices.last().copied(),
            dates,
            prices,
            is_holiday,
        }
    }

    /// Label falls back to the symbol when none was resolved.
    pub fn fill_company_name(&mut self) {
        if self.company_name.trim().is_empty() {
            self.company_name = self.symbol.clone();
        }
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    /// Text shown in place of the current price.
    pub fn price_label(&self) -> String {
        if self.is_holiday {
            return "Market Closed".to_string();
        }

        match self.current_price {
            Some(p) if p.is_finite() => format!("${p:.2}"),
            _ => "N/A".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match normalize_symbol(&self.symbol) {
            Some(s) if s == self.symbol => {}
            _ => return Err(format!("symbol {:?} is not normalized", self.symbol)),
        }

        if self.dates.len() != self.prices.len() {
            return Err(format!(
                "{}: length mismatch dates={} prices={}",
                self.symbol,
                self.dates.len(),
                self.prices.len()
            ));
        }

        if self.prices.len() > MAX_HISTORY {
            return Err(format!(
                "{}: {} points exceeds {}",
                self.symbol,
                self.prices.len(),
                MAX_HISTORY
            ));
        }

        if let Some(p) = self.prices.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(format!("{}: invalid price {}", self.symbol, p));
        }

        // when present, mirrors the last price
        if let Some(p) = self.current_price {
            if !p.is_finite() || p < 0.0 {
                return Err(format!("{}: invalid current price {}", self.symbol, p));
            }
            if self.last_price() != Some(p) {
                return Err(format!(
                    "{}: current price {} does not match last price {:?}",
                    self.symbol,
                    p,
                    self.last_price()
                ));
            }
        }

        Ok(())
    }
}
