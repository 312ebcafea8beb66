pub const DEFAULT_TICKERS: &[&str] = &[
    "AAPL", "GOOG", "AMZN", "TSLA", "MSFT", "NFLX", "META", "BABA", "NVDA", "SPY", "T", "TSM",
    "TWTR", "TXN", "TCEHY", "TLRY", "V", "UBER", "WMT", "BA", "GE", "INTC", "IRCTC.NS",
];

/// Prefix autocomplete over a fixed ticker list.
#[derive(Debug, Clone)]
pub struct TickerSuggester {
    tickers: Vec<String>,
}

impl Default for TickerSuggester {
    fn default() -> Self {
        Self::new(DEFAULT_TICKERS.iter().copied())
    }
}

impl TickerSuggester {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }

    /// Tickers starting with `input`, ignoring case, in list order.
    pub fn suggest(&self, input: &str) -> Vec<&str> {
        let prefix = input.trim().to_uppercase();
        if prefix.is_empty() {
            return Vec::new();
        }

        self.tickers
            .iter()
            .filter(|t| t.to_uppercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}

/// Keyboard highlight over a suggestion list; wraps at both ends.
#[derive(Debug, Clone, Default)]
pub struct SuggestionCursor {
    len: usize,
    index: Option<usize>,
}

impl SuggestionCursor {
    pub fn new(len: usize) -> Self {
        Self { len, index: None }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = Some(match self.index {
            Some(i) if i + 1 < self.len => i + 1,
            _ => 0,
        });
        self.index
    }

    pub fn prev(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = Some(match self.index {
            Some(i) if i > 0 => i - 1,
            _ => self.len - 1,
        });
        self.index
    }

    pub fn selected<'a>(&self, suggestions: &[&'a str]) -> Option<&'a str> {
        self.index.and_then(|i| suggestions.get(i).copied())
    }
}
