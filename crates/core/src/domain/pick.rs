use serde::{Deserialize, Serialize};
use std::fmt;

/// Section a pick belongs to. ETF is treated as its own "country" so the
/// dashboard sections stay disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    US,
    KR,
    ETF,
}

impl Country {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Some(Country::US),
            "KR" => Some(Country::KR),
            "ETF" => Some(Country::ETF),
            _ => None,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Country::US => "US",
            Country::KR => "KR",
            Country::ETF => "ETF",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Lenient parse for wire values. Unknown guidance collapses to HOLD so a
    /// single odd item never poisons a whole payload.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Action::Buy,
            "SELL" => Action::Sell,
            _ => Action::Hold,
        }
    }
}

/// Buy/sell/hold guidance for a single ticker, flattened from the backend's
/// nested recommendation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub current_price: Option<f64>,
    pub currency: String,
    pub action: Action,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub ticker: String,
    pub name: String,
    pub country: Country,
    pub score: f64,
    pub rec: Option<Recommendation>,
}

/// KRX tickers carry a `.KS` suffix and quote in KRW; everything else on the
/// dashboard quotes in USD.
pub fn default_currency(ticker: &str) -> &'static str {
    if ticker.ends_with(".KS") {
        "KRW"
    } else {
        "USD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_country_case_insensitively() {
        assert_eq!(Country::parse("us"), Some(Country::US));
        assert_eq!(Country::parse(" KR "), Some(Country::KR));
        assert_eq!(Country::parse("etf"), Some(Country::ETF));
        assert_eq!(Country::parse("JP"), None);
    }

    #[test]
    fn unknown_action_collapses_to_hold() {
        assert_eq!(Action::parse_lenient("buy"), Action::Buy);
        assert_eq!(Action::parse_lenient("SELL"), Action::Sell);
        assert_eq!(Action::parse_lenient("ACCUMULATE"), Action::Hold);
        assert_eq!(Action::parse_lenient(""), Action::Hold);
    }

    #[test]
    fn currency_follows_ticker_suffix() {
        assert_eq!(default_currency("005930.KS"), "KRW");
        assert_eq!(default_currency("AAPL"), "USD");
        assert_eq!(default_currency("SPY"), "USD");
    }
}
