use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Current index/FX levels, keyed by display label (e.g. "KOSPI", "S&P 500").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketSnapshot(pub BTreeMap<String, IndexQuote>);

impl MarketSnapshot {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexQuote {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub publisher: Option<String>,
}

/// Headline language selection, persisted across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ko,
    En,
    Ja,
    Zh,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ko => "ko",
            Lang::En => "en",
            Lang::Ja => "ja",
            Lang::Zh => "zh",
        }
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang::Ko
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(Lang::Ko),
            "en" => Ok(Lang::En),
            "ja" => Ok(Lang::Ja),
            "zh" => Ok(Lang::Zh),
            other => anyhow::bail!("unsupported language: {other}"),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_deserializes_label_map() {
        let v = json!({
            "KOSPI": {"price": 2650.1, "change_pct": 0.42},
            "NASDAQ": {"price": 17000.0, "change_pct": -1.1}
        });
        let snap: MarketSnapshot = serde_json::from_value(v).unwrap();
        assert_eq!(snap.len(), 2);
        assert!(snap.0.get("KOSPI").unwrap().change_pct > 0.0);
    }

    #[test]
    fn lang_round_trips() {
        assert_eq!("ja".parse::<Lang>().unwrap(), Lang::Ja);
        assert_eq!(Lang::Zh.as_str(), "zh");
        assert!("fr".parse::<Lang>().is_err());
    }
}
