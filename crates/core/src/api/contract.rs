use crate::api::error::{FetchError, FetchResult};
use crate::domain::pick::{default_currency, Action, Country, Pick, Recommendation};
use serde::Deserialize;

/// Wire shape of a pick as served by `/picks` and `/picks/full`. Everything
/// beyond the ticker is tolerated missing; validation decides what to keep.
#[derive(Debug, Clone, Deserialize)]
pub struct PickPayload {
    pub ticker: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub rec: Option<RecommendationPayload>,
}

/// Wire shape of `/recommendation/{ticker}`. The backend nests the guidance
/// under a `recommendation` key next to the quote fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationPayload {
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub recommendation: Option<GuidancePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuidancePayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub buy_price: Option<f64>,
    #[serde(default)]
    pub sell_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub rationale: Option<String>,
}

impl RecommendationPayload {
    pub fn into_recommendation(self, ticker: &str) -> Recommendation {
        let guidance = self.recommendation.unwrap_or_default();
        Recommendation {
            current_price: self.current_price,
            currency: self
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| default_currency(ticker).to_string()),
            action: guidance
                .action
                .as_deref()
                .map(Action::parse_lenient)
                .unwrap_or(Action::Hold),
            buy_price: guidance.buy_price,
            sell_price: guidance.sell_price,
            stop_loss: guidance.stop_loss,
            rationale: guidance
                .rationale
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

impl PickPayload {
    /// Returns `None` for items the dashboard cannot place (blank ticker or
    /// a country outside the known sections).
    fn into_pick(self) -> Option<Pick> {
        let ticker = self.ticker.trim().to_string();
        if ticker.is_empty() {
            return None;
        }
        let country = Country::parse(self.country.as_deref().unwrap_or(""))?;

        let name = self
            .name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ticker.clone());

        let rec = self.rec.map(|r| r.into_recommendation(&ticker));

        Some(Pick {
            ticker,
            name,
            country,
            score: self.score.unwrap_or(0.0),
            rec,
        })
    }
}

/// Validates a picks payload into domain picks. An empty payload is an error
/// (the orchestrator must fall through to the next tier); unplaceable items
/// are skipped with a warning.
pub fn validate_picks(payload: Vec<PickPayload>) -> FetchResult<Vec<Pick>> {
    if payload.is_empty() {
        return Err(FetchError::EmptyPayload);
    }

    let total = payload.len();
    let picks: Vec<Pick> = payload.into_iter().filter_map(PickPayload::into_pick).collect();

    let skipped = total - picks.len();
    if skipped > 0 {
        tracing::warn!(skipped, total, "dropped unplaceable picks from payload");
    }

    if picks.is_empty() {
        return Err(FetchError::EmptyPayload);
    }
    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_pick_with_nested_recommendation() {
        let v = json!([{
            "ticker": "AAPL",
            "name": "Apple Inc.",
            "country": "US",
            "score": 82.5,
            "rec": {
                "current_price": 231.4,
                "currency": "USD",
                "recommendation": {
                    "action": "BUY",
                    "buy_price": 225.0,
                    "sell_price": 250.0,
                    "stop_loss": 210.0,
                    "rationale": "momentum intact"
                }
            }
        }]);

        let payload: Vec<PickPayload> = serde_json::from_value(v).unwrap();
        let picks = validate_picks(payload).unwrap();
        assert_eq!(picks.len(), 1);

        let rec = picks[0].rec.as_ref().unwrap();
        assert_eq!(rec.action, Action::Buy);
        assert_eq!(rec.buy_price, Some(225.0));
        assert_eq!(rec.currency, "USD");
        assert_eq!(rec.rationale.as_deref(), Some("momentum intact"));
    }

    #[test]
    fn missing_currency_is_inferred_from_ticker() {
        let payload = RecommendationPayload {
            current_price: Some(71000.0),
            currency: None,
            recommendation: None,
        };
        let rec = payload.into_recommendation("005930.KS");
        assert_eq!(rec.currency, "KRW");
        assert_eq!(rec.action, Action::Hold);
    }

    #[test]
    fn skips_unplaceable_items_but_keeps_the_rest() {
        let v = json!([
            {"ticker": "AAPL", "name": "Apple Inc.", "country": "US", "score": 70.0},
            {"ticker": "  ", "name": "Blank", "country": "US"},
            {"ticker": "7203.T", "name": "Toyota", "country": "JP"}
        ]);

        let payload: Vec<PickPayload> = serde_json::from_value(v).unwrap();
        let picks = validate_picks(payload).unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].ticker, "AAPL");
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(matches!(
            validate_picks(Vec::new()),
            Err(FetchError::EmptyPayload)
        ));

        let v = json!([{"ticker": "", "country": "US"}]);
        let payload: Vec<PickPayload> = serde_json::from_value(v).unwrap();
        assert!(matches!(
            validate_picks(payload),
            Err(FetchError::EmptyPayload)
        ));
    }

    #[test]
    fn name_falls_back_to_ticker() {
        let v = json!([{"ticker": "QQQ", "country": "ETF"}]);
        let payload: Vec<PickPayload> = serde_json::from_value(v).unwrap();
        let picks = validate_picks(payload).unwrap();
        assert_eq!(picks[0].name, "QQQ");
        assert_eq!(picks[0].score, 0.0);
        assert!(picks[0].rec.is_none());
    }
}
