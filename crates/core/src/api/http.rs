use crate::api::contract::{self, PickPayload, RecommendationPayload};
use crate::api::error::{FetchError, FetchResult};
use crate::api::retry::{with_retry, RetryPolicy};
use crate::api::DashboardApi;
use crate::config::Settings;
use crate::domain::market::{Headline, Lang, MarketSnapshot};
use crate::domain::pick::{Pick, Recommendation};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::time::Duration;

const ERROR_BODY_MAX: usize = 300;

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    http: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
    warmup_timeout: Duration,
}

impl HttpDashboardApi {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .context("failed to build dashboard http client")?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            policy: RetryPolicy::from_settings(settings),
            warmup_timeout: settings.warmup_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        debug_assert!(path.starts_with('/'));
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> FetchResult<T> {
        let res = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = res.status();
        let text = res.text().await.map_err(FetchError::from_reqwest)?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                body: truncate(&text, ERROR_BODY_MAX),
            });
        }

        serde_json::from_str::<T>(&text).map_err(|err| FetchError::Malformed {
            detail: format!("{path}: {err}"),
        })
    }
}

#[async_trait::async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_picks_full(&self) -> FetchResult<Vec<Pick>> {
        with_retry(&self.policy, "picks_full", || async {
            let payload: Vec<PickPayload> = self.get_json("/picks/full", &[]).await?;
            contract::validate_picks(payload)
        })
        .await
    }

    async fn fetch_picks(&self) -> FetchResult<Vec<Pick>> {
        with_retry(&self.policy, "picks", || async {
            let payload: Vec<PickPayload> = self.get_json("/picks", &[]).await?;
            contract::validate_picks(payload)
        })
        .await
    }

    async fn fetch_recommendation(&self, ticker: &str) -> FetchResult<Recommendation> {
        let path = format!("/recommendation/{ticker}");
        with_retry(&self.policy, "recommendation", || async {
            let payload: RecommendationPayload = self.get_json(&path, &[]).await?;
            Ok(payload.into_recommendation(ticker))
        })
        .await
    }

    async fn fetch_snapshot(&self) -> FetchResult<MarketSnapshot> {
        with_retry(&self.policy, "snapshot", || async {
            let snapshot: MarketSnapshot = self.get_json("/market/snapshot", &[]).await?;
            if snapshot.is_empty() {
                return Err(FetchError::EmptyPayload);
            }
            Ok(snapshot)
        })
        .await
    }

    async fn fetch_headlines(&self, lang: Lang) -> FetchResult<Vec<Headline>> {
        with_retry(&self.policy, "headlines", || async {
            let headlines: Vec<Headline> = self
                .get_json("/market/headlines", &[("lang", lang.as_str())])
                .await?;
            if headlines.is_empty() {
                return Err(FetchError::EmptyPayload);
            }
            Ok(headlines)
        })
        .await
    }

    async fn warmup(&self) -> FetchResult<()> {
        // Single attempt with its own short timeout; the point is only to
        // start the backend spinning up before the first real fetch.
        let res = self
            .http
            .get(self.url("/warmup"))
            .timeout(self.warmup_timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                body: String::new(),
            });
        }
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_with_base(base: &str) -> HttpDashboardApi {
        HttpDashboardApi {
            http: reqwest::Client::new(),
            base_url: base.trim_end_matches('/').to_string(),
            policy: RetryPolicy::none(),
            warmup_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn url_joins_without_double_slash() {
        let api = api_with_base("https://example.test/api/v1/");
        assert_eq!(api.url("/picks"), "https://example.test/api/v1/picks");
        assert_eq!(
            api.url("/recommendation/005930.KS"),
            "https://example.test/api/v1/recommendation/005930.KS"
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 300), "short");
        let t = truncate("가나다라마", 4);
        assert!(t.starts_with('가'));
    }
}
