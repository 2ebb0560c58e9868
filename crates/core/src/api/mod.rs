pub mod contract;
pub mod error;
pub mod http;
pub mod retry;

pub use error::{FetchError, FetchResult};

use crate::domain::market::{Headline, Lang, MarketSnapshot};
use crate::domain::pick::{Pick, Recommendation};

/// Seam between the orchestrator and the recommendation backend. The HTTP
/// implementation lives in `http`; tests substitute their own.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// Combined picks + recommendations (`GET /picks/full`). Primary source.
    async fn fetch_picks_full(&self) -> FetchResult<Vec<Pick>>;

    /// Bare picks without recommendations (`GET /picks`). Fallback source.
    async fn fetch_picks(&self) -> FetchResult<Vec<Pick>>;

    /// Per-ticker guidance (`GET /recommendation/{ticker}`).
    async fn fetch_recommendation(&self, ticker: &str) -> FetchResult<Recommendation>;

    /// Index/FX levels (`GET /market/snapshot`).
    async fn fetch_snapshot(&self) -> FetchResult<MarketSnapshot>;

    /// Localized headlines (`GET /market/headlines?lang=`).
    async fn fetch_headlines(&self, lang: Lang) -> FetchResult<Vec<Headline>>;

    /// Cold-start ping (`GET /warmup`). Callers ignore failures.
    async fn warmup(&self) -> FetchResult<()>;
}
