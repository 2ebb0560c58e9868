use crate::api::DashboardApi;
use crate::cache::{CacheEntry, CacheTtls, Resource};
use crate::config::Settings;
use crate::domain::fallback;
use crate::domain::market::{Headline, Lang, MarketSnapshot};
use crate::domain::pick::Pick;
use crate::domain::sections::Sections;
use crate::store::LocalStore;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which data tier a refresh cycle ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTier {
    /// Combined picks+recommendations from the primary endpoint.
    Live,
    /// Bare picks enriched per ticker after the primary endpoint failed.
    LiveDegraded,
    /// The previous successful cycle's data, re-rendered.
    LastRendered,
    /// Persisted cache within TTL.
    Cache,
    /// Hardcoded fallback set.
    Static,
}

impl DataTier {
    pub fn is_live(&self) -> bool {
        matches!(self, DataTier::Live | DataTier::LiveDegraded)
    }
}

/// What used to be page-global mutable state, held explicitly: the last
/// successfully rendered pick list and the language selection.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub last_rendered: Option<Vec<Pick>>,
    pub lang: Lang,
}

#[derive(Debug, Clone)]
pub struct RefreshOptions {
    pub rec_concurrency: usize,
    pub max_items_per_section: usize,
}

impl RefreshOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rec_concurrency: settings.rec_concurrency.max(1),
            max_items_per_section: settings.max_items_per_section.max(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub picks: Vec<Pick>,
    pub sections: Sections,
    pub tier: DataTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedHeadlines {
    lang: Lang,
    items: Vec<Headline>,
}

/// Drives one dashboard's data lifecycle: wake the backend, fetch picks with
/// layered fallback, and keep snapshot/headlines fresh. Every cycle runs
/// IDLE → FETCHING_PRIMARY → (FETCHING_FALLBACK) → one terminal tier; no
/// failure escapes as an error.
pub struct Orchestrator<A> {
    api: A,
    store: LocalStore,
    ttls: CacheTtls,
    opts: RefreshOptions,
    ctx: DashboardContext,
}

impl<A: DashboardApi> Orchestrator<A> {
    pub fn new(api: A, store: LocalStore, settings: &Settings) -> Self {
        let lang = store
            .lang()
            .or_else(|| settings.lang.as_deref().and_then(|s| s.parse().ok()))
            .unwrap_or_default();

        Self {
            api,
            store,
            ttls: CacheTtls::from_settings(settings),
            opts: RefreshOptions::from_settings(settings),
            ctx: DashboardContext {
                last_rendered: None,
                lang,
            },
        }
    }

    pub fn context(&self) -> &DashboardContext {
        &self.ctx
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.ctx.lang = lang;
        self.store.set_lang(lang);
    }

    pub fn favorites(&self) -> BTreeSet<String> {
        self.store.favorites()
    }

    /// Best-effort cold-start ping. Failures only show up at debug level.
    pub async fn wake(&self) {
        if let Err(err) = self.api.warmup().await {
            tracing::debug!(error = %err, "warmup ping failed; ignoring");
        }
    }

    /// One pick refresh cycle. Primary fetch, then bare picks + enrichment,
    /// then last rendered, then cache within TTL, then the static list.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        match self.api.fetch_picks_full().await {
            Ok(picks) => {
                self.commit_picks(&picks);
                return self.outcome(picks, DataTier::Live);
            }
            Err(err) => {
                tracing::warn!(error = %err, "primary picks fetch failed; trying fallback");
            }
        }

        match self.api.fetch_picks().await {
            Ok(picks) => {
                let picks = self.enrich(picks).await;
                self.commit_picks(&picks);
                return self.outcome(picks, DataTier::LiveDegraded);
            }
            Err(err) => {
                tracing::warn!(error = %err, "fallback picks fetch failed; using local data");
            }
        }

        if let Some(picks) = self.ctx.last_rendered.clone() {
            return self.outcome(picks, DataTier::LastRendered);
        }

        if let Some(picks) = self.cached_picks() {
            return self.outcome(picks, DataTier::Cache);
        }

        self.outcome(fallback::fallback_picks(), DataTier::Static)
    }

    /// Fills in missing recommendations with at most `rec_concurrency` calls
    /// in flight. Per-ticker failures leave the pick bare.
    async fn enrich(&self, picks: Vec<Pick>) -> Vec<Pick> {
        let api = &self.api;
        stream::iter(picks.into_iter().map(|mut pick| async move {
            if pick.rec.is_none() {
                match api.fetch_recommendation(&pick.ticker).await {
                    Ok(rec) => pick.rec = Some(rec),
                    Err(err) => {
                        tracing::warn!(
                            ticker = %pick.ticker,
                            error = %err,
                            "recommendation fetch failed; leaving pick bare"
                        );
                    }
                }
            }
            pick
        }))
        .buffered(self.opts.rec_concurrency)
        .collect()
        .await
    }

    /// Market snapshot refresh: live, else cache within TTL, else absent.
    pub async fn refresh_snapshot(&mut self) -> Option<MarketSnapshot> {
        match self.api.fetch_snapshot().await {
            Ok(snapshot) => {
                self.store.set_best_effort(
                    Resource::Snapshot.key(),
                    &CacheEntry::new(&snapshot, Utc::now()),
                );
                Some(snapshot)
            }
            Err(err) => {
                tracing::warn!(error = %err, "snapshot fetch failed; falling back to cache");
                self.cached(Resource::Snapshot)
            }
        }
    }

    /// Headline refresh in the current language: live, else cache within TTL
    /// (same language only), else the static per-language set.
    pub async fn refresh_headlines(&mut self) -> Vec<Headline> {
        let lang = self.ctx.lang;
        match self.api.fetch_headlines(lang).await {
            Ok(items) => {
                let cached = CachedHeadlines {
                    lang,
                    items: items.clone(),
                };
                self.store.set_best_effort(
                    Resource::Headlines.key(),
                    &CacheEntry::new(&cached, Utc::now()),
                );
                items
            }
            Err(err) => {
                tracing::warn!(%lang, error = %err, "headline fetch failed; falling back");
                self.cached::<CachedHeadlines>(Resource::Headlines)
                    .filter(|c| c.lang == lang)
                    .map(|c| c.items)
                    .unwrap_or_else(|| fallback::fallback_headlines(lang))
            }
        }
    }

    fn outcome(&self, picks: Vec<Pick>, tier: DataTier) -> RefreshOutcome {
        let sections = Sections::split(&picks, self.opts.max_items_per_section);
        RefreshOutcome {
            picks,
            sections,
            tier,
        }
    }

    /// Successful fetch: overwrite the last-rendered slot and the persisted
    /// cache in one place.
    fn commit_picks(&mut self, picks: &[Pick]) {
        self.ctx.last_rendered = Some(picks.to_vec());
        self.store.set_best_effort(
            Resource::Picks.key(),
            &CacheEntry::new(picks.to_vec(), Utc::now()),
        );
    }

    fn cached_picks(&self) -> Option<Vec<Pick>> {
        self.cached(Resource::Picks)
    }

    fn cached<T: serde::de::DeserializeOwned>(&self, resource: Resource) -> Option<T> {
        let entry: CacheEntry<T> = self.store.get(resource.key())?;
        let ttl = self.ttls.for_resource(resource);
        let payload = entry.into_fresh_payload(ttl, Utc::now());
        if payload.is_none() {
            tracing::debug!(key = resource.key(), "cache entry expired; ignoring");
        }
        payload
    }
}
