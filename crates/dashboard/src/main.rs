use anyhow::Context;
use clap::Parser;
use kobot_core::api::http::HttpDashboardApi;
use kobot_core::api::DashboardApi;
use kobot_core::config::Settings;
use kobot_core::domain::market::Lang;
use kobot_core::orchestrator::Orchestrator;
use kobot_core::store::LocalStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "kobot_dashboard")]
struct Args {
    /// Run a single refresh of every resource, then exit.
    #[arg(long)]
    once: bool,

    /// Headline language (ko, en, ja, zh). Overrides the stored selection.
    #[arg(long)]
    lang: Option<Lang>,

    /// Data directory for favorites and cache (default: .kobot or KOBOT_DATA_DIR).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Skip the warmup ping before the first refresh.
    #[arg(long)]
    skip_wake: bool,

    /// Toggle a ticker in the persisted favorites set, then exit.
    #[arg(long, value_name = "TICKER")]
    toggle_favorite: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env();
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }

    let store = match LocalStore::open(&settings.data_dir) {
        Ok(store) => store,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            return Err(err).context("failed to open local data dir");
        }
    };

    if let Some(ticker) = args.toggle_favorite {
        let on = store.toggle_favorite(&ticker)?;
        tracing::info!(%ticker, favorite = on, "favorites updated");
        return Ok(());
    }

    let api = HttpDashboardApi::from_settings(&settings)?;
    let mut orch = Orchestrator::new(api, store, &settings);
    if let Some(lang) = args.lang {
        orch.set_lang(lang);
    }

    if !args.skip_wake {
        orch.wake().await;
    }

    refresh_picks(&mut orch).await;
    refresh_snapshot(&mut orch).await;
    refresh_headlines(&mut orch).await;

    if args.once {
        return Ok(());
    }

    let mut picks_tick = tokio::time::interval(settings.picks_refresh);
    let mut snapshot_tick = tokio::time::interval(settings.snapshot_refresh);
    let mut headlines_tick = tokio::time::interval(settings.headlines_refresh);
    // The first tick of each interval fires immediately; the initial refresh
    // above already covered it.
    picks_tick.tick().await;
    snapshot_tick.tick().await;
    headlines_tick.tick().await;

    loop {
        tokio::select! {
            _ = picks_tick.tick() => refresh_picks(&mut orch).await,
            _ = snapshot_tick.tick() => refresh_snapshot(&mut orch).await,
            _ = headlines_tick.tick() => refresh_headlines(&mut orch).await,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                return Ok(());
            }
        }
    }
}

async fn refresh_picks<A: DashboardApi>(orch: &mut Orchestrator<A>) {
    let outcome = orch.refresh().await;
    let (us, kr, etf) = outcome.sections.counts();

    let favorites = orch.favorites();
    let tracked = outcome
        .picks
        .iter()
        .filter(|p| favorites.contains(&p.ticker))
        .count();

    tracing::info!(
        tier = ?outcome.tier,
        us,
        kr,
        etf,
        favorites = favorites.len(),
        favorites_on_board = tracked,
        "picks refreshed"
    );
}

async fn refresh_snapshot<A: DashboardApi>(orch: &mut Orchestrator<A>) {
    match orch.refresh_snapshot().await {
        Some(snapshot) => tracing::info!(indexes = snapshot.len(), "market snapshot refreshed"),
        None => tracing::warn!("market snapshot unavailable"),
    }
}

async fn refresh_headlines<A: DashboardApi>(orch: &mut Orchestrator<A>) {
    let lang = orch.context().lang;
    let headlines = orch.refresh_headlines().await;
    tracing::info!(%lang, count = headlines.len(), "headlines refreshed");
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
