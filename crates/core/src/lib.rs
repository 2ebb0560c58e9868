pub mod api;
pub mod cache;
pub mod domain;
pub mod orchestrator;
pub mod store;

pub mod config {
    use std::path::PathBuf;
    use std::time::Duration;

    const DEFAULT_BASE_URL: &str = "https://kobotpick.onrender.com/api/v1";

    const DEFAULT_TIMEOUT_SECS: u64 = 45;
    const DEFAULT_WARMUP_TIMEOUT_SECS: u64 = 4;
    const DEFAULT_RETRIES: u32 = 3;
    const DEFAULT_RETRY_DELAY_MS: u64 = 400;
    const DEFAULT_RETRY_JITTER_MS: u64 = 200;
    const DEFAULT_REC_CONCURRENCY: usize = 5;
    const DEFAULT_MAX_ITEMS_PER_SECTION: usize = 15;

    const DEFAULT_PICKS_REFRESH_SECS: u64 = 120;
    const DEFAULT_SNAPSHOT_REFRESH_SECS: u64 = 60;
    const DEFAULT_HEADLINES_REFRESH_SECS: u64 = 300;

    const DEFAULT_PICKS_TTL_SECS: u64 = 900;
    const DEFAULT_SNAPSHOT_TTL_SECS: u64 = 300;
    const DEFAULT_HEADLINES_TTL_SECS: u64 = 1800;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: String,
        pub request_timeout: Duration,
        pub warmup_timeout: Duration,
        pub retries: u32,
        pub retry_delay: Duration,
        pub retry_jitter: Duration,
        pub rec_concurrency: usize,
        pub max_items_per_section: usize,
        pub picks_refresh: Duration,
        pub snapshot_refresh: Duration,
        pub headlines_refresh: Duration,
        pub picks_ttl: Duration,
        pub snapshot_ttl: Duration,
        pub headlines_ttl: Duration,
        pub data_dir: PathBuf,
        pub lang: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> Self {
            Self {
                api_base_url: std::env::var("KOBOT_API_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                request_timeout: Duration::from_secs(env_u64(
                    "KOBOT_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )),
                warmup_timeout: Duration::from_secs(env_u64(
                    "KOBOT_WARMUP_TIMEOUT_SECS",
                    DEFAULT_WARMUP_TIMEOUT_SECS,
                )),
                retries: env_u64("KOBOT_RETRIES", DEFAULT_RETRIES as u64) as u32,
                retry_delay: Duration::from_millis(env_u64(
                    "KOBOT_RETRY_DELAY_MS",
                    DEFAULT_RETRY_DELAY_MS,
                )),
                retry_jitter: Duration::from_millis(env_u64(
                    "KOBOT_RETRY_JITTER_MS",
                    DEFAULT_RETRY_JITTER_MS,
                )),
                rec_concurrency: env_u64(
                    "KOBOT_REC_CONCURRENCY",
                    DEFAULT_REC_CONCURRENCY as u64,
                ) as usize,
                max_items_per_section: env_u64(
                    "KOBOT_MAX_ITEMS_PER_SECTION",
                    DEFAULT_MAX_ITEMS_PER_SECTION as u64,
                ) as usize,
                picks_refresh: Duration::from_secs(env_u64(
                    "KOBOT_PICKS_REFRESH_SECS",
                    DEFAULT_PICKS_REFRESH_SECS,
                )),
                snapshot_refresh: Duration::from_secs(env_u64(
                    "KOBOT_SNAPSHOT_REFRESH_SECS",
                    DEFAULT_SNAPSHOT_REFRESH_SECS,
                )),
                headlines_refresh: Duration::from_secs(env_u64(
                    "KOBOT_HEADLINES_REFRESH_SECS",
                    DEFAULT_HEADLINES_REFRESH_SECS,
                )),
                picks_ttl: Duration::from_secs(env_u64(
                    "KOBOT_PICKS_TTL_SECS",
                    DEFAULT_PICKS_TTL_SECS,
                )),
                snapshot_ttl: Duration::from_secs(env_u64(
                    "KOBOT_SNAPSHOT_TTL_SECS",
                    DEFAULT_SNAPSHOT_TTL_SECS,
                )),
                headlines_ttl: Duration::from_secs(env_u64(
                    "KOBOT_HEADLINES_TTL_SECS",
                    DEFAULT_HEADLINES_TTL_SECS,
                )),
                data_dir: std::env::var("KOBOT_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".kobot")),
                lang: std::env::var("KOBOT_LANG").ok().filter(|s| !s.is_empty()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok().filter(|s| !s.is_empty()),
            }
        }
    }

    fn env_u64(key: &str, default: u64) -> u64 {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(default)
    }
}
