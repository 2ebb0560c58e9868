use crate::config::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Logical resources with their own cache slot and TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Picks,
    Snapshot,
    Headlines,
}

impl Resource {
    /// Fixed storage key, kept compatible with the legacy dashboard keys.
    pub fn key(&self) -> &'static str {
        match self {
            Resource::Picks => "kobot-cache-picks",
            Resource::Snapshot => "kobot-cache-snapshot",
            Resource::Headlines => "kobot-cache-headlines",
        }
    }
}

/// Per-resource time-to-live. An entry older than its TTL is treated as
/// absent everywhere.
#[derive(Debug, Clone)]
pub struct CacheTtls {
    pub picks: Duration,
    pub snapshot: Duration,
    pub headlines: Duration,
}

impl CacheTtls {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            picks: settings.picks_ttl,
            snapshot: settings.snapshot_ttl,
            headlines: settings.headlines_ttl,
        }
    }

    pub fn for_resource(&self, resource: Resource) -> Duration {
        match resource {
            Resource::Picks => self.picks,
            Resource::Snapshot => self.snapshot,
            Resource::Headlines => self.headlines,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub timestamp: DateTime<Utc>,
    pub payload: T,
}

impl<T> CacheEntry<T> {
    pub fn new(payload: T, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            payload,
        }
    }

    /// Strictly-younger-than-TTL check; an entry exactly TTL old is stale.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        now.signed_duration_since(self.timestamp) < ttl
    }

    pub fn into_fresh_payload(self, ttl: Duration, now: DateTime<Utc>) -> Option<T> {
        if self.is_fresh(ttl, now) {
            Some(self.payload)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn entry_is_fresh_within_ttl() {
        let entry = CacheEntry::new(42u32, at(0));
        let ttl = Duration::from_secs(300);
        assert!(entry.is_fresh(ttl, at(0)));
        assert!(entry.is_fresh(ttl, at(299)));
    }

    #[test]
    fn entry_at_or_past_ttl_is_stale() {
        let entry = CacheEntry::new(42u32, at(0));
        let ttl = Duration::from_secs(300);
        assert!(!entry.is_fresh(ttl, at(300)));
        assert!(!entry.is_fresh(ttl, at(10_000)));
        assert!(entry.clone().into_fresh_payload(ttl, at(301)).is_none());
        assert_eq!(entry.into_fresh_payload(ttl, at(10)), Some(42));
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = CacheEntry::new(vec!["AAPL".to_string()], at(0));
        let json = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry<Vec<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.payload, entry.payload);
        assert_eq!(back.timestamp, entry.timestamp);
    }
}
