// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

/// One curated news item. `id` is derived from the raw URL as fetched, so it
/// stays stable across runs even when the canonical form changes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub source: Source,
    pub title: String,
    pub url: String,
    /// Source-native timestamp string, passed through unvalidated.
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    SearchApi,
    Feed,
}

/// Short stable id: first 6 bytes of SHA-256 of the raw URL, hex-encoded.
pub fn item_id(url: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    /// Fetch candidate items newer than `since`. How (and whether) `since`
    /// is applied is up to the provider.
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<Item>>;
    fn name(&self) -> &'static str;
}
