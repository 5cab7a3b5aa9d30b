// src/ingest/mod.rs
pub mod providers;
pub mod types;

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::ingest::types::{Item, SourceProvider};

/// Dedup identity key: strip the query string, then trailing slashes.
/// Idempotent.
pub fn canonical_url(url: &str) -> String {
    let base = url.split('?').next().unwrap_or(url);
    base.trim_end_matches('/').to_string()
}

/// Single left-to-right pass keeping the first item per canonical URL, then
/// truncate to `max_items`. Scan order is preserved, so earlier providers
/// win ties.
pub fn dedupe(items: Vec<Item>, max_items: usize) -> Vec<Item> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for it in items {
        if seen.insert(canonical_url(&it.url)) {
            unique.push(it);
        }
    }
    unique.truncate(max_items);
    unique
}

/// One fetch cycle: query providers in order, concatenate, dedupe.
/// A transport error from any provider aborts the whole cycle; soft
/// per-source failures are handled inside each provider.
pub async fn run_cycle(
    providers: &[Box<dyn SourceProvider>],
    since: DateTime<Utc>,
    max_items: usize,
) -> Result<Vec<Item>> {
    let mut raw = Vec::new();
    for p in providers {
        let mut batch = p.fetch_since(since).await?;
        tracing::debug!(provider = p.name(), count = batch.len(), "provider batch");
        raw.append(&mut batch);
    }
    Ok(dedupe(raw, max_items))
}
