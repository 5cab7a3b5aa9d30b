// src/ingest/providers/feed.rs
//! RSS/Atom feed fetcher. Feeds are fetched in full, in configured order; a
//! feed that fails to download or parse is skipped and the rest continue.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::config::HTTP_TIMEOUT;
use crate::ingest::types::{item_id, Item, Source, SourceProvider};
use crate::keywords::KeywordFilter;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

// Atom fallback. Titles and summaries may carry a type attribute, so they
// deserialize through a text wrapper.
#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<AtomText>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
}

/// Source-agnostic view of one feed entry.
#[derive(Debug)]
struct RawEntry {
    title: Option<String>,
    link: Option<String>,
    summary: Option<String>,
    published: Option<String>,
}

fn parse_entries(xml: &str) -> Result<Vec<RawEntry>> {
    if let Ok(rss) = from_str::<Rss>(xml) {
        return Ok(rss
            .channel
            .items
            .into_iter()
            .map(|it| RawEntry {
                title: it.title,
                link: it.link,
                summary: it.description,
                published: it.pub_date,
            })
            .collect());
    }

    let atom: AtomFeed = from_str(xml).context("parsing feed xml")?;
    Ok(atom
        .entries
        .into_iter()
        .map(|e| RawEntry {
            title: e.title.and_then(|t| t.value),
            link: e.links.into_iter().find_map(|l| l.href),
            summary: e.summary.and_then(|s| s.value),
            published: e.updated,
        })
        .collect())
}

pub struct FeedProvider {
    feeds: Vec<String>,
    filter: KeywordFilter,
    client: reqwest::Client,
}

impl FeedProvider {
    pub fn new(feeds: Vec<String>, filter: KeywordFilter) -> Self {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("http client");
        Self {
            feeds,
            filter,
            client,
        }
    }

    async fn fetch_body(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await.context("feed get")?;
        resp.error_for_status()
            .context("feed non-2xx")?
            .text()
            .await
            .context("feed body")
    }
}

#[async_trait]
impl SourceProvider for FeedProvider {
    // `since` is accepted for signature parity with the search provider but
    // deliberately unused: feeds are taken in full.
    async fn fetch_since(&self, _since: DateTime<Utc>) -> Result<Vec<Item>> {
        let mut out = Vec::new();
        for feed in &self.feeds {
            let body = match self.fetch_body(feed).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(error = ?e, feed = %feed, "feed fetch failed, skipping");
                    continue;
                }
            };
            let entries = match parse_entries(&body) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = ?e, feed = %feed, "feed parse failed, skipping");
                    continue;
                }
            };
            for entry in entries {
                let (Some(link), Some(title)) = (entry.link, entry.title) else {
                    continue;
                };
                let title = title.trim().to_string();
                let summary = entry.summary.unwrap_or_default();
                if title.is_empty() || !self.filter.matches(&format!("{title} {summary}")) {
                    continue;
                }
                out.push(Item {
                    id: item_id(&link),
                    source: Source::Feed,
                    title,
                    url: link,
                    published_at: entry.published,
                });
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "feed"
    }
}
