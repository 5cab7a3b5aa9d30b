// src/ingest/providers/search_api.rs
//! Paginated article-search fetcher. Disabled (empty result) when no API key
//! is configured; a non-success page halts further pagination without
//! discarding what was already collected.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::HTTP_TIMEOUT;
use crate::ingest::types::{item_id, Item, Source, SourceProvider};
use crate::keywords::KeywordFilter;

/// Pause between successive page requests, to stay under the API rate limit.
const PAGE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    response: SearchResponse,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    web_url: Option<String>,
    headline: Option<Headline>,
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Headline {
    main: Option<String>,
}

pub struct ArticleSearchProvider {
    base_url: String,
    api_key: Option<String>,
    query: String,
    page_limit: u32,
    filter: KeywordFilter,
    client: reqwest::Client,
}

impl ArticleSearchProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        query: impl Into<String>,
        page_limit: u32,
        filter: KeywordFilter,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("http client");
        Self {
            base_url: base_url.into(),
            api_key,
            query: query.into(),
            page_limit,
            filter,
            client,
        }
    }
}

#[async_trait]
impl SourceProvider for ArticleSearchProvider {
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<Item>> {
        let Some(key) = &self.api_key else {
            tracing::debug!("article search disabled (no API key)");
            return Ok(Vec::new());
        };

        let begin_date = since.format("%Y%m%d").to_string();
        let mut out = Vec::new();
        for page in 0..self.page_limit {
            let page_s = page.to_string();
            let resp = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("q", self.query.as_str()),
                    ("begin_date", begin_date.as_str()),
                    ("sort", "newest"),
                    ("api-key", key.as_str()),
                    ("page", page_s.as_str()),
                ])
                .send()
                .await
                .context("article search get")?;

            if !resp.status().is_success() {
                tracing::warn!(
                    status = %resp.status(),
                    page,
                    "article search non-success, stopping pagination"
                );
                break;
            }

            let payload: SearchPayload = resp.json().await.context("article search json")?;
            for doc in payload.response.docs {
                let title = doc.headline.and_then(|h| h.main);
                let (Some(url), Some(title)) = (doc.web_url, title) else {
                    continue;
                };
                let title = title.trim();
                if title.is_empty() || !self.filter.matches(title) {
                    continue;
                }
                out.push(Item {
                    id: item_id(&url),
                    source: Source::SearchApi,
                    title: title.to_string(),
                    url,
                    published_at: doc.pub_date,
                });
            }

            tokio::time::sleep(PAGE_DELAY).await;
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "article-search"
    }
}
