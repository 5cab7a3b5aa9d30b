// src/api.rs
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::digest::DigestStore;
use crate::forward::ReadLaterForwarder;
use crate::ingest::providers::feed::FeedProvider;
use crate::ingest::providers::search_api::ArticleSearchProvider;
use crate::ingest::types::{Item, SourceProvider};
use crate::keywords::KeywordFilter;

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    providers: Arc<Vec<Box<dyn SourceProvider>>>,
    digest: DigestStore,
    forwarder: Arc<ReadLaterForwarder>,
}

impl AppState {
    /// Wire providers, digest slot, and forwarder from one config. Search-API
    /// items come first in the scan order, so they win dedup ties.
    pub fn from_config(config: AppConfig) -> Self {
        let filter = KeywordFilter::new(&config.keywords);
        let providers: Vec<Box<dyn SourceProvider>> = vec![
            Box::new(ArticleSearchProvider::new(
                &config.search_api_url,
                config.search_api_key.clone(),
                &config.search_query,
                config.search_page_limit,
                filter.clone(),
            )),
            Box::new(FeedProvider::new(config.feeds.clone(), filter)),
        ];
        let forwarder = ReadLaterForwarder::new(
            &config.save_api_url,
            config.save_user.clone(),
            config.save_pass.clone(),
        );
        Self {
            config: Arc::new(config),
            providers: Arc::new(providers),
            digest: DigestStore::new(),
            forwarder: Arc::new(forwarder),
        }
    }

    pub fn digest(&self) -> &DigestStore {
        &self.digest
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/run-digest", get(run_digest))
        .route("/digest/today", get(digest_today))
        .route("/approve", post(approve))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct RunDigestResp {
    count: usize,
}

async fn run_digest(
    State(state): State<AppState>,
) -> Result<Json<RunDigestResp>, (StatusCode, String)> {
    let since = Utc::now() - Duration::hours(state.config.digest_window_hours);
    let digest = crate::ingest::run_cycle(&state.providers, since, state.config.max_items)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "digest cycle failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("digest cycle failed: {e:#}"),
            )
        })?;

    let count = digest.len();
    state.digest.replace(digest);
    tracing::info!(count, "digest replaced");
    Ok(Json(RunDigestResp { count }))
}

async fn digest_today(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.digest.snapshot())
}

#[derive(serde::Deserialize)]
pub struct ApproveReq {
    pub ids: Vec<String>,
}

#[derive(serde::Serialize)]
pub struct ApproveResult {
    pub id: String,
    pub ok: bool,
}

#[derive(serde::Serialize)]
pub struct ApproveResp {
    pub saved: usize,
    pub results: Vec<ApproveResult>,
}

async fn approve(
    State(state): State<AppState>,
    Json(body): Json<ApproveReq>,
) -> Json<ApproveResp> {
    let snapshot = state.digest.snapshot();
    let by_id: HashMap<&str, &Item> = snapshot.iter().map(|it| (it.id.as_str(), it)).collect();

    let mut results = Vec::with_capacity(body.ids.len());
    for id in body.ids {
        // Ids absent from the current digest are skipped, not reported.
        let Some(item) = by_id.get(id.as_str()) else {
            continue;
        };
        let outcome = state
            .forwarder
            .save(&item.url, Some(item.title.as_str()))
            .await;
        if !outcome.ok() {
            tracing::warn!(id = %id, outcome = ?outcome, "item not saved");
        }
        results.push(ApproveResult {
            id,
            ok: outcome.ok(),
        });
    }

    let saved = results.iter().filter(|r| r.ok).count();
    Json(ApproveResp { saved, results })
}
