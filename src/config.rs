// src/config.rs
//! Environment configuration, parsed once at startup. Every knob is optional;
//! malformed values fall back to their defaults.

use std::time::Duration;

// --- env names ---
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_DIGEST_WINDOW_HOURS: &str = "DIGEST_WINDOW_HOURS";
pub const ENV_MAX_ITEMS: &str = "MAX_ITEMS";
pub const ENV_SEARCH_API_KEY: &str = "NYT_API_KEY";
pub const ENV_SEARCH_QUERY: &str = "NYT_QUERY";
pub const ENV_SEARCH_PAGE_LIMIT: &str = "NYT_PAGE_LIMIT";
pub const ENV_FEEDS: &str = "ECON_FEEDS";
pub const ENV_KEYWORDS: &str = "AI_KEYWORDS";
pub const ENV_SAVE_USER: &str = "INSTAPAPER_SIMPLE_USER";
pub const ENV_SAVE_PASS: &str = "INSTAPAPER_SIMPLE_PASS";

// --- defaults ---
pub const DEFAULT_SEARCH_API_URL: &str =
    "https://api.nytimes.com/svc/search/v2/articlesearch.json";
pub const DEFAULT_SAVE_API_URL: &str = "https://www.instapaper.com/api/add";

const DEFAULT_FEEDS: [&str; 2] = [
    "https://www.economist.com/science-and-technology/rss.xml",
    "https://www.economist.com/business/rss.xml",
];

const DEFAULT_KEYWORDS: &str =
    "AI,artificial intelligence,machine learning,LLM,OpenAI,Anthropic,GPT,deep learning";

/// Per-call timeout for every outbound HTTP request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Fetch window: "since" = now minus this many hours.
    pub digest_window_hours: i64,
    /// Digest cap, applied after dedup.
    pub max_items: usize,
    pub search_api_url: String,
    /// None disables the search-API fetcher entirely.
    pub search_api_key: Option<String>,
    pub search_query: String,
    pub search_page_limit: u32,
    pub feeds: Vec<String>,
    pub keywords: Vec<String>,
    pub save_api_url: String,
    pub save_user: Option<String>,
    pub save_pass: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            digest_window_hours: 24,
            max_items: 25,
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            search_api_key: None,
            search_query: r#"( "artificial intelligence" OR AI )"#.to_string(),
            search_page_limit: 2,
            feeds: DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
            keywords: split_list(DEFAULT_KEYWORDS),
            save_api_url: DEFAULT_SAVE_API_URL.to_string(),
            save_user: None,
            save_pass: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_nonempty(ENV_BIND_ADDR) {
            cfg.bind_addr = v;
        }
        cfg.digest_window_hours = env_parsed(ENV_DIGEST_WINDOW_HOURS, cfg.digest_window_hours);
        cfg.max_items = env_parsed(ENV_MAX_ITEMS, cfg.max_items);
        cfg.search_api_key = env_nonempty(ENV_SEARCH_API_KEY);
        if let Some(v) = env_nonempty(ENV_SEARCH_QUERY) {
            cfg.search_query = v;
        }
        cfg.search_page_limit = env_parsed(ENV_SEARCH_PAGE_LIMIT, cfg.search_page_limit);
        if let Some(v) = env_nonempty(ENV_FEEDS) {
            let feeds = split_list(&v);
            if !feeds.is_empty() {
                cfg.feeds = feeds;
            }
        }
        if let Some(v) = env_nonempty(ENV_KEYWORDS) {
            let keywords = split_list(&v);
            if !keywords.is_empty() {
                cfg.keywords = keywords;
            }
        }
        cfg.save_user = env_nonempty(ENV_SAVE_USER);
        cfg.save_pass = env_nonempty(ENV_SAVE_PASS);
        cfg
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env_nonempty(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated list, trimming entries and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list(" a , ,b,, c "),
            vec!["a".to_string(), "b".into(), "c".into()]
        );
        assert!(split_list(" , ,").is_empty());
    }

    #[serial_test::serial]
    #[test]
    fn from_env_falls_back_on_malformed_numbers() {
        env::set_var(ENV_MAX_ITEMS, "not-a-number");
        env::set_var(ENV_DIGEST_WINDOW_HOURS, "12");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.max_items, 25);
        assert_eq!(cfg.digest_window_hours, 12);
        env::remove_var(ENV_MAX_ITEMS);
        env::remove_var(ENV_DIGEST_WINDOW_HOURS);
    }

    #[serial_test::serial]
    #[test]
    fn empty_feed_list_keeps_defaults() {
        env::set_var(ENV_FEEDS, " , ");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.feeds.len(), 2);
        assert!(cfg.feeds[0].contains("economist.com"));
        env::remove_var(ENV_FEEDS);
    }
}
