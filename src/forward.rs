// src/forward.rs
//! Read-it-later forwarder. One authenticated form POST per item, no retry.
//! Missing credentials and transport failures are structured outcomes, not
//! errors — an approval batch must never abort on them.

use reqwest::Client;

use crate::config::HTTP_TIMEOUT;

/// Status codes the save-service treats as "saved".
pub const ACCEPTED_STATUSES: [u16; 2] = [201, 202];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    Saved { status: u16 },
    Rejected { status: u16 },
    Failed { error: String },
    NotConfigured,
}

impl ForwardOutcome {
    pub fn ok(&self) -> bool {
        matches!(self, ForwardOutcome::Saved { .. })
    }
}

pub struct ReadLaterForwarder {
    api_url: String,
    credentials: Option<(String, String)>,
    client: Client,
}

impl ReadLaterForwarder {
    pub fn new(api_url: impl Into<String>, user: Option<String>, pass: Option<String>) -> Self {
        let credentials = match (user, pass) {
            (Some(u), Some(p)) => Some((u, p)),
            _ => None,
        };
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("http client");
        Self {
            api_url: api_url.into(),
            credentials,
            client,
        }
    }

    pub async fn save(&self, url: &str, title: Option<&str>) -> ForwardOutcome {
        let Some((user, pass)) = &self.credentials else {
            tracing::debug!("save-service disabled (no credentials)");
            return ForwardOutcome::NotConfigured;
        };

        let mut form = vec![("url", url.to_string())];
        if let Some(t) = title {
            form.push(("title", t.to_string()));
        }

        let resp = match self
            .client
            .post(&self.api_url)
            .basic_auth(user, Some(pass))
            .form(&form)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return ForwardOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        let status = resp.status().as_u16();
        if ACCEPTED_STATUSES.contains(&status) {
            ForwardOutcome::Saved { status }
        } else {
            ForwardOutcome::Rejected { status }
        }
    }
}
