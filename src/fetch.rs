//! Remote menu retrieval.
//! One GET to `{base}/api/user/{hash}/menu.json` per page load, bounded by the
//! configured wait (3 s by default). When the bound elapses the request future
//! is dropped, which aborts the connection.
//! Failures are outcomes, not errors. The page controller turns them into
//! user-safe messages; the underlying cause only goes to the log.

use crate::config::ApiBase;
use crate::model::MenuDocument;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

// *************** Outcome ***************

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(MenuDocument),
    NotFound,
    ServerError(StatusCode),
    TimedOut,
    /// Connection-level failures and payloads that are not a usable menu.
    NetworkFailure,
}

impl std::fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchOutcome::Success(menu) => {
                write!(f, "loaded ({} categories)", menu.categories.len())
            }
            FetchOutcome::NotFound => write!(f, "not found"),
            FetchOutcome::ServerError(status) => write!(f, "server error ({})", status),
            FetchOutcome::TimedOut => write!(f, "timed out"),
            FetchOutcome::NetworkFailure => write!(f, "network failure"),
        }
    }
}

// *************** Client ***************

#[derive(Debug, Clone)]
pub struct MenuClient {
    client: Client,
    base: ApiBase,
    timeout: Duration,
}

impl MenuClient {
    pub fn new(base: ApiBase, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_http_client(client, base, timeout))
    }

    /// Uses a caller-built `reqwest::Client` (proxy or TLS settings).
    pub fn with_http_client(client: Client, base: ApiBase, timeout: Duration) -> Self {
        Self {
            client,
            base,
            timeout,
        }
    }

    /// Issues the single menu request. Never retries.
    pub async fn fetch(&self, hash: &str) -> FetchOutcome {
        let url = self.base.menu_url(hash);
        debug!(%url, timeout_ms = self.timeout.as_millis() as u64, "requesting menu");

        match tokio::time::timeout(self.timeout, self.request(url)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "menu request cancelled after timeout"
                );
                FetchOutcome::TimedOut
            }
        }
    }

    async fn request(&self, url: Url) -> FetchOutcome {
        let response = match self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "menu request failed");
                return FetchOutcome::NetworkFailure;
            }
        };

        let status = response.status();
        debug!(%status, "menu response received");
        if status == StatusCode::NOT_FOUND {
            warn!("menu not found");
            return FetchOutcome::NotFound;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "menu service returned an error");
            return FetchOutcome::ServerError(status);
        }

        let menu: MenuDocument = match response.json().await {
            Ok(menu) => menu,
            Err(e) => {
                warn!(error = %e, "failed to decode menu payload");
                return FetchOutcome::NetworkFailure;
            }
        };
        if let Err(problem) = menu.validate() {
            warn!(%problem, "menu payload rejected");
            return FetchOutcome::NetworkFailure;
        }

        FetchOutcome::Success(menu)
    }
}

// *************** Tests ***************
