//! BunnySteps API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing;

use bunny_core::config::ClientConfig;
use bunny_core::error::{AppError, ErrorKind};
use bunny_core::result::AppResult;
use bunny_core::traits::{NotificationSource, RewardDataSource};
use bunny_core::types::{
    Expense, HobbySummary, NotificationId, NotificationRecord, Profile, RecommendationHint,
    ShoppingItem,
};

/// HTTP client for the endpoints the reward engine reads and acknowledges.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Shared connection pool
    http: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Bearer token of the signed-in user
    token: Option<String>,
    /// Records requested per notification poll
    fetch_limit: u32,
}

impl ApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig, fetch_limit: u32) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
            fetch_limit,
        })
    }

    /// Join an endpoint path onto the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        match &self.token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(AppError::authentication("No access token configured")),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        let response = self
            .authorize(self.http.get(&url))?
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        if let Some(err) = status_error(&url, response.status()) {
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to decode response from {url}: {e}"),
                e,
            )
        })
    }

    async fn post_empty(&self, path: &str) -> AppResult<()> {
        let url = self.url(path);
        let response = self
            .authorize(self.http.post(&url))?
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        match status_error(&url, response.status()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Request to {url} failed: {err}"),
        err,
    )
}

/// Map a non-success status to an error; `None` for 2xx.
fn status_error(url: &str, status: StatusCode) -> Option<AppError> {
    if status.is_success() {
        return None;
    }
    let message = format!("{url} returned {status}");
    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::authentication(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        _ => AppError::external_service(message),
    })
}

#[async_trait]
impl NotificationSource for ApiClient {
    async fn fetch_notifications(&self) -> AppResult<Vec<NotificationRecord>> {
        let path = format!(
            "notifications/?ordering=-created_at&limit={}",
            self.fetch_limit
        );
        let records: Vec<NotificationRecord> = self.get_json(&path).await?;
        tracing::trace!("Fetched {} notifications", records.len());
        Ok(records)
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        self.post_empty(&format!("notifications/{id}/read/")).await
    }

    async fn mark_all_read(&self) -> AppResult<()> {
        self.post_empty("notifications/mark-all-read/").await
    }
}

#[async_trait]
impl RewardDataSource for ApiClient {
    async fn fetch_profile(&self) -> AppResult<Profile> {
        self.get_json("profile/").await
    }

    async fn fetch_expenses(&self) -> AppResult<Vec<Expense>> {
        self.get_json("expenses/").await
    }

    async fn fetch_shopping_items(&self) -> AppResult<Vec<ShoppingItem>> {
        self.get_json("shopping-items/").await
    }

    async fn fetch_hobbies(&self) -> AppResult<Vec<HobbySummary>> {
        self.get_json("hobbies/").await
    }

    async fn fetch_recommendation_hint(&self) -> AppResult<RecommendationHint> {
        self.get_json("reward-recommendations/").await
    }
}
