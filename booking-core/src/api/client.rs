//! Booking backend HTTP client.
//!
//! Implements the search, purchase, status and outcome collaborators over
//! the backend's JSON API.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::domain::{
    OrderId, OrderPayload, PollReport, ResultSet, SearchCriteria, SearchOrder, Submission,
};
use crate::payment::PaymentBackend;

use super::convert::{cents_to_price, convert_results, convert_status, convert_submission};
use super::error::ApiError;
use super::provider::SearchProvider;
use super::types::{
    OrderNumberDto, SearchRequestDto, SearchResponseDto, StatusResponseDto, SubmitRequestDto,
    SubmitResponseDto,
};

/// Default base URL for the booking API.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Longest response body kept in error messages.
const MAX_ERROR_BODY: usize = 500;

/// Configuration for the booking API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Booking API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.is_empty() {
            return Err(ApiError::NotConfigured("booking API base URL is empty".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Read a successful response body as JSON.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(MAX_ERROR_BODY).collect()),
        })
    }

    /// Turn non-success statuses into errors.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();

        if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
            return Err(ApiError::Timeout);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        Ok(response)
    }

    async fn post_order_number(&self, path: &str, order_id: &OrderId) -> Result<(), ApiError> {
        let body = OrderNumberDto {
            order_number: order_id.as_str().to_string(),
        };
        let response = self.http.post(self.url(path)).json(&body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

impl SearchProvider for ApiClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<ResultSet, ApiError> {
        let path = match criteria.order {
            SearchOrder::DepartureTime => "train/seat/by-departure-time",
            SearchOrder::Duration => "train/seat/by-duration-time",
        };
        let body = SearchRequestDto {
            from: criteria.from.clone(),
            to: criteria.to.clone(),
            date: criteria.date.format("%Y-%m-%d").to_string(),
        };

        debug!(from = %criteria.from, to = %criteria.to, date = %criteria.date, "searching trains");
        let response = self.http.post(self.url(path)).json(&body).send().await?;
        let dto: SearchResponseDto = Self::read_json(response).await?;
        let results = convert_results(dto);
        trace!(count = results.len(), "search returned");

        Ok(results)
    }
}

impl PaymentBackend for ApiClient {
    async fn submit(&self, order: &OrderPayload) -> Result<Submission, ApiError> {
        let body = SubmitRequestDto {
            train_id: order.train_id,
            seat_type: order.seat_type.clone(),
            price: cents_to_price(order.price_cents),
        };
        let response = self
            .http
            .post(self.url("train/ticket/get"))
            .json(&body)
            .send()
            .await?;
        let dto: SubmitResponseDto = Self::read_json(response).await?;

        convert_submission(dto)
    }

    async fn poll(&self, order_id: &OrderId) -> Result<PollReport, ApiError> {
        let url = self.url(&format!("train/ticket/{}", order_id.as_str()));
        let response = self.http.get(&url).send().await?;
        let dto: StatusResponseDto = Self::read_json(response).await?;

        convert_status(dto)
    }

    async fn mark_complete(&self, order_id: &OrderId) -> Result<(), ApiError> {
        self.post_order_number("pay/complete", order_id).await
    }

    async fn mark_failed(&self, order_id: &OrderId) -> Result<(), ApiError> {
        self.post_order_number("pay/fail", order_id).await
    }
}
