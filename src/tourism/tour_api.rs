use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::mapping::FieldMapping;
use super::normalize::RawRecord;
use super::sources::HotelSource;
use crate::config::HotelFeedConfig;
use crate::{Result, StayScopeError};

/// Result code the tourism API uses for a successful call
const SUCCESS_CODE: &str = "0000";

/// Korea Tourism Organization (`KorService2`) accommodation search client
pub struct TourApiClient {
    client: ClientWithMiddleware,
    config: HotelFeedConfig,
}

impl TourApiClient {
    /// Create a new client
    pub fn new(config: &HotelFeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("StayScope/0.1.0")
            .build()
            .map_err(|e| StayScopeError::api(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn search_url(&self, service_key: &str) -> String {
        format!(
            "{}/searchStay2?ServiceKey={}&numOfRows={}&pageNo={}&MobileOS=ETC&MobileApp={}&arrange={}&_type=json&areaCode={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(service_key),
            self.config.num_of_rows,
            self.config.page_no,
            urlencoding::encode(&self.config.mobile_app),
            urlencoding::encode(&self.config.arrange),
            self.config.area_code,
        )
    }

    /// Fetch one page of accommodation items for the configured area
    #[instrument(skip(self), fields(area_code = self.config.area_code))]
    pub async fn search_stays(&self) -> Result<Vec<RawRecord>> {
        let service_key = self
            .config
            .service_key
            .as_deref()
            .ok_or_else(|| StayScopeError::config("No tourism API service key configured"))?;

        info!(
            "Searching stays in area {} ({} per page, page {})",
            self.config.area_code, self.config.num_of_rows, self.config.page_no
        );

        let response = self
            .client
            .get(self.search_url(service_key))
            .send()
            .await
            .map_err(|e| StayScopeError::api(format!("Tourism API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StayScopeError::api(format!(
                "Tourism API error {status}: {error_text}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StayScopeError::api(format!("Failed to read tourism API response: {e}")))?;

        // An invalid key is answered with an XML envelope even when JSON was requested
        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            debug!("Unparseable tourism API body: {}", body);
            StayScopeError::api(format!("Tourism API response is not JSON: {e}"))
        })?;

        let items = extract_items(&payload)?;
        info!("Found {} stays from the tourism API", items.len());
        Ok(items)
    }
}

#[async_trait::async_trait]
impl HotelSource for TourApiClient {
    fn name(&self) -> &str {
        "tour-api/searchStay2"
    }

    fn field_mapping(&self) -> &FieldMapping {
        &self.config.fields
    }

    async fn fetch_hotels(&self) -> Result<Vec<RawRecord>> {
        self.search_stays().await
    }
}

/// Pull the item list out of a `searchStay2` response.
///
/// `items` is an empty string when nothing matched and `item` is a bare
/// object when exactly one did.
pub fn extract_items(payload: &Value) -> Result<Vec<RawRecord>> {
    if let Some(code) = payload.pointer("/response/header/resultCode") {
        let code = code.as_str().map_or_else(|| code.to_string(), str::to_string);
        if code != SUCCESS_CODE {
            let message = payload
                .pointer("/response/header/resultMsg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(StayScopeError::api(format!(
                "Tourism API returned {code}: {message}"
            )));
        }
    }

    let body = payload
        .pointer("/response/body")
        .ok_or_else(|| StayScopeError::api("Tourism API response has no body"))?;

    let items = match body.pointer("/items/item") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect(),
        Some(Value::Object(item)) => vec![item.clone()],
        _ => Vec::new(),
    };

    Ok(items)
}
