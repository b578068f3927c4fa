use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error, info, trace, warn};

use super::json::{
    created_at, decode_json, decode_record, extract_results, server_error_message, NewLocationBody,
};
use crate::config::constant::{API_KEY_HEADER, APP_ID_HEADER, DEFAULT_LIMIT, OFFLINE_MESSAGE};
use crate::config::ParseConfig;
use crate::domain::errors::{ClientError, ConfigError};
use crate::domain::types::LocationRecord;
use crate::utils::{build_list_url, collection_url};

/// Client for the StudentLocation collection.
///
/// Each instance owns the records it has fetched so far. The cache is only
/// appended to, and only from `fetch_recent`, which takes `&mut self`.
#[derive(Debug)]
pub struct ParseClient {
    http: Client,
    config: ParseConfig,
    locations: Vec<LocationRecord>,
}

impl ParseClient {
    pub fn new(config: ParseConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self::with_http(config, http))
    }

    /// Use an existing reqwest client, e.g. one shared across services.
    pub fn with_http(config: ParseConfig, http: Client) -> Self {
        Self {
            http,
            config,
            locations: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Every record fetched by this client, oldest fetch first.
    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    /// Fetch the default page of recent locations.
    pub async fn fetch_default(&mut self) -> Result<Vec<LocationRecord>, ClientError> {
        self.fetch_recent(DEFAULT_LIMIT).await
    }

    /// GET up to `limit` locations and append the decodable ones to the cache.
    ///
    /// Rows missing a field or carrying the wrong JSON type are dropped; the
    /// call still succeeds. Returns the rows decoded by this call.
    pub async fn fetch_recent(&mut self, limit: u32) -> Result<Vec<LocationRecord>, ClientError> {
        let url = build_list_url(&self.config.base_url, limit, Utc::now());
        info!("Fetching up to {} student locations", limit);
        debug!("Built list URL: {}", url);

        let response = match self.authorized(self.http.get(url)).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("StudentLocation GET failed: {}", e);
                return Err(ClientError::NetworkUnavailable(OFFLINE_MESSAGE.to_string()));
            }
        };
        let json = read_json(response, Some(OFFLINE_MESSAGE)).await?;
        let results = extract_results(&json)?;

        let mut fetched = Vec::with_capacity(results.len());
        for (index, value) in results.iter().enumerate() {
            match decode_record(index, value) {
                Ok(record) => fetched.push(record),
                Err(e) => warn!("{}", e),
            }
        }

        self.locations.extend(fetched.iter().cloned());
        info!(
            "Decoded {} of {} locations ({} cached)",
            fetched.len(),
            results.len(),
            self.locations.len()
        );
        Ok(fetched)
    }

    /// POST `record` as a new location. Succeeds once the server answers
    /// with a `createdAt` timestamp.
    pub async fn submit_location(&self, record: &LocationRecord) -> Result<(), ClientError> {
        let url = collection_url(&self.config.base_url);
        info!(
            "Posting location '{}' for {}",
            record.map_string, record.unique_key
        );
        trace!("POST {}", url);

        let request = self
            .authorized(self.http.post(url))
            .header(CONTENT_TYPE, "application/json")
            .json(&NewLocationBody::from(record));

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("StudentLocation POST failed: {}", e);
                return Err(ClientError::NetworkUnavailable(e.to_string()));
            }
        };
        let json = read_json(response, None).await?;
        let created = created_at(&json)?;

        info!("Location created at {}", created);
        Ok(())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(APP_ID_HEADER, &self.config.app_id)
            .header(API_KEY_HEADER, &self.config.api_key)
    }
}

/// Read and parse a response body. A body that cannot be read counts as a
/// transport failure; `offline_message` replaces the reqwest text when set.
async fn read_json(
    response: Response,
    offline_message: Option<&str>,
) -> Result<serde_json::Value, ClientError> {
    let status = response.status();
    debug!(
        "Received response: HTTP {} ({} bytes)",
        status,
        response.content_length().unwrap_or(0)
    );

    let bytes = match response.bytes().await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read response body: {}", e);
            let message = offline_message.map_or_else(|| e.to_string(), str::to_string);
            return Err(ClientError::NetworkUnavailable(message));
        }
    };

    let json = decode_json(&bytes)?;
    if !status.is_success() {
        warn!(
            "Parse returned HTTP {}: {}",
            status,
            server_error_message(&json).unwrap_or("no error message")
        );
    }
    Ok(json)
}
