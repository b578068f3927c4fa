use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::domain::errors::ClientError;
use crate::domain::types::LocationRecord;

/// A StudentLocation row as the server returns it. Every field except
/// `createdAt` must be present with the right JSON type.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLocation {
    unique_key: String,
    first_name: String,
    last_name: String,
    #[serde(rename = "mediaURL")]
    media_url: String,
    map_string: String,
    latitude: f64,
    longitude: f64,
    object_id: String,
    created_at: Option<String>,
}

impl From<StoredLocation> for LocationRecord {
    fn from(stored: StoredLocation) -> Self {
        Self {
            unique_key: stored.unique_key,
            first_name: stored.first_name,
            last_name: stored.last_name,
            media_url: stored.media_url,
            map_string: stored.map_string,
            latitude: stored.latitude,
            longitude: stored.longitude,
            object_id: Some(stored.object_id),
            created_at: stored.created_at,
        }
    }
}

/// POST body for a new StudentLocation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewLocationBody<'a> {
    unique_key: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(rename = "mediaURL")]
    media_url: &'a str,
    map_string: &'a str,
    latitude: f64,
    longitude: f64,
}

impl<'a> From<&'a LocationRecord> for NewLocationBody<'a> {
    fn from(record: &'a LocationRecord) -> Self {
        Self {
            unique_key: &record.unique_key,
            first_name: &record.first_name,
            last_name: &record.last_name,
            media_url: &record.media_url,
            map_string: &record.map_string,
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

pub fn decode_json(bytes: &[u8]) -> Result<Value, ClientError> {
    serde_json::from_slice::<Value>(bytes).map_err(|e| {
        let preview = String::from_utf8_lossy(&bytes[..bytes.len().min(200)]);
        trace!("Unparseable body (first 200 bytes): {}", preview);
        ClientError::MalformedResponse(e.to_string())
    })
}

/// The `results` array of a list response.
pub fn extract_results(json: &Value) -> Result<&Vec<Value>, ClientError> {
    json.get("results")
        .and_then(Value::as_array)
        .ok_or(ClientError::UnexpectedResponseShape {
            key: "results",
            context: "fetch_recent",
        })
}

pub fn decode_record(index: usize, value: &Value) -> Result<LocationRecord, ClientError> {
    StoredLocation::deserialize(value)
        .map(LocationRecord::from)
        .map_err(|e| ClientError::DecodeSkipped {
            index,
            reason: e.to_string(),
        })
}

/// Server-assigned creation timestamp from a POST response.
pub fn created_at(json: &Value) -> Result<&str, ClientError> {
    json.get("createdAt")
        .and_then(Value::as_str)
        .ok_or(ClientError::UnexpectedResponseShape {
            key: "createdAt",
            context: "submit_location",
        })
}

/// The `error` text Parse puts in non-2xx bodies.
pub fn server_error_message(json: &Value) -> Option<&str> {
    json.get("error").and_then(Value::as_str)
}
