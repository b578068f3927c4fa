use serde::{Deserialize, Serialize};

use super::errors::ClientError;

/// One user's shared location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub unique_key: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "mediaURL")]
    pub media_url: String,
    pub map_string: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl LocationRecord {
    /// Build an unsaved record owned by `user`.
    pub fn draft(
        user: &dyn UserContext,
        media_url: impl Into<String>,
        map_string: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            unique_key: user.unique_id().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            media_url: media_url.into(),
            map_string: map_string.into(),
            latitude,
            longitude,
            object_id: None,
            created_at: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.object_id.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The currently authenticated user.
pub trait UserContext {
    fn unique_id(&self) -> &str;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
}

/// A user identity held by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUser {
    pub unique_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl StaticUser {
    pub fn new(
        unique_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl UserContext for StaticUser {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Success flag plus optional message, for callers that only report outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub success: bool,
    pub error_message: Option<String>,
}

impl Completion {
    pub fn from_result<T>(result: &Result<T, ClientError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                error_message: None,
            },
            Err(e) => Self {
                success: false,
                error_message: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_takes_identity_from_user() {
        let user = StaticUser::new("u-42", "Ada", "Lovelace");
        let record = LocationRecord::draft(&user, "https://example.com", "London, UK", 51.5, -0.12);

        assert_eq!(record.unique_key, "u-42");
        assert_eq!(record.full_name(), "Ada Lovelace");
        assert!(!record.is_persisted());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn unsaved_record_serializes_without_server_fields() {
        let user = StaticUser::new("u-1", "A", "B");
        let record = LocationRecord::draft(&user, "http://x", "Paris", 48.8, 2.3);
        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();

        assert_eq!(keys.len(), 7);
        assert_eq!(json["mediaURL"], "http://x");
        assert_eq!(json["uniqueKey"], "u-1");
        assert!(json.get("objectId").is_none());
    }

    #[test]
    fn completion_carries_error_message() {
        let failed: Result<(), ClientError> =
            Err(ClientError::NetworkUnavailable("offline".to_string()));
        let completion = Completion::from_result(&failed);
        assert!(!completion.success);
        assert_eq!(completion.error_message.as_deref(), Some("offline"));

        let ok: Result<(), ClientError> = Ok(());
        assert_eq!(
            Completion::from_result(&ok),
            Completion {
                success: true,
                error_message: None
            }
        );
    }
}
