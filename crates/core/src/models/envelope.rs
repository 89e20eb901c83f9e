use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform wrapper for every JSON response body.
///
/// `data` and `errors` are omitted from the serialized form when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::with_data(200, data, message)
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_data(201, data, message)
    }

    fn with_data(status: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: Some(data),
            errors: None,
            timestamp: Utc::now(),
        }
    }
}

impl ApiEnvelope<()> {
    /// A 200 response that carries only a message.
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: None,
            errors: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(status: u16, message: impl Into<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
            errors,
            timestamp: Utc::now(),
        }
    }
}
