//! Response payloads and error codes.

use serde::{Deserialize, Serialize};

/// An address as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressData {
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A proximity search hit: the address plus its distance from the center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyAddressData {
    #[serde(flatten)]
    pub address: AddressData,
    pub distance_km: f64,
}

/// Liveness payload for `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}

/// Storage connectivity report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

impl HealthStatus {
    pub fn connected() -> Self {
        Self {
            status: "ok".to_string(),
            database: "connected".to_string(),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            status: "error".to_string(),
            database: "disconnected".to_string(),
        }
    }
}

// =============================================================================
// Error Codes
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors (4xx) ===
    /// Request was malformed or invalid
    BadRequest,
    /// Requested resource not found
    NotFound,
    /// Operation conflicts with current state
    Conflict,
    /// Request data failed validation
    ValidationError,

    // === Server Errors (5xx) ===
    /// Internal server error
    InternalError,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
    /// The offending field, for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}
