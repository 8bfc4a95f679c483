//! Error types for the Torus read layer.
//!
//! Builders are all-or-nothing: any hard error aborts the whole build and no
//! partial result is returned. The only tolerated absences are the documented
//! optional-field defaults, which are policy, not error recovery.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when a string fails SS58 address validation.
///
/// Invalid addresses are rejected before they are used as map keys; they are
/// never silently coerced.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Invalid address '{address}': {message}")]
pub struct InvalidAddress {
    /// The rejected input string
    pub address: String,
    /// Detailed error message
    pub message: String,
}

impl InvalidAddress {
    /// Create a new invalid address error
    pub fn new(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            message: message.into(),
        }
    }
}

/// Error when a mandatory storage map is missing a key that a peer map
/// declares authoritative.
///
/// This indicates inconsistent node state (a malformed join between storage
/// maps) and must abort the build rather than being defaulted away.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Storage consistency fault: {message}")]
pub struct ConsistencyFault {
    /// Detailed error message
    pub message: String,
    /// The storage item that is missing data
    pub storage: Option<String>,
    /// The key missing from that storage item
    pub key: Option<String>,
}

impl ConsistencyFault {
    /// Create a new consistency fault
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            storage: None,
            key: None,
        }
    }

    /// Create a new consistency fault naming the storage item
    pub fn with_storage(message: impl Into<String>, storage: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            storage: Some(storage.into()),
            key: None,
        }
    }

    /// Create a new consistency fault naming the storage item and key
    pub fn with_key(
        message: impl Into<String>,
        storage: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            storage: Some(storage.into()),
            key: Some(key.into()),
        }
    }
}

/// Error when a decoded value does not have the expected shape or type.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Type fault on '{field}': {message}")]
pub struct TypeFault {
    /// The field or storage item with the unexpected value
    pub field: String,
    /// Detailed error message
    pub message: String,
}

impl TypeFault {
    /// Create a new type fault
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error raised by a [`BatchQueryGateway`](crate::gateway::BatchQueryGateway)
/// implementation (transport, timeout, or decoding failure).
///
/// This layer never catches or retries gateway faults; they propagate to the
/// caller unchanged.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Gateway error: {message}")]
pub struct GatewayError {
    /// Detailed error message
    pub message: String,
    /// The storage module being queried
    pub module: Option<String>,
    /// The storage entry being queried
    pub entry: Option<String>,
}

impl GatewayError {
    /// Create a new gateway error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            module: None,
            entry: None,
        }
    }

    /// Create a new gateway error with module and entry info
    pub fn with_storage(
        message: impl Into<String>,
        module: impl Into<String>,
        entry: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            module: Some(module.into()),
            entry: Some(entry.into()),
        }
    }
}

/// Unified error type for all read-layer operations.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum TorusError {
    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddress),
    #[error(transparent)]
    Consistency(#[from] ConsistencyFault),
    #[error(transparent)]
    Type(#[from] TypeFault),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl TorusError {
    /// Check if this is an address validation error
    pub fn is_invalid_address(&self) -> bool {
        matches!(self, TorusError::InvalidAddress(_))
    }

    /// Check if this is a storage consistency fault
    pub fn is_consistency_fault(&self) -> bool {
        matches!(self, TorusError::Consistency(_))
    }

    /// Check if this is a type fault
    pub fn is_type_fault(&self) -> bool {
        matches!(self, TorusError::Type(_))
    }

    /// Check if this error originated in the gateway
    pub fn is_gateway_error(&self) -> bool {
        matches!(self, TorusError::Gateway(_))
    }
}

/// Result type alias for read-layer operations
pub type TorusResult<T> = Result<T, TorusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistency_fault_names_storage_and_key() {
        let err = ConsistencyFault::with_key("missing netuid", "MaxAllowedWeights", "7");
        assert_eq!(err.storage.as_deref(), Some("MaxAllowedWeights"));
        assert_eq!(err.key.as_deref(), Some("7"));

        let torus_err: TorusError = err.into();
        assert!(torus_err.is_consistency_fault());
    }

    #[test]
    fn test_invalid_address_display() {
        let err = InvalidAddress::new("not-an-address", "bad checksum");
        assert!(err.to_string().contains("not-an-address"));
    }

    #[test]
    fn test_gateway_error_with_storage() {
        let err = GatewayError::with_storage("connection reset", "Torus0", "Agents");
        assert_eq!(err.module.as_deref(), Some("Torus0"));
        assert_eq!(err.entry.as_deref(), Some("Agents"));

        let torus_err: TorusError = err.into();
        assert!(torus_err.is_gateway_error());
        assert!(!torus_err.is_type_fault());
    }

    #[test]
    fn test_error_serialization_roundtrip() {
        let err = ConsistencyFault::with_key("missing netuid", "Tempo", "3");
        let serialized = serde_json::to_string(&err).expect("should serialize");
        let deserialized: ConsistencyFault =
            serde_json::from_str(&serialized).expect("should deserialize");
        assert_eq!(err.storage, deserialized.storage);
        assert_eq!(err.key, deserialized.key);
    }
}
