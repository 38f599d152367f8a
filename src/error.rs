//! Configuration error types for the Cosmos DB client.
//!
//! This module contains the error raised while building or validating
//! configuration values. Request-time failures live in
//! [`crate::clients::CosmosError`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use cosmosdb_api::{ConfigError, MasterKey};
//!
//! let result = MasterKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyMasterKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Master key cannot be empty.
    #[error("Master key cannot be empty. Please provide the account's primary or secondary key.")]
    EmptyMasterKey,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Expected an absolute URL such as 'https://myaccount.documents.azure.com'.")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2018-12-31').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The HTTP transport could not be constructed.
    #[error("Failed to create HTTP transport: {reason}")]
    Transport {
        /// The reason reported by the transport builder.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_master_key_error_message() {
        let message = ConfigError::EmptyMasterKey.to_string();
        assert!(message.contains("Master key cannot be empty"));
    }

    #[test]
    fn test_invalid_endpoint_error_message() {
        let error = ConfigError::InvalidEndpoint {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("absolute URL"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "master_key",
        };
        let message = error.to_string();
        assert!(message.contains("master_key"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyMasterKey;
        let _: &dyn std::error::Error = &error;
    }
}
