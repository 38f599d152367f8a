//! Request signing errors.

use thiserror::Error;

/// Errors raised while computing a request's authorization token.
///
/// These are never retried: the same key produces the same failure on
/// every attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The master key is not valid base64 key material.
    #[error("invalid master key: {reason}")]
    InvalidMasterKey {
        /// Why decoding failed.
        reason: String,
    },

    /// The HMAC primitive rejected the key.
    #[error("failed to sign request: {reason}")]
    Signing {
        /// The underlying failure.
        reason: String,
    },
}
