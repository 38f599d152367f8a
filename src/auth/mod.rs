//! Master-key authentication.
//!
//! # Overview
//!
//! - [`authorization_token`]: The `Authorization` header value for one request
//! - [`http_date`]: The matching `x-ms-date` header value
//! - [`AuthError`]: Failures caused by unusable key material
//!
//! Signing happens inside
//! [`ResourceRequest::default_headers`](crate::clients::ResourceRequest::default_headers);
//! most callers never use this module directly.

mod error;
mod signature;

pub use error::AuthError;
pub use signature::{
    authorization_token, compute_signature, http_date, string_to_sign, RFC1123_FORMAT,
};
