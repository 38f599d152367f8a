//! Master-key authorization tokens.
//!
//! Each request is authorized by an HMAC-SHA256 over a canonical string
//! built from the verb, resource type, resource link and request date:
//!
//! ```text
//! lower(verb + "\n" + resource_type + "\n" + resource_link + "\n" + date + "\n" + "" + "\n")
//! ```
//!
//! The HMAC key is the base64-decoded master key. The digest is base64
//! encoded and wrapped as `type=master&ver=1.0&sig=<digest>`, and the whole
//! token is percent-encoded before it is placed in the `Authorization`
//! header.
//!
//! # Example
//!
//! ```rust
//! use cosmosdb_api::auth::authorization_token;
//! use cosmosdb_api::MasterKey;
//!
//! let key = MasterKey::new("YXJpZWwNCg==").unwrap();
//! let token = authorization_token(
//!     &key,
//!     "GET",
//!     "dbs",
//!     "dbs/mydb",
//!     "Mon, 02 Jan 2006 15:04:05 GMT",
//! )
//! .unwrap();
//! assert!(token.starts_with("type%3Dmaster%26ver%3D1.0%26sig%3D"));
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::AuthError;
use crate::config::MasterKey;

type HmacSha256 = Hmac<Sha256>;

/// Date format for the `x-ms-date` header (RFC 1123, always GMT).
pub const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a timestamp the way the service expects in `x-ms-date`.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use cosmosdb_api::auth::http_date;
///
/// let date = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
/// assert_eq!(http_date(date), "Mon, 02 Jan 2006 15:04:05 GMT");
/// ```
#[must_use]
pub fn http_date(date: DateTime<Utc>) -> String {
    date.format(RFC1123_FORMAT).to_string()
}

/// Builds the lowercased string that gets signed.
#[must_use]
pub fn string_to_sign(method: &str, resource_type: &str, resource_link: &str, date: &str) -> String {
    format!("{method}\n{resource_type}\n{resource_link}\n{date}\n\n").to_lowercase()
}

/// Computes the base64-encoded HMAC-SHA256 of `payload` under the decoded
/// master key.
///
/// # Errors
///
/// Returns [`AuthError::InvalidMasterKey`] if the key is not valid base64,
/// or [`AuthError::Signing`] if the HMAC primitive rejects the key.
pub fn compute_signature(master_key: &MasterKey, payload: &str) -> Result<String, AuthError> {
    let key = STANDARD
        .decode(master_key.as_ref())
        .map_err(|e| AuthError::InvalidMasterKey {
            reason: e.to_string(),
        })?;

    let mut mac = HmacSha256::new_from_slice(&key).map_err(|e| AuthError::Signing {
        reason: e.to_string(),
    })?;
    mac.update(payload.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Returns the percent-encoded `Authorization` header value for a request.
///
/// # Errors
///
/// Propagates the errors of [`compute_signature`].
pub fn authorization_token(
    master_key: &MasterKey,
    method: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> Result<String, AuthError> {
    let payload = string_to_sign(method, resource_type, resource_link, date);
    let signature = compute_signature(master_key, &payload)?;
    let token = format!("type=master&ver=1.0&sig={signature}");
    Ok(urlencoding::encode(&token).into_owned())
}
