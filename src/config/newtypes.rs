//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction, so a built
//! [`CosmosConfig`](super::CosmosConfig) always holds usable credentials and
//! a well-formed endpoint.

use crate::error::ConfigError;
use std::fmt;

/// The account master key used to sign every request.
///
/// The key is only checked for emptiness here. Whether it is valid base64
/// key material is discovered when the first request is signed, which
/// surfaces as [`AuthError::InvalidMasterKey`](crate::auth::AuthError::InvalidMasterKey).
///
/// # Security
///
/// The `Debug` implementation masks the key, displaying only
/// `MasterKey(*****)`.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::MasterKey;
///
/// let key = MasterKey::new("YXJpZWwNCg==").unwrap();
/// assert_eq!(format!("{:?}", key), "MasterKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MasterKey(String);

impl MasterKey {
    /// Creates a new master key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyMasterKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyMasterKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for MasterKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(*****)")
    }
}

/// A validated account endpoint, e.g. `https://myaccount.documents.azure.com:443`.
///
/// Trailing slashes are removed so resource links can be appended with a
/// single `/`.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::EndpointUrl;
///
/// let url = EndpointUrl::new("https://myaccount.documents.azure.com:443/").unwrap();
/// assert_eq!(url.as_ref(), "https://myaccount.documents.azure.com:443");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "myaccount.documents.azure.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no scheme or
    /// no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = url.get(host_start..).unwrap_or_default();
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end <= host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
