//! Outbound request construction.
//!
//! A [`ResourceRequest`] is an HTTP request plus the parsed
//! [`ResourceLink`] it addresses and an optional [`RequestContext`]. It is
//! owned by the call that builds it and re-sent unchanged on every retry.
//!
//! # Example
//!
//! ```rust
//! use cosmosdb_api::clients::{headers, CallOption, HttpMethod, ResourceRequest};
//! use cosmosdb_api::{CosmosConfig, EndpointUrl, MasterKey};
//!
//! let config = CosmosConfig::builder()
//!     .endpoint(EndpointUrl::new("https://localhost:8081").unwrap())
//!     .master_key(MasterKey::new("YXJpZWwNCg==").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut request = ResourceRequest::new(HttpMethod::Get, "https://localhost:8081", "dbs/mydb");
//! request.apply_options(&config, &[CallOption::Limit(10)]).unwrap();
//!
//! assert_eq!(request.url, "https://localhost:8081/dbs/mydb");
//! assert!(request.header(headers::AUTHORIZATION).is_some());
//! assert_eq!(request.header(headers::MAX_ITEM_COUNT), Some("10"));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::auth::{authorization_token, http_date};
use crate::clients::context::RequestContext;
use crate::clients::errors::{CosmosError, ParseError};
use crate::clients::headers;
use crate::clients::link::ResourceLink;
use crate::clients::options::CallOption;
use crate::config::{ApiVersion, CosmosConfig, MasterKey};

/// HTTP methods used by the REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A request addressed to one resource link.
#[derive(Clone, Debug)]
pub struct ResourceRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Full URL: endpoint, `/`, raw link.
    pub url: String,
    /// The parsed link, used for signing and diagnostics.
    pub link: ResourceLink,
    /// Request headers.
    pub headers: HeaderMap,
    /// Serialized body, if any.
    pub body: Option<Vec<u8>>,
    /// Cancellation context attached by [`CallOption::Context`].
    pub context: Option<RequestContext>,
}

impl ResourceRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: &str, link: &str) -> Self {
        let url = format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            link.trim_start_matches('/')
        );
        Self {
            method,
            url,
            link: ResourceLink::parse(link),
            headers: HeaderMap::new(),
            body: None,
            context: None,
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Replaces any value of `name` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeaderValue`] if `value` contains
    /// characters that are not allowed in a header.
    pub fn set_header(&mut self, name: &'static str, value: &str) -> Result<(), ParseError> {
        let value = HeaderValue::from_str(value)
            .map_err(|_| ParseError::InvalidHeaderValue { name })?;
        self.headers.insert(HeaderName::from_static(name), value);
        Ok(())
    }

    /// Appends `value` to `name`, keeping existing values.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeaderValue`] if `value` contains
    /// characters that are not allowed in a header.
    pub fn add_header(&mut self, name: &'static str, value: &str) -> Result<(), ParseError> {
        let value = HeaderValue::from_str(value)
            .map_err(|_| ParseError::InvalidHeaderValue { name })?;
        self.headers.append(HeaderName::from_static(name), value);
        Ok(())
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns every value of a header.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Sets the date, version, user agent and authorization headers, signing
    /// with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Auth`] if the master key cannot sign.
    pub fn default_headers(
        &mut self,
        master_key: &MasterKey,
        api_version: &ApiVersion,
        user_agent: &str,
    ) -> Result<(), CosmosError> {
        self.default_headers_at(master_key, api_version, user_agent, Utc::now())
    }

    /// Like [`default_headers`](Self::default_headers) with a fixed clock.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Auth`] if the master key cannot sign.
    pub fn default_headers_at(
        &mut self,
        master_key: &MasterKey,
        api_version: &ApiVersion,
        user_agent: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CosmosError> {
        let date = http_date(now);
        let token = authorization_token(
            master_key,
            self.method.as_str(),
            self.link.resource_type(),
            self.link.link(),
            &date,
        )?;

        self.set_header(headers::DATE, &date)?;
        self.set_header(headers::VERSION, &api_version.to_string())?;
        self.set_header(headers::USER_AGENT, user_agent)?;
        self.set_header(headers::AUTHORIZATION, &token)?;
        Ok(())
    }

    /// Marks the request as a query.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in values; the signature matches the other
    /// header setters.
    pub fn query_headers(&mut self) -> Result<(), CosmosError> {
        self.set_header(headers::CONTENT_TYPE, headers::QUERY_CONTENT_TYPE)?;
        self.set_header(headers::IS_QUERY, "true")?;
        CallOption::QueryVersion.apply(self)
    }

    /// Applies the default headers, then every option in order.
    ///
    /// `None` entries are skipped. The first failing option stops the
    /// pipeline; headers written before it stay set.
    ///
    /// # Errors
    ///
    /// Returns the first signing or option error.
    pub fn apply_options<'a, I, O>(
        &mut self,
        config: &CosmosConfig,
        options: I,
    ) -> Result<(), CosmosError>
    where
        I: IntoIterator<Item = O>,
        O: Into<Option<&'a CallOption>>,
    {
        self.default_headers(config.master_key(), config.api_version(), &config.user_agent())?;
        for option in options.into_iter().filter_map(Into::into) {
            option.apply(self)?;
        }
        Ok(())
    }

    /// Renders the request as an equivalent `curl` command line.
    ///
    /// The authorization header is replaced with `*****` unless
    /// `include_auth` is set.
    #[must_use]
    pub fn to_curl(&self, include_auth: bool) -> String {
        let mut command = format!("curl -X {} '{}'", self.method, self.url);
        for (name, value) in &self.headers {
            let value = if name.as_str() == headers::AUTHORIZATION && !include_auth {
                "*****"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            command.push_str(&format!(" -H '{name}: {value}'"));
        }
        if let Some(body) = &self.body {
            command.push_str(&format!(" -d '{}'", String::from_utf8_lossy(body)));
        }
        command
    }
}
