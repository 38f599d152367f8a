//! System properties shared by all resources.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Properties the service maintains on every resource.
///
/// Flatten this into a model with `#[serde(flatten)]`. Empty values are not
/// serialized, so a new resource only sends its `id`.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::rest::resources::Resource;
///
/// let resource: Resource = serde_json::from_str(
///     r#"{"id":"mydb","_rid":"7ZxhAA==","_self":"dbs/7ZxhAA==/","_etag":"\"00000a00\"","_ts":1459216987}"#,
/// )
/// .unwrap();
/// assert_eq!(resource.self_link, "dbs/7ZxhAA==/");
/// assert_eq!(resource.ts, 1_459_216_987);
///
/// let sent = serde_json::to_string(&Resource::with_id("mydb")).unwrap();
/// assert_eq!(sent, r#"{"id":"mydb"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// User-chosen id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Addressable self link.
    #[serde(rename = "_self", default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,

    /// Etag for optimistic concurrency.
    #[serde(rename = "_etag", default, skip_serializing_if = "String::is_empty")]
    pub etag: String,

    /// Service-assigned resource id.
    #[serde(rename = "_rid", default, skip_serializing_if = "String::is_empty")]
    pub rid: String,

    /// Last modification, seconds since the Unix epoch.
    #[serde(rename = "_ts", default, skip_serializing_if = "is_zero")]
    pub ts: i64,
}

impl Resource {
    /// Creates a resource with only an id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Per-document time to live, flattened into a document model.
///
/// `-1` keeps the document forever, even if the collection has a default
/// time to live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expirable {
    /// Seconds until the document expires.
    #[serde(default)]
    pub ttl: i64,
}

impl Expirable {
    /// A document that never expires.
    pub const NEVER: Self = Self { ttl: -1 };

    /// Expires after `ttl`, rounded to the nearest second.
    #[must_use]
    pub fn after(ttl: Duration) -> Self {
        let mut expirable = Self::default();
        expirable.set_ttl(ttl);
        expirable
    }

    /// Sets the time to live, rounded to the nearest second with halves
    /// rounded up.
    pub fn set_ttl(&mut self, ttl: Duration) {
        let secs = ttl.as_secs().saturating_add(u64::from(ttl.subsec_nanos() >= 500_000_000));
        self.ttl = i64::try_from(secs).unwrap_or(i64::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_properties_are_omitted() {
        assert_eq!(serde_json::to_value(Resource::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_missing_properties_default() {
        let resource: Resource = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert_eq!(resource, Resource::with_id("x"));
    }

    #[test]
    fn test_ttl() {
        assert_eq!(Expirable::after(Duration::from_millis(90_600)).ttl, 91);
        assert_eq!(Expirable::after(Duration::from_millis(90_500)).ttl, 91);
        assert_eq!(Expirable::after(Duration::from_millis(90_400)).ttl, 90);
        assert_eq!(Expirable::after(Duration::from_secs(u64::MAX)).ttl, i64::MAX);
        assert_eq!(Expirable::NEVER.ttl, -1);
        assert_eq!(serde_json::to_value(Expirable::NEVER).unwrap(), json!({"ttl": -1}));
    }
}
