//! Resource link parsing.
//!
//! Every request must be signed with the type and link of the resource it
//! addresses. Links come in two shapes:
//!
//! - **Self links**, built from service-assigned resource ids such as
//!   `dbs/b5NCAA==/colls/b5NCAB==/`. The id segments are base64-like and the
//!   database segment always contains `==`.
//! - **Named links**, built from user-chosen ids such as
//!   `dbs/mydb/colls/mycoll/docs/mydoc`.
//!
//! For self links the service signs with the bare id of the addressed
//! resource (or of the parent, for a feed). For named links it signs with
//! the full path.
//!
//! # Example
//!
//! ```rust
//! use cosmosdb_api::clients::ResourceLink;
//!
//! let link = ResourceLink::parse("/dbs/mydb/colls/mycoll/docs/mydoc");
//! assert_eq!(link.link(), "dbs/mydb/colls/mycoll/docs/mydoc");
//! assert_eq!(link.id(), "mydoc");
//! assert_eq!(link.resource_type(), "docs");
//!
//! let feed = ResourceLink::parse("dbs/b5NCAA==/colls/");
//! assert_eq!(feed.link(), "b5NCAA==");
//! assert_eq!(feed.resource_type(), "colls");
//! ```

use std::fmt;

/// Marker found in the database segment of a self link.
const SELF_LINK_MARKER: &str = "==";

/// Resource types known to the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// `dbs`
    Databases,
    /// `colls`
    Collections,
    /// `docs`
    Documents,
    /// `users`
    Users,
    /// `permissions`
    Permissions,
    /// `sprocs`
    StoredProcedures,
    /// `udfs`
    UserDefinedFunctions,
    /// `pkranges`
    PartitionKeyRanges,
}

impl ResourceType {
    /// Returns the path token for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Databases => "dbs",
            Self::Collections => "colls",
            Self::Documents => "docs",
            Self::Users => "users",
            Self::Permissions => "permissions",
            Self::StoredProcedures => "sprocs",
            Self::UserDefinedFunctions => "udfs",
            Self::PartitionKeyRanges => "pkranges",
        }
    }

    /// Looks up a type by its path token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        [
            Self::Databases,
            Self::Collections,
            Self::Documents,
            Self::Users,
            Self::Permissions,
            Self::StoredProcedures,
            Self::UserDefinedFunctions,
            Self::PartitionKeyRanges,
        ]
        .into_iter()
        .find(|t| t.as_str() == token)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed resource link.
///
/// Parsing is permissive: shapes outside the known hierarchy produce empty
/// `link`, `id` and `resource_type` rather than an error, and the request is
/// signed with empty values. Use [`ResourceLink::is_recognized`] to detect
/// that case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceLink {
    raw: String,
    link: String,
    id: String,
    resource_type: String,
}

impl ResourceLink {
    /// Parses a link, with or without leading and trailing slashes.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut normalized = String::with_capacity(raw.len() + 2);
        if !raw.starts_with('/') {
            normalized.push('/');
        }
        normalized.push_str(raw);
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let parts: Vec<&str> = normalized.split('/').collect();
        let (link, id, resource_type) =
            if parts.get(2).is_some_and(|p| p.contains(SELF_LINK_MARKER)) {
                Self::parse_self_link(&parts)
            } else {
                Self::parse_named_link(&parts)
            };

        Self {
            raw: raw.to_string(),
            link,
            id,
            resource_type,
        }
    }

    fn parse_self_link(parts: &[&str]) -> (String, String, String) {
        let l = parts.len();
        let (id, resource_type) = if l % 2 == 0 {
            (parts[l - 2], parts[l - 3])
        } else {
            (parts[l - 3], parts[l - 2])
        };
        (id.to_string(), id.to_string(), resource_type.to_string())
    }

    fn parse_named_link(parts: &[&str]) -> (String, String, String) {
        let owned = |s: &str| s.to_string();
        if parts.get(1) != Some(&"dbs") {
            return Default::default();
        }
        let child_feed = || matches!(parts.get(3), Some(&"colls" | &"users"));

        match parts.len() {
            3 => (String::new(), String::new(), owned("dbs")),
            4 => (format!("dbs/{}", parts[2]), owned(parts[2]), owned("dbs")),
            5 if child_feed() => (
                format!("dbs/{}/{}", parts[2], parts[3]),
                String::new(),
                owned(parts[3]),
            ),
            6 if child_feed() => (
                format!("dbs/{}/{}/{}", parts[2], parts[3], parts[4]),
                owned(parts[4]),
                owned(parts[3]),
            ),
            7 => (parts[1..6].join("/"), String::new(), owned(parts[5])),
            8 => (parts[1..7].join("/"), owned(parts[6]), owned(parts[5])),
            _ => Default::default(),
        }
    }

    /// Returns the link exactly as given.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the link used for signing.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Returns the resource id, empty for feeds of named links.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the resource type token used for signing.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the typed resource type, if the token is a known one.
    #[must_use]
    pub fn kind(&self) -> Option<ResourceType> {
        ResourceType::from_token(&self.resource_type)
    }

    /// Returns `false` when the link did not match any known shape.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !self.resource_type.is_empty()
    }
}

/// Joins a parent link and a child feed segment, e.g. `("dbs/mydb", "colls")`
/// becomes `dbs/mydb/colls/`.
#[must_use]
pub fn feed_link(parent: &str, feed: &str) -> String {
    let parent = parent.trim_matches('/');
    if parent.is_empty() {
        format!("{feed}/")
    } else {
        format!("{parent}/{feed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> (String, String, String) {
        let link = ResourceLink::parse(raw);
        (
            link.link().to_string(),
            link.id().to_string(),
            link.resource_type().to_string(),
        )
    }

    fn expect(link: &str, id: &str, resource_type: &str) -> (String, String, String) {
        (link.to_string(), id.to_string(), resource_type.to_string())
    }

    #[test]
    fn test_parse_self_links() {
        assert_eq!(
            parsed("/dbs/b5NCAA=="),
            expect("b5NCAA==", "b5NCAA==", "dbs")
        );
        assert_eq!(
            parsed("/dbs/b5NCAA==/colls/"),
            expect("b5NCAA==", "b5NCAA==", "colls")
        );
        assert_eq!(
            parsed("/dbs/b5NCAA==/colls/b5NCAB==/"),
            expect("b5NCAB==", "b5NCAB==", "colls")
        );
        assert_eq!(
            parsed("/dbs/b5NCAA==/colls/b5NCAB==/docs"),
            expect("b5NCAB==", "b5NCAB==", "docs")
        );
        assert_eq!(
            parsed("dbs/b5NCAA==/colls/b5NCAB==/docs/b5NCAC==/"),
            expect("b5NCAC==", "b5NCAC==", "docs")
        );
        assert_eq!(
            parsed("/dbs/b5NCAA==/users/b5NCAD==/permissions"),
            expect("b5NCAD==", "b5NCAD==", "permissions")
        );
    }

    #[test]
    fn test_parse_named_links() {
        assert_eq!(parsed("/dbs"), expect("", "", "dbs"));
        assert_eq!(parsed("/dbs/mydb"), expect("dbs/mydb", "mydb", "dbs"));
        assert_eq!(
            parsed("/dbs/mydb/colls/"),
            expect("dbs/mydb/colls", "", "colls")
        );
        assert_eq!(
            parsed("dbs/mydb/colls/mycoll"),
            expect("dbs/mydb/colls/mycoll", "mycoll", "colls")
        );
        assert_eq!(
            parsed("/dbs/mydb/colls/mycoll/docs/"),
            expect("dbs/mydb/colls/mycoll/docs", "", "docs")
        );
        assert_eq!(
            parsed("/dbs/mydb/colls/mycoll/docs/mydoc"),
            expect("dbs/mydb/colls/mycoll/docs/mydoc", "mydoc", "docs")
        );
        assert_eq!(
            parsed("/dbs/mydb/users/myuser"),
            expect("dbs/mydb/users/myuser", "myuser", "users")
        );
        assert_eq!(
            parsed("/dbs/mydb/users/myuser/permissions/myperm"),
            expect(
                "dbs/mydb/users/myuser/permissions/myperm",
                "myperm",
                "permissions"
            )
        );
    }

    #[test]
    fn test_unrecognized_shapes_yield_empty_fields() {
        for raw in ["", "/", "/offers/abc", "/dbs/mydb/triggers/", "/dbs/a/colls/b/docs/c/attachments/d"] {
            let link = ResourceLink::parse(raw);
            assert_eq!(link.link(), "", "link for {raw:?}");
            assert_eq!(link.id(), "", "id for {raw:?}");
            assert_eq!(link.resource_type(), "", "type for {raw:?}");
            assert!(!link.is_recognized());
            assert_eq!(link.raw(), raw);
        }
    }

    #[test]
    fn test_kind_maps_known_tokens() {
        assert_eq!(
            ResourceLink::parse("/dbs/mydb/colls/c/sprocs/s").kind(),
            Some(ResourceType::StoredProcedures)
        );
        assert_eq!(ResourceLink::parse("/").kind(), None);
        assert_eq!(ResourceType::from_token("pkranges"), Some(ResourceType::PartitionKeyRanges));
        assert_eq!(ResourceType::UserDefinedFunctions.to_string(), "udfs");
    }

    #[test]
    fn test_feed_link_joins_with_single_slashes() {
        assert_eq!(feed_link("", "dbs"), "dbs/");
        assert_eq!(feed_link("dbs/mydb", "colls"), "dbs/mydb/colls/");
        assert_eq!(feed_link("/dbs/mydb/colls/c/", "docs"), "dbs/mydb/colls/c/docs/");
        assert_eq!(feed_link("dbs/b5NCAA==/colls/b5NCAB==", "sprocs"), "dbs/b5NCAA==/colls/b5NCAB==/sprocs/");
    }
}
