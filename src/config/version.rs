//! REST API version handling.
//!
//! Every request carries an `x-ms-version` header. Versions are dated
//! (`YYYY-MM-DD`) and ordered chronologically.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Cosmos DB REST API version.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::ApiVersion;
///
/// let version: ApiVersion = "2018-12-31".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2018_12_31);
/// assert_eq!(version, ApiVersion::latest());
/// assert!(ApiVersion::no_partition() < ApiVersion::latest());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// First version with partitioned collections.
    V2015_12_16,
    /// 2016-07-11.
    V2016_07_11,
    /// 2017-02-22.
    V2017_02_22,
    /// 2017-11-15.
    V2017_11_15,
    /// 2018-06-18.
    V2018_06_18,
    /// 2018-09-17.
    V2018_09_17,
    /// 2018-12-31.
    V2018_12_31,
    /// Any other dated version.
    Custom(String),
}

impl ApiVersion {
    /// Returns the version sent by default.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2018_12_31
    }

    /// Returns the version used for queries against collections that were
    /// created without a partition key.
    ///
    /// Newer versions reject cross-partition style queries on such
    /// collections.
    #[must_use]
    pub const fn no_partition() -> Self {
        Self::V2017_02_22
    }

    const fn ordinal(&self) -> u32 {
        match self {
            Self::V2015_12_16 => 1,
            Self::V2016_07_11 => 2,
            Self::V2017_02_22 => 3,
            Self::V2017_11_15 => 4,
            Self::V2018_06_18 => 5,
            Self::V2018_09_17 => 6,
            Self::V2018_12_31 => 7,
            Self::Custom(_) => 100,
        }
    }

    fn is_valid_version_format(s: &str) -> bool {
        let parts: Vec<&str> = s.split('-').collect();
        matches!(parts.as_slice(), [year, month, day]
            if year.len() == 4
                && month.len() == 2
                && day.len() == 2
                && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())))
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.cmp(b),
            _ => self.ordinal().cmp(&other.ordinal()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2015_12_16 => "2015-12-16",
            Self::V2016_07_11 => "2016-07-11",
            Self::V2017_02_22 => "2017-02-22",
            Self::V2017_11_15 => "2017-11-15",
            Self::V2018_06_18 => "2018-06-18",
            Self::V2018_09_17 => "2018-09-17",
            Self::V2018_12_31 => "2018-12-31",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "2015-12-16" => Ok(Self::V2015_12_16),
            "2016-07-11" => Ok(Self::V2016_07_11),
            "2017-02-22" => Ok(Self::V2017_02_22),
            "2017-11-15" => Ok(Self::V2017_11_15),
            "2018-06-18" => Ok(Self::V2018_06_18),
            "2018-09-17" => Ok(Self::V2018_09_17),
            "2018-12-31" => Ok(Self::V2018_12_31),
            _ if Self::is_valid_version_format(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}
