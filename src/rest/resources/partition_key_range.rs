//! Partition key ranges.

use serde::{Deserialize, Serialize};

use crate::clients::{CallOption, CosmosError};
use crate::rest::{CosmosClient, CosmosResource, HasResource, ResourceResponse};

use super::common::Resource;

/// A range of hashed partition key values served by one physical
/// partition. The resource id is the range id used with
/// [`CallOption::PartitionKeyRangeId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionKeyRange {
    /// System properties; `id` is the range id.
    #[serde(flatten)]
    pub resource: Resource,

    /// Lower bound, inclusive.
    #[serde(default)]
    pub min_inclusive: String,

    /// Upper bound, exclusive.
    #[serde(default)]
    pub max_exclusive: String,

    /// Ranges this one was split from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

impl CosmosResource for PartitionKeyRange {
    const FEED: &'static str = "pkranges";
    const LIST_KEY: &'static str = "PartitionKeyRanges";
}

impl HasResource for PartitionKeyRange {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl CosmosClient {
    /// Lists the partition key ranges of a collection.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read_feed`](Self::read_feed).
    pub async fn query_partition_key_ranges(
        &self,
        coll: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<PartitionKeyRange>>, CosmosError> {
        self.list_resources(coll, "", options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ResourceList;

    #[test]
    fn test_decode_ranges() {
        let body = br#"{
            "_rid": "qYcAAPEvJBQ=",
            "PartitionKeyRanges": [
                {"_rid": "qYcAAPEvJBQCAAAAAAAAUA==", "id": "0", "_etag": "\"00002800-0000-0000-0000-580ac4ea0000\"",
                 "minInclusive": "", "maxExclusive": "05C1CFFFFFFFF8", "_self": "dbs/qYcAAA==/colls/qYcAAPEvJBQ=/pkranges/qYcAAPEvJBQCAAAAAAAAUA==/", "_ts": 1477100776},
                {"_rid": "qYcAAPEvJBQDAAAAAAAAUA==", "id": "1", "minInclusive": "05C1CFFFFFFFF8", "maxExclusive": "FF", "parents": ["0"]}
            ],
            "_count": 2
        }"#;
        let list: ResourceList<PartitionKeyRange> =
            ResourceList::decode(body, PartitionKeyRange::LIST_KEY).unwrap();

        assert_eq!(list.count, 2);
        assert_eq!(list.items[0].id(), "0");
        assert_eq!(list.items[0].min_inclusive, "");
        assert_eq!(list.items[1].max_exclusive, "FF");
        assert_eq!(list.items[1].parents, vec!["0"]);
    }
}
