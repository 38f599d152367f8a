//! Query metrics decoding.
//!
//! When a query is sent with
//! [`CallOption::PopulateQueryMetrics`](crate::clients::CallOption::PopulateQueryMetrics)
//! the service answers with a `x-ms-documentdb-query-metrics` header such as
//!
//! ```text
//! totalExecutionTimeInMs=33.67;queryCompileTimeInMs=0.06;retrievedDocumentCount=2000
//! ```
//!
//! and the request charge in `x-ms-request-charge`.
//!
//! # Example
//!
//! ```rust
//! use cosmosdb_api::clients::Metrics;
//!
//! let metrics = Metrics::decode(
//!     "totalExecutionTimeInMs=33.67;retrievedDocumentCount=2000",
//!     Some("604.42"),
//! )
//! .unwrap();
//! assert_eq!(metrics.total_execution_time_in_ms, 33.67);
//! assert_eq!(metrics.retrieved_document_count, 2000);
//! assert_eq!(metrics.request_charge, 604.42);
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::errors::ParseError;

/// Per-query execution statistics. Absent fields are zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Total query execution time.
    pub total_execution_time_in_ms: f64,
    /// Time spent compiling the query.
    pub query_compile_time_in_ms: f64,
    /// Time spent building the logical plan.
    pub query_logical_plan_build_time_in_ms: f64,
    /// Time spent building the physical plan.
    pub query_physical_plan_build_time_in_ms: f64,
    /// Time spent optimizing the query.
    pub query_optimization_time_in_ms: f64,
    /// Time spent in the query runtime.
    #[serde(rename = "VMExecutionTimeInMs")]
    pub vm_execution_time_in_ms: f64,
    /// Time spent in index lookups.
    pub index_lookup_time_in_ms: f64,
    /// Time spent loading documents.
    pub document_load_time_in_ms: f64,
    /// Time spent in built-in functions.
    pub system_function_execute_time_in_ms: f64,
    /// Time spent in user defined functions.
    pub user_function_execute_time_in_ms: f64,
    /// Documents read by the query.
    pub retrieved_document_count: u64,
    /// Bytes of documents read by the query.
    pub retrieved_document_size: u64,
    /// Documents returned by the query.
    pub output_document_count: u64,
    /// Time spent writing the output.
    pub write_output_time_in_ms: f64,
    /// Share of retrieved documents served by the index.
    pub index_utilization_ratio: f64,
    /// Request units consumed, from `x-ms-request-charge`.
    pub request_charge: f64,
}

impl Metrics {
    /// Decodes the metrics header and, if present, the request charge.
    ///
    /// Entries that are not `key=value` are skipped. Every value must be
    /// numeric; values of unknown keys are then ignored. Integer fields take
    /// the floor of the parsed value.
    ///
    /// # Errors
    ///
    /// - [`ParseError::NoMetrics`] if `metrics` is empty
    /// - [`ParseError::InvalidMetric`] if a value is not numeric
    /// - [`ParseError::InvalidRequestCharge`] if `charge` is not numeric
    pub fn decode(metrics: &str, charge: Option<&str>) -> Result<Self, ParseError> {
        if metrics.trim().is_empty() {
            return Err(ParseError::NoMetrics);
        }

        let mut decoded = Self::default();
        for entry in metrics.split(';') {
            let Some((key, value)) = entry.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            let number = value.parse::<f64>().map_err(|_| ParseError::InvalidMetric {
                key: key.to_string(),
                value: value.to_string(),
            })?;
            if let Some(slot) = decoded.slot(key) {
                slot.set(number);
            }
        }

        if let Some(charge) = charge {
            decoded.request_charge = parse_request_charge(charge)?;
        }
        Ok(decoded)
    }

    fn slot(&mut self, key: &str) -> Option<Slot<'_>> {
        let slot = match key {
            "totalExecutionTimeInMs" => Slot::Float(&mut self.total_execution_time_in_ms),
            "queryCompileTimeInMs" => Slot::Float(&mut self.query_compile_time_in_ms),
            "queryLogicalPlanBuildTimeInMs" => {
                Slot::Float(&mut self.query_logical_plan_build_time_in_ms)
            }
            "queryPhysicalPlanBuildTimeInMs" => {
                Slot::Float(&mut self.query_physical_plan_build_time_in_ms)
            }
            "queryOptimizationTimeInMs" => Slot::Float(&mut self.query_optimization_time_in_ms),
            "VMExecutionTimeInMs" => Slot::Float(&mut self.vm_execution_time_in_ms),
            "indexLookupTimeInMs" => Slot::Float(&mut self.index_lookup_time_in_ms),
            "documentLoadTimeInMs" => Slot::Float(&mut self.document_load_time_in_ms),
            "systemFunctionExecuteTimeInMs" => {
                Slot::Float(&mut self.system_function_execute_time_in_ms)
            }
            "userFunctionExecuteTimeInMs" => {
                Slot::Float(&mut self.user_function_execute_time_in_ms)
            }
            "retrievedDocumentCount" => Slot::Count(&mut self.retrieved_document_count),
            "retrievedDocumentSize" => Slot::Count(&mut self.retrieved_document_size),
            "outputDocumentCount" => Slot::Count(&mut self.output_document_count),
            "writeOutputTimeInMs" => Slot::Float(&mut self.write_output_time_in_ms),
            "indexUtilizationRatio" => Slot::Float(&mut self.index_utilization_ratio),
            _ => return None,
        };
        Some(slot)
    }
}

enum Slot<'a> {
    Float(&'a mut f64),
    Count(&'a mut u64),
}

impl Slot<'_> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn set(self, value: f64) {
        match self {
            Self::Float(slot) => *slot = value,
            Self::Count(slot) => *slot = value.floor().max(0.0) as u64,
        }
    }
}

/// Parses an `x-ms-request-charge` value.
///
/// # Errors
///
/// Returns [`ParseError::InvalidRequestCharge`] if the value is not numeric.
pub fn parse_request_charge(value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidRequestCharge {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_fields_and_charge() {
        let metrics = Metrics::decode(
            "totalExecutionTimeInMs=33.67;retrievedDocumentCount=2000",
            Some("604.42"),
        )
        .unwrap();

        assert_eq!(
            metrics,
            Metrics {
                total_execution_time_in_ms: 33.67,
                retrieved_document_count: 2000,
                request_charge: 604.42,
                ..Metrics::default()
            }
        );
    }

    #[test]
    fn test_decode_full_header() {
        let header = "totalExecutionTimeInMs=0.92;queryCompileTimeInMs=0.06;\
            queryLogicalPlanBuildTimeInMs=0.02;queryPhysicalPlanBuildTimeInMs=0.10;\
            queryOptimizationTimeInMs=0.00;VMExecutionTimeInMs=0.24;indexLookupTimeInMs=0.07;\
            documentLoadTimeInMs=0.06;systemFunctionExecuteTimeInMs=0.00;\
            userFunctionExecuteTimeInMs=0.00;retrievedDocumentCount=3;retrievedDocumentSize=1124;\
            outputDocumentCount=3;outputDocumentSize=1174;writeOutputTimeInMs=0.01;\
            indexUtilizationRatio=1.00";
        let metrics = Metrics::decode(header, None).unwrap();

        assert_eq!(metrics.vm_execution_time_in_ms, 0.24);
        assert_eq!(metrics.retrieved_document_size, 1124);
        assert_eq!(metrics.output_document_count, 3);
        assert_eq!(metrics.index_utilization_ratio, 1.0);
        assert_eq!(metrics.request_charge, 0.0);
    }

    #[test]
    fn test_integer_fields_are_floored() {
        let metrics = Metrics::decode("retrievedDocumentCount=12.9", None).unwrap();
        assert_eq!(metrics.retrieved_document_count, 12);
    }

    #[test]
    fn test_unknown_keys_and_malformed_entries_are_skipped() {
        let metrics =
            Metrics::decode("outputDocumentSize=1174;noequals;indexLookupTimeInMs=1.5;", None).unwrap();
        assert_eq!(metrics.index_lookup_time_in_ms, 1.5);
    }

    #[test]
    fn test_non_numeric_unknown_key_is_rejected() {
        let result = Metrics::decode("futureMetric=abc;totalExecutionTimeInMs=1", None);
        assert!(matches!(
            result,
            Err(ParseError::InvalidMetric { ref key, ref value }) if key == "futureMetric" && value == "abc"
        ));
    }

    #[test]
    fn test_empty_header_is_no_metrics() {
        assert!(matches!(Metrics::decode("", None), Err(ParseError::NoMetrics)));
        assert!(matches!(Metrics::decode("  ", Some("1")), Err(ParseError::NoMetrics)));
    }

    #[test]
    fn test_non_numeric_values_fail() {
        assert!(matches!(
            Metrics::decode("totalExecutionTimeInMs=fast", None),
            Err(ParseError::InvalidMetric { key, .. }) if key == "totalExecutionTimeInMs"
        ));
        assert!(matches!(
            Metrics::decode("totalExecutionTimeInMs=1", Some("lots")),
            Err(ParseError::InvalidRequestCharge { .. })
        ));
    }
}
