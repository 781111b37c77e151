//! Processor configuration.
//!
//! These are the two policy decisions the caller controls; everything else
//! about the conversion is fixed by the schema contract.

use serde::{Deserialize, Serialize};

/// What to do with change records that carry no usable new image
/// (pure deletions, and malformed records without a document payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletePolicy {
    /// Record a skip outcome and continue.
    #[default]
    Skip,
    /// Record a failure outcome for the record.
    Reject,
}

/// How a per-record failure affects the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Record the failure and continue with the next record.
    #[default]
    ContinueOnError,
    /// Abort the whole batch on the first failure.
    AllOrNothing,
}

/// Stream event processor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessorConfig {
    #[serde(default)]
    pub delete_policy: DeletePolicy,
    #[serde(default)]
    pub batch_policy: BatchPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.delete_policy, DeletePolicy::Skip);
        assert_eq!(config.batch_policy, BatchPolicy::ContinueOnError);
    }

    #[test]
    fn test_deserializes_with_missing_fields() {
        let config: ProcessorConfig =
            serde_json::from_str(r#"{"delete_policy": "reject"}"#).unwrap();
        assert_eq!(config.delete_policy, DeletePolicy::Reject);
        assert_eq!(config.batch_policy, BatchPolicy::ContinueOnError);
    }
}
