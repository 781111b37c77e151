//! Change-stream event processing.
//!
//! A stream event carries a batch of change records in arrival order. Each
//! record is processed sequentially; outcomes are reported positionally so
//! the caller can map failures back to the records that produced them.

use serde::Deserialize;

use crate::config::{BatchPolicy, DeletePolicy, ProcessorConfig};
use crate::error::ConvertError;
use crate::executor::SqlExecutor;
use crate::upsert::{convert_tech_record_document, TechRecordUpsertResult};
use dynamodb_types::DynamoDbImage;

/// A batch of change records as delivered by the stream.
#[derive(Debug, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StreamRecord>,
}

/// One change record: the kind of change plus the post-change document image.
#[derive(Debug, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    #[serde(rename = "eventSourceARN")]
    pub event_source_arn: Option<String>,
    pub dynamodb: Option<StreamData>,
}

#[derive(Debug, Deserialize)]
pub struct StreamData {
    #[serde(rename = "NewImage")]
    pub new_image: Option<serde_json::Value>,
}

/// Per-record processing outcome, positionally aligned with the batch.
#[derive(Debug)]
pub enum RecordOutcome {
    Converted(Vec<TechRecordUpsertResult>),
    Skipped(SkipReason),
    Failed(ConvertError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A REMOVE event under the skip delete policy.
    Removal,
    /// An insert or modify record arrived without a post-change image.
    MissingImage,
}

/// Process every record in the batch, in order.
///
/// Under [`BatchPolicy::ContinueOnError`] a failing record is reported and
/// the batch keeps going; under [`BatchPolicy::AllOrNothing`] the first
/// failure ends the batch early, leaving later records unprocessed and
/// unreported.
pub async fn process_stream_event<E: SqlExecutor + ?Sized>(
    executor: &E,
    config: &ProcessorConfig,
    event: &StreamEvent,
) -> Result<Vec<RecordOutcome>, ConvertError> {
    tracing::info!(records = event.records.len(), "Processing stream event");

    let mut outcomes = Vec::with_capacity(event.records.len());
    for (index, record) in event.records.iter().enumerate() {
        match process_record(executor, config, record).await? {
            RecordOutcome::Converted(results) => {
                tracing::debug!(index, versions = results.len(), "Record converted");
                outcomes.push(RecordOutcome::Converted(results));
            }
            RecordOutcome::Skipped(reason) => {
                tracing::debug!(index, ?reason, "Record skipped");
                outcomes.push(RecordOutcome::Skipped(reason));
            }
            RecordOutcome::Failed(e) => {
                tracing::error!(index, "Record failed: {e}");
                if config.batch_policy == BatchPolicy::AllOrNothing {
                    return Err(e);
                }
                outcomes.push(RecordOutcome::Failed(e));
            }
        }
    }

    Ok(outcomes)
}

async fn process_record<E: SqlExecutor + ?Sized>(
    executor: &E,
    config: &ProcessorConfig,
    record: &StreamRecord,
) -> Result<RecordOutcome, ConvertError> {
    if record.event_name.as_deref() == Some("REMOVE") {
        return Ok(match config.delete_policy {
            DeletePolicy::Skip => RecordOutcome::Skipped(SkipReason::Removal),
            DeletePolicy::Reject => RecordOutcome::Failed(ConvertError::UnsupportedChange {
                kind: "REMOVE".to_string(),
            }),
        });
    }

    let Some(new_image) = record.dynamodb.as_ref().and_then(|d| d.new_image.as_ref()) else {
        return Ok(match config.delete_policy {
            DeletePolicy::Skip => RecordOutcome::Skipped(SkipReason::MissingImage),
            DeletePolicy::Reject => RecordOutcome::Failed(ConvertError::UnsupportedChange {
                kind: format!(
                    "{} without a new image",
                    record.event_name.as_deref().unwrap_or("UNKNOWN")
                ),
            }),
        });
    };

    let image = match DynamoDbImage::from_json(new_image) {
        Ok(image) => image,
        Err(e) => return Ok(RecordOutcome::Failed(ConvertError::Document(e))),
    };

    match convert_tech_record_document(executor, &image).await {
        Ok(results) => Ok(RecordOutcome::Converted(results)),
        Err(e) => Ok(RecordOutcome::Failed(e)),
    }
}
